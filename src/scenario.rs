//! Simulated player projections, one column per scenario.
//!
//! The raw [SimulationTable] is keyed by player name. It is joined against the [Catalog] by name
//! rather than by row position; the join reports every missing, unknown or repeated player.

use std::fmt::{Display, Formatter};

use rustc_hash::FxHashSet;
use thiserror::Error;

use crate::catalog::Catalog;
use crate::matrix::Matrix;

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRow {
    pub player: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationTable {
    pub scenario_labels: Vec<String>,
    pub rows: Vec<SimulationRow>,
}
impl SimulationTable {
    pub fn scenarios(&self) -> usize {
        self.scenario_labels.len()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaMismatch {
    /// In the catalog but absent from the simulation table.
    pub missing: Vec<String>,
    /// In the simulation table but absent from the catalog.
    pub extra: Vec<String>,
    /// Appearing more than once in the simulation table.
    pub duplicated: Vec<String>,
}
impl SchemaMismatch {
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.duplicated.is_empty()
    }
}

impl Display for SchemaMismatch {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "player names in the simulation table do not match the player table: missing {:?}, extra {:?}, duplicated {:?}",
            self.missing, self.extra, self.duplicated
        )
    }
}

impl std::error::Error for SchemaMismatch {}

#[derive(Debug, Error, PartialEq)]
pub enum ScenarioError {
    #[error("{0}")]
    SchemaMismatch(#[from] SchemaMismatch),

    #[error("{requested} scenarios requested, but the simulation table has {available}")]
    InsufficientScenarios { requested: usize, available: usize },

    #[error("player '{player}' has {actual} projections, expected {expected}")]
    RaggedRow {
        player: String,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite projection {value} for player '{player}' in scenario {scenario}")]
    NonFinite {
        player: String,
        scenario: usize,
        value: f64,
    },
}

/// Projected values laid out one row per scenario, one column per catalog player.
#[derive(Debug, Clone, PartialEq)]
pub struct Scenarios {
    values: Matrix<f64>,
}
impl Scenarios {
    /// Joins `table` onto `catalog` by player name. `limit` takes only the first scenarios; `None`
    /// uses all of them.
    pub fn join(
        catalog: &Catalog,
        table: &SimulationTable,
        limit: Option<usize>,
    ) -> Result<Self, ScenarioError> {
        let mismatch = check_schema(catalog, table);
        if !mismatch.is_empty() {
            return Err(mismatch.into());
        }

        let available = table.scenarios();
        let scenarios = match limit {
            Some(requested) if requested > available => {
                return Err(ScenarioError::InsufficientScenarios {
                    requested,
                    available,
                })
            }
            Some(requested) => requested,
            None => available,
        };

        let mut values = Matrix::allocate(scenarios, catalog.len());
        for row in &table.rows {
            if row.values.len() != available {
                return Err(ScenarioError::RaggedRow {
                    player: row.player.clone(),
                    expected: available,
                    actual: row.values.len(),
                });
            }
            let Some(player) = catalog.index_of(&row.player) else {
                return Err(SchemaMismatch {
                    extra: vec![row.player.clone()],
                    ..SchemaMismatch::default()
                }
                .into());
            };
            for (scenario, &value) in row.values[..scenarios].iter().enumerate() {
                if !value.is_finite() {
                    return Err(ScenarioError::NonFinite {
                        player: row.player.clone(),
                        scenario,
                        value,
                    });
                }
                values[(scenario, player)] = value;
            }
        }
        Ok(Self { values })
    }

    pub fn from_matrix(values: Matrix<f64>) -> Self {
        Self { values }
    }

    pub fn len(&self) -> usize {
        self.values.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.values.rows() == 0
    }

    pub fn players(&self) -> usize {
        self.values.cols()
    }

    /// Projected value of every catalog player in the given scenario.
    pub fn projections(&self, scenario: usize) -> &[f64] {
        self.values.row_slice(scenario)
    }
}

pub fn check_schema(catalog: &Catalog, table: &SimulationTable) -> SchemaMismatch {
    let mut mismatch = SchemaMismatch::default();
    let mut seen = FxHashSet::default();
    for row in &table.rows {
        if catalog.index_of(&row.player).is_none() {
            mismatch.extra.push(row.player.clone());
        } else if !seen.insert(row.player.as_str()) {
            mismatch.duplicated.push(row.player.clone());
        }
    }
    for player in catalog.players() {
        if !seen.contains(player.name.as_str()) {
            mismatch.missing.push(player.name.clone());
        }
    }
    mismatch
}

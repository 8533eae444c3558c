//! Reading the player, simulation and payout tables, and writing the probability and result
//! tables. All functions work over [Read]/[Write] so that tables can come from files or memory.

use std::io;
use std::io::{Read, Write};
use std::ops::Index;

use ordinalizer::Ordinal;
use serde::Deserialize;
use strum::{EnumCount, IntoEnumIterator};
use strum_macros::{Display, EnumIter};
use thiserror::Error;

use crate::catalog::{Catalog, CatalogError, Player};
use crate::evaluation::Evaluation;
use crate::payout::{PayoutError, PayoutSchedule};
use crate::scenario::{SimulationRow, SimulationTable};

pub const PLAYER_NAME_COLUMN: &str = "player_name";

#[derive(Debug, Error)]
pub enum TableError {
    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("{0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("expected column '{expected}' but found '{actual}'")]
    UnexpectedColumn {
        expected: &'static str,
        actual: String,
    },

    #[error("invalid value '{value}' in column '{column}' for player '{player}'")]
    InvalidValue {
        player: String,
        column: String,
        value: String,
    },

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Payout(#[from] PayoutError),
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, strum_macros::EnumCount, EnumIter, Display)]
pub enum ProbabilityColumn {
    Name,
    #[strum(serialize = "probabilities")]
    Probabilities,
}

impl From<ProbabilityColumn> for usize {
    fn from(column: ProbabilityColumn) -> Self {
        column.ordinal()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Ordinal, strum_macros::EnumCount, EnumIter, Display)]
pub enum ResultColumn {
    LineupMembers,
    LineupSalary,
    ExpectedValue,
}

impl From<ResultColumn> for usize {
    fn from(column: ResultColumn) -> Self {
        column.ordinal()
    }
}

/// A row of output cells addressed by column ordinal.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    items: Vec<String>,
}
impl Record {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: vec![String::new(); capacity],
        }
    }

    pub fn with_values<I>(values: I) -> Self
    where
        I: IntoIterator,
        I::Item: ToString,
    {
        let items = values.into_iter().map(|value| value.to_string()).collect();
        Self { items }
    }

    pub fn set(&mut self, ordinal: impl Into<usize>, value: impl ToString) {
        self.items[ordinal.into()] = value.to_string();
    }
}

impl<I: Into<usize>> Index<I> for Record {
    type Output = String;

    fn index(&self, index: I) -> &Self::Output {
        &self.items[index.into()]
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[derive(Debug, Deserialize)]
struct RawPlayer {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Salary")]
    salary: f64,
    #[serde(rename = "probabilities", default)]
    probability: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct RawPayout {
    lineup_rank: usize,
    associated_payout: f64,
}

/// Reads the player table: columns `Name`, `Salary` and optionally `probabilities`. Extra columns
/// are ignored.
pub fn read_players<R: Read>(rdr: R) -> Result<Catalog, TableError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut players = vec![];
    for result in reader.deserialize::<RawPlayer>() {
        let raw = result?;
        let name = raw.name.trim().to_string();
        if !raw.salary.is_finite() || raw.salary < 0.0 || raw.salary.fract() != 0.0 {
            return Err(TableError::InvalidValue {
                player: name,
                column: "Salary".into(),
                value: raw.salary.to_string(),
            });
        }
        players.push(Player {
            name,
            salary: raw.salary as u64,
            probability: raw.probability,
        });
    }
    Ok(Catalog::try_from(players)?)
}

/// Reads the simulation table: a `player_name` column followed by one column of projections
/// per scenario.
pub fn read_simulations<R: Read>(rdr: R) -> Result<SimulationTable, TableError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let headers = reader.headers()?.clone();
    let first = headers.get(0).map(str::trim).unwrap_or_default();
    if first != PLAYER_NAME_COLUMN {
        return Err(TableError::UnexpectedColumn {
            expected: PLAYER_NAME_COLUMN,
            actual: first.to_string(),
        });
    }
    let scenario_labels: Vec<_> = headers.iter().skip(1).map(|label| label.trim().to_string()).collect();

    let mut rows = vec![];
    for result in reader.records() {
        let record = result?;
        let player = record.get(0).unwrap_or_default().trim().to_string();
        let mut values = Vec::with_capacity(scenario_labels.len());
        for (label, field) in scenario_labels.iter().zip(record.iter().skip(1)) {
            let value = field.trim().parse::<f64>().map_err(|_| TableError::InvalidValue {
                player: player.clone(),
                column: label.clone(),
                value: field.to_string(),
            })?;
            values.push(value);
        }
        rows.push(SimulationRow { player, values });
    }
    Ok(SimulationTable {
        scenario_labels,
        rows,
    })
}

/// Reads the payout table: columns `lineup_rank` and `associated_payout`, one row per rank.
pub fn read_payouts<R: Read>(rdr: R) -> Result<PayoutSchedule, TableError> {
    let mut reader = csv::Reader::from_reader(rdr);
    let mut ranked = vec![];
    for result in reader.deserialize::<RawPayout>() {
        let raw = result?;
        ranked.push((raw.lineup_rank, raw.associated_payout));
    }
    Ok(PayoutSchedule::from_ranked(ranked)?)
}

pub fn write_probabilities<W: Write>(
    wtr: W,
    catalog: &Catalog,
    probabilities: &[f64],
) -> Result<(), TableError> {
    debug_assert_eq!(catalog.len(), probabilities.len());
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(&Record::with_values(ProbabilityColumn::iter()))?;
    for (player, probability) in catalog.players().iter().zip(probabilities) {
        let mut record = Record::with_capacity(ProbabilityColumn::COUNT);
        record.set(ProbabilityColumn::Name, &player.name);
        record.set(ProbabilityColumn::Probabilities, probability);
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_evaluations<W: Write>(wtr: W, evaluations: &[Evaluation]) -> Result<(), TableError> {
    let mut writer = csv::Writer::from_writer(wtr);
    writer.write_record(&Record::with_values(ResultColumn::iter()))?;
    for evaluation in evaluations {
        let mut record = Record::with_capacity(ResultColumn::COUNT);
        record.set(
            ResultColumn::LineupMembers,
            serde_json::to_string(&evaluation.members)?,
        );
        record.set(ResultColumn::LineupSalary, evaluation.salary);
        record.set(ResultColumn::ExpectedValue, evaluation.expected_value);
        writer.write_record(&record)?;
    }
    writer.flush()?;
    Ok(())
}

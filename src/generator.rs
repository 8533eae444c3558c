//! Constrained lineup sampling.
//!
//! Players are swept in descending order of selection probability. Each player is included
//! with its own probability; an inclusion that pushes the lineup over the upper salary cap, or
//! fills the lineup below the lower cap, discards the attempt and starts a fresh one. Sweeps
//! repeat until the lineup is full.

use rustc_hash::FxHashSet;
use thiserror::Error;
use tinyrand::Rand;
use tracing::{debug, trace, warn};

use crate::catalog::{Catalog, CatalogError};
use crate::lineup::{Lineup, LineupBuilder, SalaryCap};
use crate::probs::bernoulli;

pub const DEFAULT_PLAYERS_PER_TEAM: usize = 6;
pub const DEFAULT_MAX_SWEEPS: u64 = 1_000_000;

#[derive(Debug, Error, PartialEq)]
pub enum GenerationError {
    #[error("{0}")]
    Precondition(#[from] CatalogError),

    #[error("lineup {lineup} not completed after {sweeps} sweeps ({restarts} restarts): infeasible cap/probability configuration")]
    SweepsExhausted {
        lineup: usize,
        sweeps: u64,
        restarts: u64,
    },
}

#[derive(Debug, Clone)]
pub struct LineupGenerator<'a> {
    catalog: &'a Catalog,
    players_per_team: usize,
    salary_cap: SalaryCap,
    max_sweeps: u64,
}
impl<'a> LineupGenerator<'a> {
    pub fn new(catalog: &'a Catalog) -> Self {
        Self {
            catalog,
            players_per_team: DEFAULT_PLAYERS_PER_TEAM,
            salary_cap: SalaryCap::default(),
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }

    #[must_use]
    pub fn with_players_per_team(mut self, players_per_team: usize) -> Self {
        self.players_per_team = players_per_team;
        self
    }

    #[must_use]
    pub fn with_salary_cap(mut self, salary_cap: SalaryCap) -> Self {
        self.salary_cap = salary_cap;
        self
    }

    #[must_use]
    pub fn with_max_sweeps(mut self, max_sweeps: u64) -> Self {
        self.max_sweeps = max_sweeps;
        self
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        self.catalog.validate_probabilities()?;
        self.catalog
            .validate_feasible(self.players_per_team, &self.salary_cap)
    }

    /// Generates `teams` lineups, sorted by descending total salary. Identical lineups may occur
    /// more than once.
    pub fn generate(&self, teams: usize, rand: &mut impl Rand) -> Result<Vec<Lineup>, GenerationError> {
        self.validate()?;
        let ranked = self.catalog.ranked_by_probability();
        let mut lineups = Vec::with_capacity(teams);
        for lineup in 0..teams {
            lineups.push(self.generate_one(lineup, &ranked, rand)?);
        }
        lineups.sort_by(|a, b| b.salary().cmp(&a.salary()));

        let distinct = lineups.iter().collect::<FxHashSet<_>>().len();
        if distinct < lineups.len() {
            warn!(
                "{} of {} generated lineups are duplicates",
                lineups.len() - distinct,
                lineups.len()
            );
        }
        debug!("generated {} lineups", lineups.len());
        Ok(lineups)
    }

    fn generate_one(
        &self,
        lineup: usize,
        ranked: &[usize],
        rand: &mut impl Rand,
    ) -> Result<Lineup, GenerationError> {
        let mut builder = LineupBuilder::default();
        let (mut sweeps, mut restarts) = (0, 0);
        while builder.len() < self.players_per_team {
            if sweeps == self.max_sweeps {
                return Err(GenerationError::SweepsExhausted {
                    lineup,
                    sweeps,
                    restarts,
                });
            }
            sweeps += 1;

            for &player in ranked {
                let included = bernoulli(self.catalog.probability(player), rand);
                if builder.len() == self.players_per_team {
                    break;
                }
                if !included || builder.contains(player) {
                    continue;
                }

                builder = builder.with_player(player, self.catalog.salary(player));
                let over_cap = builder.salary() > self.salary_cap.max;
                let full_under_cap = builder.len() == self.players_per_team
                    && builder.salary() < self.salary_cap.min;
                if over_cap || full_under_cap {
                    trace!(
                        "discarding lineup {lineup} attempt at salary {}",
                        builder.salary()
                    );
                    restarts += 1;
                    builder = LineupBuilder::default();
                }
            }
        }
        trace!("lineup {lineup} completed after {sweeps} sweeps, {restarts} restarts");
        Ok(builder.build(self.catalog))
    }
}

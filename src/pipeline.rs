//! End-to-end evaluation: load the tables, join the simulations onto the catalog, generate
//! lineups, re-estimate player frequencies, rank lineups across scenarios and price the rank
//! distributions with the payout schedule.
//!
//! Every input is read and the simulation join is validated before any lineup is generated or
//! any output written, so a failed run leaves nothing behind.

use std::fs;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tinyrand::Rand;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::csv::{read_payouts, read_players, read_simulations, write_evaluations, write_probabilities, TableError};
use crate::evaluation::{evaluate, Evaluation};
use crate::frequency::reestimate_probabilities;
use crate::generator::{GenerationError, LineupGenerator};
use crate::histogram::RankHistogram;
use crate::lineup::Lineup;
use crate::mc::Scorer;
use crate::payout::PayoutSchedule;
use crate::scenario::{ScenarioError, Scenarios, SimulationTable};

pub const PROBABILITIES_FILE: &str = "probabilities.csv";
pub const RESULTS_FILE: &str = "results.csv";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input {} unavailable: {source}", .path.display())]
    InputUnavailable { path: PathBuf, source: TableError },

    #[error("{0}")]
    SchemaMismatch(#[from] ScenarioError),

    #[error("{0}")]
    PreconditionViolation(#[from] GenerationError),

    #[error("failed to write {}: {source}", .path.display())]
    WriteFailure { path: PathBuf, source: TableError },
}

#[derive(Debug, Clone)]
pub struct Inputs {
    pub catalog: Catalog,
    pub simulations: SimulationTable,
    pub payouts: PayoutSchedule,
}
impl Inputs {
    pub fn read(
        players: impl AsRef<Path>,
        simulations: impl AsRef<Path>,
        payouts: impl AsRef<Path>,
    ) -> Result<Self, PipelineError> {
        let catalog = read_input(players.as_ref(), read_players)?;
        let simulations = read_input(simulations.as_ref(), read_simulations)?;
        let payouts = read_input(payouts.as_ref(), read_payouts)?;
        debug!(
            "read {} players, {} scenarios, {} payouts",
            catalog.len(),
            simulations.scenarios(),
            payouts.len()
        );
        Ok(Self {
            catalog,
            simulations,
            payouts,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Outcome {
    /// Generated lineups, by descending salary.
    pub lineups: Vec<Lineup>,
    /// Re-estimated selection frequency of every catalog player.
    pub probabilities: Vec<f64>,
    pub histogram: RankHistogram,
    /// Lineups by descending expected value.
    pub evaluations: Vec<Evaluation>,
}

#[derive(Debug, Clone)]
pub struct Pipeline<'a> {
    config: &'a Config,
}
impl<'a> Pipeline<'a> {
    pub fn new(config: &'a Config) -> Self {
        Self { config }
    }

    pub fn run(
        &self,
        inputs: &Inputs,
        teams: usize,
        rand: &mut impl Rand,
    ) -> Result<Outcome, PipelineError> {
        let scenarios = Scenarios::join(&inputs.catalog, &inputs.simulations, self.config.simulations)?;

        let lineups = LineupGenerator::new(&inputs.catalog)
            .with_players_per_team(self.config.players_per_team)
            .with_salary_cap(self.config.salary_cap.clone())
            .with_max_sweeps(self.config.max_sweeps)
            .generate(teams, rand)?;
        info!("generated {} lineups", lineups.len());

        let probabilities = reestimate_probabilities(&inputs.catalog, &lineups);

        let scorer = Scorer::new(&lineups, &scenarios);
        let histogram = if self.config.parallel {
            scorer.histogram_par()
        } else {
            scorer.histogram()
        };
        info!("ranked {} lineups across {} scenarios", lineups.len(), histogram.trials());

        let evaluations = evaluate(&inputs.catalog, &lineups, &histogram, &inputs.payouts);
        Ok(Outcome {
            lineups,
            probabilities,
            histogram,
            evaluations,
        })
    }
}

/// Writes the re-estimated probabilities and the evaluated lineups into `out_dir`, creating it
/// if needed.
pub fn write_outputs(
    out_dir: impl AsRef<Path>,
    catalog: &Catalog,
    outcome: &Outcome,
) -> Result<(), PipelineError> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|err| PipelineError::WriteFailure {
        path: out_dir.to_path_buf(),
        source: err.into(),
    })?;
    write_output(&out_dir.join(PROBABILITIES_FILE), |file| {
        write_probabilities(BufWriter::new(file), catalog, &outcome.probabilities)
    })?;
    write_output(&out_dir.join(RESULTS_FILE), |file| {
        write_evaluations(BufWriter::new(file), &outcome.evaluations)
    })?;
    Ok(())
}

fn read_input<T>(
    path: &Path,
    read: impl FnOnce(BufReader<File>) -> Result<T, TableError>,
) -> Result<T, PipelineError> {
    File::open(path)
        .map_err(TableError::from)
        .and_then(|file| read(BufReader::new(file)))
        .map_err(|source| PipelineError::InputUnavailable {
            path: path.to_path_buf(),
            source,
        })
}

fn write_output(
    path: &Path,
    write: impl FnOnce(File) -> Result<(), TableError>,
) -> Result<(), PipelineError> {
    File::create(path)
        .map_err(TableError::from)
        .and_then(write)
        .map_err(|source| PipelineError::WriteFailure {
            path: path.to_path_buf(),
            source,
        })?;
    debug!("wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests;

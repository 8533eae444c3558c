//! Run configuration, optionally sourced from a JSON file. Absent fields take their defaults.

use std::fs::File;
use std::io;
use std::io::BufReader;
use std::path::Path;

use anyhow::bail;
use serde::{Deserialize, Serialize};

use crate::generator::{DEFAULT_MAX_SWEEPS, DEFAULT_PLAYERS_PER_TEAM};
use crate::lineup::SalaryCap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub players_per_team: usize,
    pub salary_cap: SalaryCap,
    /// Scenarios to simulate; `None` uses every scenario in the simulation table.
    pub simulations: Option<usize>,
    /// Sweeps of the player list allowed per lineup before generation gives up.
    pub max_sweeps: u64,
    /// Generator seed; `None` derives one from the clock.
    pub seed: Option<u64>,
    pub parallel: bool,
}
impl Config {
    pub fn read_json_file(path: impl AsRef<Path>) -> Result<Self, io::Error> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.players_per_team == 0 {
            bail!("at least one player per team must be specified")
        }
        if self.salary_cap.min > self.salary_cap.max {
            bail!(
                "minimum salary {} exceeds maximum salary {}",
                self.salary_cap.min,
                self.salary_cap.max
            )
        }
        if self.max_sweeps == 0 {
            bail!("at least one sweep must be allowed")
        }
        if self.simulations == Some(0) {
            bail!("at least one simulation must be run")
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            players_per_team: DEFAULT_PLAYERS_PER_TEAM,
            salary_cap: SalaryCap::default(),
            simulations: None,
            max_sweeps: DEFAULT_MAX_SWEEPS,
            seed: None,
            parallel: true,
        }
    }
}

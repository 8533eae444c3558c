//! The player catalog: identity, salary and selection probability of every player that may be
//! drafted into a lineup. Players are addressed by their index in load order.

use std::ops::Index;

use rustc_hash::FxHashMap;
use thiserror::Error;
use tracing::warn;

use crate::lineup::SalaryCap;

/// Upper bound on the work of the exhaustive feasibility check.
const MAX_FEASIBILITY_CELLS: u128 = 1 << 30;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    pub salary: u64,
    pub probability: Option<f64>,
}

#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("duplicate player '{name}' at index {index}, previously at {existing_index}")]
    DuplicatePlayer {
        name: String,
        index: usize,
        existing_index: usize,
    },

    #[error("no selection probability for player '{0}'")]
    MissingProbability(String),

    #[error("selection probability {probability} for player '{name}' must be in (0, 1]")]
    InvalidProbability { name: String, probability: f64 },

    #[error("no lineup of {players_per_team} distinct players fits the salary cap {salary_cap}")]
    Infeasible {
        players_per_team: usize,
        salary_cap: SalaryCap,
    },
}

#[derive(Debug, Clone, Default)]
pub struct Catalog {
    players: Vec<Player>,
    name_to_index: FxHashMap<String, usize>,
}
impl Catalog {
    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.name_to_index.get(name).copied()
    }

    pub fn name(&self, index: usize) -> &str {
        &self.players[index].name
    }

    pub fn salary(&self, index: usize) -> u64 {
        self.players[index].salary
    }

    pub fn probability(&self, index: usize) -> f64 {
        self.players[index].probability.unwrap_or_default()
    }

    /// Player indices in descending order of selection probability. Equal probabilities retain
    /// their load order.
    pub fn ranked_by_probability(&self) -> Vec<usize> {
        let mut ranked: Vec<_> = (0..self.players.len()).collect();
        ranked.sort_by(|&a, &b| self.probability(b).total_cmp(&self.probability(a)));
        ranked
    }

    /// Every player must carry a selection probability in `(0, 1]`, otherwise sampling may
    /// never complete a lineup.
    pub fn validate_probabilities(&self) -> Result<(), CatalogError> {
        for player in &self.players {
            match player.probability {
                None => return Err(CatalogError::MissingProbability(player.name.clone())),
                Some(probability) if !(probability > 0.0 && probability <= 1.0) => {
                    return Err(CatalogError::InvalidProbability {
                        name: player.name.clone(),
                        probability,
                    })
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    /// Verifies that at least one set of `players_per_team` distinct players has a total salary
    /// within the cap.
    pub fn validate_feasible(
        &self,
        players_per_team: usize,
        salary_cap: &SalaryCap,
    ) -> Result<(), CatalogError> {
        if self.is_feasible(players_per_team, salary_cap) {
            Ok(())
        } else {
            Err(CatalogError::Infeasible {
                players_per_team,
                salary_cap: salary_cap.clone(),
            })
        }
    }

    /// Whether some team of `players_per_team` distinct players totals a salary within the cap.
    ///
    /// Team totals range from the cheapest team to the dearest, and swapping one member at a time
    /// walks between the two in steps no larger than the salary spread, so any cap at least that
    /// wide and overlapping the range is met. Narrower caps fall back to a subset-sum over
    /// (team size, salary) in units of the salaries' greatest common divisor. A subset-sum too
    /// large to tabulate is assumed feasible; generation remains bounded by its sweep limit.
    pub fn is_feasible(&self, players_per_team: usize, salary_cap: &SalaryCap) -> bool {
        if players_per_team == 0
            || players_per_team > self.players.len()
            || salary_cap.min > salary_cap.max
        {
            return false;
        }
        let mut salaries: Vec<_> = self.players.iter().map(|player| player.salary).collect();
        salaries.sort_unstable();
        let total = |salaries: &[u64]| {
            salaries
                .iter()
                .fold(0u64, |sum, &salary| sum.saturating_add(salary))
        };
        let cheapest = total(&salaries[..players_per_team]);
        let dearest = total(&salaries[salaries.len() - players_per_team..]);
        if cheapest > salary_cap.max || dearest < salary_cap.min {
            return false;
        }
        let spread = salaries[salaries.len() - 1] - salaries[0];
        if salary_cap.contains(cheapest)
            || salary_cap.contains(dearest)
            || spread <= salary_cap.max - salary_cap.min
        {
            return true;
        }

        let unit = salaries.iter().fold(0, |divisor, &salary| gcd(divisor, salary)).max(1);
        let lower = salary_cap.min.max(cheapest).div_ceil(unit);
        let upper = salary_cap.max.min(dearest) / unit;
        if lower > upper {
            return false;
        }
        let cells = (upper as u128 + 1) * (players_per_team as u128 + 1) * salaries.len() as u128;
        if cells > MAX_FEASIBILITY_CELLS {
            warn!(
                "salary cap {salary_cap} too fine-grained to check for {players_per_team}-player teams; assuming feasible"
            );
            return true;
        }

        let upper = upper as usize;
        let mut reachable = vec![vec![false; upper + 1]; players_per_team + 1];
        reachable[0][0] = true;
        for &salary in &salaries {
            let salary = (salary / unit) as usize;
            if salary > upper {
                break;
            }
            for size in (1..=players_per_team).rev() {
                let (smaller, larger) = reachable.split_at_mut(size);
                let from = &smaller[size - 1];
                let to = &mut larger[0];
                for total in (salary..=upper).rev() {
                    if from[total - salary] {
                        to[total] = true;
                    }
                }
            }
        }
        reachable[players_per_team][lower as usize..=upper]
            .iter()
            .any(|&flag| flag)
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl TryFrom<Vec<Player>> for Catalog {
    type Error = CatalogError;

    fn try_from(players: Vec<Player>) -> Result<Self, Self::Error> {
        let mut name_to_index =
            FxHashMap::with_capacity_and_hasher(players.len(), Default::default());
        for (index, player) in players.iter().enumerate() {
            if let Some(&existing_index) = name_to_index.get(&player.name) {
                return Err(CatalogError::DuplicatePlayer {
                    name: player.name.clone(),
                    index,
                    existing_index,
                });
            }
            name_to_index.insert(player.name.clone(), index);
        }
        Ok(Self {
            players,
            name_to_index,
        })
    }
}

impl Index<usize> for Catalog {
    type Output = Player;

    fn index(&self, index: usize) -> &Self::Output {
        &self.players[index]
    }
}

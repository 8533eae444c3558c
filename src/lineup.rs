//! Lineups, the salary cap they must respect, and the builder used to assemble them.

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;

/// Inclusive bounds on a lineup's total salary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCap {
    pub min: u64,
    pub max: u64,
}
impl SalaryCap {
    pub fn contains(&self, salary: u64) -> bool {
        (self.min..=self.max).contains(&salary)
    }
}

impl Default for SalaryCap {
    fn default() -> Self {
        Self {
            min: 48_000,
            max: 50_000,
        }
    }
}

impl Display for SalaryCap {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..={}", self.min, self.max)
    }
}

/// A completed lineup. Members are catalog indices in ascending order of salary.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Lineup {
    members: Vec<usize>,
    salary: u64,
}
impl Lineup {
    pub fn members(&self) -> &[usize] {
        &self.members
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, player: usize) -> bool {
        self.members.contains(&player)
    }

    pub fn names<'a>(&'a self, catalog: &'a Catalog) -> impl Iterator<Item = &'a str> + 'a {
        self.members.iter().map(|&member| catalog.name(member))
    }
}

/// An in-progress lineup. Every addition yields a new builder; a discarded attempt is replaced
/// by [LineupBuilder::default] rather than cleared in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineupBuilder {
    members: Vec<usize>,
    salary: u64,
}
impl LineupBuilder {
    #[must_use]
    pub fn with_player(mut self, player: usize, salary: u64) -> Self {
        debug_assert!(!self.contains(player), "player {player} is already in the lineup");
        self.members.push(player);
        self.salary += salary;
        self
    }

    pub fn contains(&self, player: usize) -> bool {
        self.members.contains(&player)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn salary(&self) -> u64 {
        self.salary
    }

    /// Completes the lineup, ordering members by ascending salary. Equal salaries keep catalog
    /// order.
    pub fn build(self, catalog: &Catalog) -> Lineup {
        let mut members = self.members;
        members.sort_by_key(|&member| (catalog.salary(member), member));
        Lineup {
            members,
            salary: self.salary,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::catalog;

    use super::*;

    #[test]
    fn salary_cap_bounds_are_inclusive() {
        let cap = SalaryCap::default();
        assert!(!cap.contains(47_999));
        assert!(cap.contains(48_000));
        assert!(cap.contains(50_000));
        assert!(!cap.contains(50_001));
        assert_eq!("48000..=50000", cap.to_string());
    }

    #[test]
    fn builder_accumulates_salary() {
        let builder = LineupBuilder::default()
            .with_player(2, 20_000)
            .with_player(0, 10_000);
        assert_eq!(2, builder.len());
        assert_eq!(30_000, builder.salary());
        assert!(builder.contains(2));
        assert!(!builder.contains(1));
    }

    #[test]
    fn build_sorts_by_salary_then_catalog_order() {
        let catalog = catalog(&[
            ("A", 9_000, 0.5),
            ("B", 5_000, 0.5),
            ("C", 7_000, 0.5),
            ("D", 5_000, 0.5),
        ]);
        let lineup = [0, 3, 2, 1]
            .into_iter()
            .fold(LineupBuilder::default(), |builder, player| {
                builder.with_player(player, catalog.salary(player))
            })
            .build(&catalog);
        assert_eq!(&[1, 3, 2, 0], lineup.members());
        assert_eq!(26_000, lineup.salary());
        assert_eq!(
            vec!["B", "D", "C", "A"],
            lineup.names(&catalog).collect::<Vec<_>>()
        );
    }
}

//! Testing helpers.

use assert_float_eq::*;

use crate::catalog::{Catalog, Player};

pub fn assert_slice_f64_near(expected: &[f64], actual: &[f64], distance: u32) {
    assert_eq!(
        expected.len(),
        actual.len(),
        "lengths do not match: {} ≠ {}",
        expected.len(),
        actual.len()
    );
    for (index, &expected) in expected.iter().enumerate() {
        let actual = actual[index];
        if actual != expected {
            assert_f64_near!(expected, actual, distance);
        }
    }
}

pub fn player(name: &str, salary: u64, probability: f64) -> Player {
    Player {
        name: name.into(),
        salary,
        probability: Some(probability),
    }
}

pub fn catalog(players: &[(&str, u64, f64)]) -> Catalog {
    Catalog::try_from(
        players
            .iter()
            .map(|&(name, salary, probability)| player(name, salary, probability))
            .collect::<Vec<_>>(),
    )
    .unwrap()
}

/// Ten players whose salaries make every six-player lineup between 48,000 and 50,000 easy to hit.
pub fn ten_player_catalog() -> Catalog {
    catalog(&[
        ("Ada", 9_800, 0.9),
        ("Bea", 9_400, 0.8),
        ("Cal", 8_900, 0.75),
        ("Dee", 8_600, 0.7),
        ("Eli", 8_200, 0.6),
        ("Fay", 7_900, 0.55),
        ("Gus", 7_600, 0.5),
        ("Hal", 7_100, 0.4),
        ("Ivy", 6_800, 0.3),
        ("Jon", 6_300, 0.2),
    ])
}

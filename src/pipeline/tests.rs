use std::env;

use tinyrand::{Seeded, StdRand};

use crate::probs::random_f64;
use crate::scenario::{SchemaMismatch, SimulationRow};
use crate::testing::ten_player_catalog;

use super::*;

const SCENARIOS: usize = 300;

fn simulations(catalog: &Catalog, seed: u64) -> SimulationTable {
    let mut rand = StdRand::seed(seed);
    SimulationTable {
        scenario_labels: (0..SCENARIOS).map(|scenario| scenario.to_string()).collect(),
        rows: catalog
            .players()
            .iter()
            .map(|player| SimulationRow {
                player: player.name.clone(),
                values: (0..SCENARIOS)
                    .map(|_| (random_f64(&mut rand) * 30.0).round())
                    .collect(),
            })
            .collect(),
    }
}

fn payouts() -> PayoutSchedule {
    PayoutSchedule::new(vec![
        1000.0, 500.0, 250.0, 100.0, 50.0, 40.0, 30.0, 20.0, 10.0, 5.0,
    ])
    .unwrap()
}

fn inputs() -> Inputs {
    let catalog = ten_player_catalog();
    let simulations = simulations(&catalog, 17);
    Inputs {
        catalog,
        simulations,
        payouts: payouts(),
    }
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("lineupsim-{}-{name}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn end_to_end() {
    let inputs = inputs();
    let config = Config::default();
    let outcome = Pipeline::new(&config)
        .run(&inputs, 20, &mut StdRand::seed(42))
        .unwrap();

    assert_eq!(20, outcome.lineups.len());
    assert_eq!(20, outcome.evaluations.len());
    assert_eq!(SCENARIOS as u64, outcome.histogram.trials());
    for lineup in &outcome.lineups {
        assert_eq!(6, lineup.len());
        assert!(config.salary_cap.contains(lineup.salary()));
    }
    assert!(outcome
        .evaluations
        .windows(2)
        .all(|pair| pair[0].expected_value >= pair[1].expected_value));
    for evaluation in &outcome.evaluations {
        assert!(evaluation.expected_value >= 5.0 - 1e-9, "{evaluation:?}");
        assert!(evaluation.expected_value <= 1000.0 + 1e-9, "{evaluation:?}");
        assert_eq!(6, evaluation.members.len());
    }

    let total_probability: f64 = outcome.probabilities.iter().sum();
    assert!((total_probability - 6.0).abs() < 1e-9, "{total_probability}");
}

#[test]
fn parallel_and_sequential_agree() {
    let inputs = inputs();
    let parallel = Config::default();
    let sequential = Config {
        parallel: false,
        ..Config::default()
    };
    let first = Pipeline::new(&parallel)
        .run(&inputs, 15, &mut StdRand::seed(5))
        .unwrap();
    let second = Pipeline::new(&sequential)
        .run(&inputs, 15, &mut StdRand::seed(5))
        .unwrap();
    assert_eq!(first.lineups, second.lineups);
    assert_eq!(first.histogram, second.histogram);
    assert_eq!(first.evaluations, second.evaluations);
}

#[test]
fn limited_simulations() {
    let inputs = inputs();
    let config = Config {
        simulations: Some(50),
        ..Config::default()
    };
    let outcome = Pipeline::new(&config)
        .run(&inputs, 5, &mut StdRand::seed(1))
        .unwrap();
    assert_eq!(50, outcome.histogram.trials());
}

#[test]
fn schema_mismatch() {
    let mut inputs = inputs();
    inputs.simulations.rows.remove(3);
    inputs.simulations.rows[0].player = "Zed".into();
    let err = Pipeline::new(&Config::default())
        .run(&inputs, 5, &mut StdRand::seed(1))
        .unwrap_err();
    let PipelineError::SchemaMismatch(ScenarioError::SchemaMismatch(mismatch)) = err else {
        panic!("unexpected {err:?}");
    };
    assert_eq!(
        SchemaMismatch {
            missing: vec!["Ada".into(), "Dee".into()],
            extra: vec!["Zed".into()],
            duplicated: vec![],
        },
        mismatch
    );
}

#[test]
fn precondition_violation() {
    let inputs = inputs();
    let config = Config {
        salary_cap: crate::lineup::SalaryCap {
            min: 60_000,
            max: 70_000,
        },
        ..Config::default()
    };
    let err = Pipeline::new(&config)
        .run(&inputs, 5, &mut StdRand::seed(1))
        .unwrap_err();
    assert!(matches!(err, PipelineError::PreconditionViolation(_)), "{err:?}");
}

#[test]
fn input_unavailable() {
    let dir = scratch_dir("missing");
    let err = Inputs::read(
        dir.join("players.csv"),
        dir.join("simulations.csv"),
        dir.join("payouts.csv"),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::InputUnavailable { .. }), "{err:?}");
    assert!(err.to_string().contains("players.csv"), "{err}");
}

#[test]
fn round_trip_through_files() {
    let dir = scratch_dir("files");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("players.csv"),
        "Name,Salary,probabilities\nA,10000,0.9\nB,15000,0.5\nC,20000,0.1\n",
    )
    .unwrap();
    fs::write(
        dir.join("simulations.csv"),
        "player_name,0,1,2,3\nC,9,1,1,5\nA,1,5,2,5\nB,2,1,8,5\n",
    )
    .unwrap();
    fs::write(
        dir.join("payouts.csv"),
        "lineup_rank,associated_payout\n1,100\n2,10\n",
    )
    .unwrap();

    let inputs = Inputs::read(
        dir.join("players.csv"),
        dir.join("simulations.csv"),
        dir.join("payouts.csv"),
    )
    .unwrap();
    let config = Config {
        players_per_team: 2,
        salary_cap: crate::lineup::SalaryCap { min: 0, max: 30_000 },
        ..Config::default()
    };
    let outcome = Pipeline::new(&config)
        .run(&inputs, 4, &mut StdRand::seed(9))
        .unwrap();
    for lineup in &outcome.lineups {
        assert!(lineup.salary() <= 30_000);
    }

    let out_dir = dir.join("out");
    write_outputs(&out_dir, &inputs.catalog, &outcome).unwrap();

    let probabilities = fs::read_to_string(out_dir.join(PROBABILITIES_FILE)).unwrap();
    let lines: Vec<_> = probabilities.lines().collect();
    assert_eq!("Name,probabilities", lines[0]);
    assert_eq!(4, lines.len());
    assert_eq!("A,1", lines[1]);

    let results = fs::read_to_string(out_dir.join(RESULTS_FILE)).unwrap();
    let lines: Vec<_> = results.lines().collect();
    assert_eq!("LineupMembers,LineupSalary,ExpectedValue", lines[0]);
    assert_eq!(5, lines.len());
    assert!(lines[1].starts_with(r#""[""A"","#), "{}", lines[1]);

    fs::remove_dir_all(&dir).unwrap();
}

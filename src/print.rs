//! Console tables summarising a run.

use stanza::style::{HAlign, Header, MinWidth, Separator, Styles};
use stanza::table::{Col, Row, Table};

use crate::catalog::Catalog;
use crate::evaluation::Evaluation;
use crate::payout::PayoutSchedule;

/// The top `limit` evaluations, best first.
pub fn tabulate_evaluations(evaluations: &[Evaluation], limit: usize) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(4)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(40)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(14)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "#".into(),
                "Lineup".into(),
                "Salary".into(),
                "Expected value".into(),
            ],
        ));
    for (index, evaluation) in evaluations.iter().take(limit).enumerate() {
        table.push_row(Row::new(
            Styles::default(),
            vec![
                format!("{}", index + 1).into(),
                evaluation.members.join(", ").into(),
                format!("{}", evaluation.salary).into(),
                format!("{:.3}", evaluation.expected_value).into(),
            ],
        ));
    }
    table
}

/// Loaded selection probabilities alongside their re-estimated frequencies.
pub fn tabulate_probabilities(catalog: &Catalog, reestimated: &[f64]) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(20)).with(HAlign::Left)),
            Col::new(Styles::default().with(MinWidth(8)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(12)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec![
                "Player".into(),
                "Salary".into(),
                "Loaded".into(),
                "Re-estimated".into(),
            ],
        ));
    for (player, &probability) in catalog.players().iter().zip(reestimated) {
        let loaded = player
            .probability
            .map(|probability| format!("{probability:.3}"))
            .unwrap_or_default();
        table.push_row(Row::new(
            Styles::default(),
            vec![
                player.name.clone().into(),
                format!("{}", player.salary).into(),
                loaded.into(),
                format!("{probability:.3}").into(),
            ],
        ));
    }
    table
}

/// Explicit payouts, with the last row standing for every rank beyond the schedule.
pub fn tabulate_payouts(payouts: &PayoutSchedule) -> Table {
    let mut table = Table::default()
        .with_cols(vec![
            Col::new(Styles::default().with(MinWidth(6)).with(HAlign::Right)),
            Col::new(Styles::default().with(MinWidth(10)).with(HAlign::Right)),
        ])
        .with_row(Row::new(
            Styles::default().with(Header(true)).with(Separator(true)),
            vec!["Rank".into(), "Payout".into()],
        ));
    let last = payouts.len();
    for (index, payout) in payouts.payouts().iter().enumerate() {
        let rank = index + 1;
        let label = if rank == last {
            format!("{}+", ordinal(rank))
        } else {
            ordinal(rank)
        };
        table.push_row(Row::new(
            Styles::default(),
            vec![label.into(), format!("{payout:.2}").into()],
        ));
    }
    table
}

/// English ordinal of `rank`, e.g. `2nd` or `13th`.
fn ordinal(rank: usize) -> String {
    let suffix = match (rank % 10, rank % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{rank}{suffix}")
}

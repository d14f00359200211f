//! Per-leg and per-control split analysis.
//!
//! Leg times are differences of consecutive cumulative split times, with the
//! finish treated as one more control. Ranking at each control index uses the
//! same canonical routine as the overall ranking, scoped to that single leg
//! (fastest leg) and, independently, to the cumulative time (who was leading the
//! race at that point). A missing endpoint makes the affected figure `None`;
//! nothing here panics on short or malformed split sequences.

use serde::Serialize;

use crate::deviation::LossSeverity;
use crate::rank::rank_by_key;
use crate::types::{CompetitorRecord, Seconds};

/// Derived figures for one competitor at one control index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct LegFigures {
    /// Time spent on this leg alone.
    pub leg_time: Option<Seconds>,
    /// Rank among competitors with a leg time at this control.
    pub leg_position: Option<u32>,
    /// Gap to the fastest leg time at this control; `0` for the fastest.
    pub leg_loss: Option<Seconds>,
    /// Cumulative time from the start to this control.
    pub split_time: Option<Seconds>,
    /// Rank by cumulative time at this control.
    pub split_position: Option<u32>,
    /// How anomalous this leg's loss is against the competitor's own pattern;
    /// attached by the deviation pass.
    pub severity: LossSeverity,
}

/// Number of control indices the field implies: the longest split sequence
/// plus the finish leg.
pub(crate) fn leg_count(records: &[CompetitorRecord]) -> usize {
    records.iter().map(|r| r.splits.len()).max().unwrap_or(0) + 1
}

/// Cumulative time at `index`, with the finish as the last pseudo-control.
fn cumulative_at(record: &CompetitorRecord, index: usize, legs: usize) -> Option<Seconds> {
    if index + 1 == legs { record.time } else { record.splits.get(index).map(|s| s.cumulative) }
}

/// Leg time at `index`: this control's cumulative minus the previous one.
///
/// `None` when either endpoint is missing, or when the feed violates
/// monotonicity and the difference would go negative.
fn leg_time(record: &CompetitorRecord, index: usize, legs: usize) -> Option<Seconds> {
    let here = cumulative_at(record, index, legs)?;
    if index == 0 {
        Some(here)
    } else {
        let prev = cumulative_at(record, index - 1, legs)?;
        here.checked_sub(prev)
    }
}

/// Compute the full leg-figure grid, one row per input record (input order),
/// one entry per control index including the finish leg.
pub fn analyze(records: &[CompetitorRecord]) -> Vec<Vec<LegFigures>> {
    let legs = leg_count(records);
    let mut grid: Vec<Vec<LegFigures>> =
        records.iter().map(|_| vec![LegFigures::default(); legs]).collect();

    for index in 0..legs {
        let leg_entries = records
            .iter()
            .enumerate()
            .filter_map(|(row, r)| leg_time(r, index, legs).map(|t| (row, t)));
        for entry in rank_by_key(leg_entries) {
            let figures = &mut grid[entry.index][index];
            figures.leg_time = Some(entry.key);
            figures.leg_position = Some(entry.position);
            figures.leg_loss = Some(entry.loss);
        }

        let cumulative_entries = records
            .iter()
            .enumerate()
            .filter_map(|(row, r)| cumulative_at(r, index, legs).map(|t| (row, t)));
        for entry in rank_by_key(cumulative_entries) {
            let figures = &mut grid[entry.index][index];
            figures.split_time = Some(entry.key);
            figures.split_position = Some(entry.position);
        }
    }

    grid
}

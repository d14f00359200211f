//! Overall ranking with competition ("skip") tie handling.
//!
//! One canonical routine ([`rank_by_key`]) implements the tie rule for every
//! ranking scope in the engine: overall, per-leg, per-control cumulative, and
//! class-scoped club views all call it rather than carrying their own copies.
//! Ties share a position and consume rank slots, so the next distinct key's
//! position equals one plus the number of entries ranked strictly above it.

use serde::Serialize;

use crate::types::{CompetitorRecord, Seconds};

/// Position information derived for one competitor.
///
/// A competitor is `Ranked` if and only if their status is the fully-ranked one
/// and a measured time exists; everyone else carries the status glyph shown in
/// place of a number. `loss` is the gap to the leader and is `0` for the leader
/// and anyone tied with them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum Placement {
    Ranked { position: u32, loss: Seconds },
    Unranked { glyph: String, tooltip: String },
}

impl Placement {
    pub fn is_ranked(&self) -> bool {
        matches!(self, Placement::Ranked { .. })
    }

    /// Numeric position, when ranked.
    pub fn position(&self) -> Option<u32> {
        match self {
            Placement::Ranked { position, .. } => Some(*position),
            Placement::Unranked { .. } => None,
        }
    }

    /// Loss to the scope leader, when ranked.
    pub fn loss(&self) -> Option<Seconds> {
        match self {
            Placement::Ranked { loss, .. } => Some(*loss),
            Placement::Unranked { .. } => None,
        }
    }
}

/// A competitor annotated with its overall placement, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct RankedCompetitor {
    #[serde(flatten)]
    pub record: CompetitorRecord,
    pub placement: Placement,
}

/// One entry produced by [`rank_by_key`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RankedEntry {
    /// Caller-supplied handle, usually an index into the input slice.
    pub index: usize,
    pub key: Seconds,
    pub position: u32,
    /// Key minus the best key in the set.
    pub loss: Seconds,
}

/// Canonical competition ranking over `(handle, key)` pairs.
///
/// Sorts ascending by key (stable, so equal keys keep input order), assigns
/// position 1, 2, 3, ... reusing the previous position whenever the key equals
/// the immediately preceding one, and computes loss against the best key.
pub(crate) fn rank_by_key(entries: impl IntoIterator<Item = (usize, Seconds)>) -> Vec<RankedEntry> {
    let mut sorted: Vec<(usize, Seconds)> = entries.into_iter().collect();
    sorted.sort_by_key(|&(_, key)| key);

    let mut out: Vec<RankedEntry> = Vec::with_capacity(sorted.len());
    let best = match sorted.first() {
        Some(&(_, key)) => key,
        None => return out,
    };

    for (i, &(index, key)) in sorted.iter().enumerate() {
        let position = match out.last() {
            Some(prev) if prev.key == key => prev.position,
            _ => i as u32 + 1,
        };
        out.push(RankedEntry { index, key, position, loss: key - best });
    }
    out
}

/// Placement for every record, aligned with the input order.
///
/// Rankable records (fully-ranked status with a time) get positions from
/// [`rank_by_key`]; everyone else gets their status glyph and tooltip.
pub(crate) fn placements(records: &[CompetitorRecord]) -> Vec<Placement> {
    let ranked = rank_by_key(
        records
            .iter()
            .enumerate()
            .filter(|(_, r)| r.status.is_rankable())
            .filter_map(|(i, r)| r.time.map(|t| (i, t))),
    );

    let mut out: Vec<Placement> = records
        .iter()
        .map(|r| {
            let info = r.status.info();
            Placement::Unranked { glyph: info.glyph.to_string(), tooltip: info.tooltip.to_string() }
        })
        .collect();
    for entry in ranked {
        out[entry.index] = Placement::Ranked { position: entry.position, loss: entry.loss };
    }
    out
}

/// Display ordering permutation over the input records.
///
/// Ranked competitors come first in position order; the rest follow by status
/// priority, then start time ascending with missing start times last. Stable
/// within equal keys.
pub(crate) fn display_order(records: &[CompetitorRecord], placements: &[Placement]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by_key(|&i| match placements[i].position() {
        Some(position) => (0u8, position, 0u8, 0u32),
        None => {
            let record = &records[i];
            (1, 0, record.status.priority(), record.start_time.unwrap_or(u32::MAX))
        }
    });
    order
}

/// Compute overall positions and losses, returning annotated records in
/// display order.
pub fn rank(records: &[CompetitorRecord]) -> Vec<RankedCompetitor> {
    let placements = placements(records);
    display_order(records, &placements)
        .into_iter()
        .map(|i| RankedCompetitor { record: records[i].clone(), placement: placements[i].clone() })
        .collect()
}

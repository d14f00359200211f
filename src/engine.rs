//! Snapshot computation pipeline.
//!
//! `compute` is the §-by-§ data flow of the engine as one pure function:
//! status-aware overall ranking, leg/split figures, self-relative deviation
//! severities, assembled into a display-ordered [`ComputedSnapshot`]. Running it
//! twice on the same snapshot yields identical output; nothing is carried over
//! between calls.

use serde::Serialize;
use std::collections::HashSet;

use crate::deviation::{self, LossStats};
use crate::error::{EngineError, Result};
use crate::rank::{self, Placement};
use crate::splits::{self, LegFigures};
use crate::types::{CompetitorId, CompetitorRecord, Snapshot, SnapshotScope};

/// One competitor with every derived figure attached.
///
/// `PartialEq` compares the full computed row; the change reconciler relies on
/// that to decide whether a competitor's presentation changed between snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct ComputedCompetitor {
    #[serde(flatten)]
    pub record: CompetitorRecord,
    pub placement: Placement,
    /// One entry per control index, finish leg included.
    pub legs: Vec<LegFigures>,
    pub stats: LossStats,
}

/// A fully computed snapshot, competitors in display order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct ComputedSnapshot {
    pub scope: SnapshotScope,
    /// Control indices per competitor row, finish leg included.
    pub leg_count: usize,
    pub competitors: Vec<ComputedCompetitor>,
}

impl ComputedSnapshot {
    /// Look up a computed row by competitor id.
    pub fn competitor(&self, id: &CompetitorId) -> Option<&ComputedCompetitor> {
        self.competitors.iter().find(|c| &c.record.id == id)
    }

    /// The club view of this snapshot: organisations with class-scoped
    /// placements, see [`crate::group::group_by_organisation`].
    pub fn grouped(&self) -> Vec<crate::group::OrganisationGroup> {
        let records: Vec<_> = self.competitors.iter().map(|c| c.record.clone()).collect();
        crate::group::group_by_organisation(&records)
    }
}

/// Run the full computation over one snapshot.
///
/// # Preconditions
///
/// Competitor ids must be unique within the snapshot; identity is what change
/// detection and club aggregation match on. A duplicate id returns
/// [`EngineError::DuplicateCompetitorId`] rather than silently picking one row.
pub fn compute(snapshot: &Snapshot) -> Result<ComputedSnapshot> {
    let records = &snapshot.competitors;

    let mut seen: HashSet<&CompetitorId> = HashSet::with_capacity(records.len());
    for record in records {
        if !seen.insert(&record.id) {
            return Err(EngineError::DuplicateCompetitorId { id: record.id.clone() });
        }
    }

    let placements = rank::placements(records);
    let order = rank::display_order(records, &placements);
    let mut grid = splits::analyze(records);

    let stats: Vec<LossStats> = grid.iter().map(|row| deviation::loss_stats(row)).collect();
    for (row, stats) in grid.iter_mut().zip(&stats) {
        for figures in row.iter_mut() {
            if let Some(loss) = figures.leg_loss {
                figures.severity = stats.classify(loss);
            }
        }
    }

    let competitors = order
        .into_iter()
        .map(|i| ComputedCompetitor {
            record: records[i].clone(),
            placement: placements[i].clone(),
            legs: std::mem::take(&mut grid[i]),
            stats: stats[i],
        })
        .collect();

    Ok(ComputedSnapshot {
        scope: snapshot.scope.clone(),
        leg_count: splits::leg_count(records),
        competitors,
    })
}

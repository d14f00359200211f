//! Club and class aggregation.
//!
//! Groups a field by organisation, recomputing every member's position and loss
//! within their own class (not against the whole field) using the canonical
//! ranking routine. Each organisation's members are partitioned into contiguous
//! class-name blocks in class-name order, and organisations are ordered by the
//! best class-scoped position among their ranked members.

use serde::Serialize;
use std::collections::HashMap;

use crate::rank::{Placement, RankedCompetitor, rank_by_key};
use crate::types::CompetitorRecord;

/// A contiguous run of one organisation's competitors in the same class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct ClassBlock {
    pub class: String,
    pub members: Vec<RankedCompetitor>,
}

/// One organisation with its competitors, class-scoped placements recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct OrganisationGroup {
    pub organisation: String,
    /// Best (lowest) class-scoped position among ranked members, if any.
    pub best_position: Option<u32>,
    pub blocks: Vec<ClassBlock>,
}

/// Placement for every record, ranked only against same-class peers.
fn class_scoped_placements(records: &[CompetitorRecord]) -> Vec<Placement> {
    let mut by_class: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        by_class.entry(record.class_label()).or_default().push(i);
    }

    let mut out: Vec<Placement> = records
        .iter()
        .map(|r| {
            let info = r.status.info();
            Placement::Unranked { glyph: info.glyph.to_string(), tooltip: info.tooltip.to_string() }
        })
        .collect();

    for indices in by_class.values() {
        let ranked = rank_by_key(indices.iter().filter_map(|&i| {
            let record = &records[i];
            if record.status.is_rankable() { record.time.map(|t| (i, t)) } else { None }
        }));
        for entry in ranked {
            out[entry.index] = Placement::Ranked { position: entry.position, loss: entry.loss };
        }
    }
    out
}

/// Group the field by organisation per the club view rules.
pub fn group_by_organisation(records: &[CompetitorRecord]) -> Vec<OrganisationGroup> {
    let placements = class_scoped_placements(records);

    // First-appearance order keeps the grouping deterministic before the
    // best-position sort below.
    let mut organisations: Vec<&str> = Vec::new();
    let mut members: HashMap<&str, Vec<usize>> = HashMap::new();
    for (i, record) in records.iter().enumerate() {
        let entry = members.entry(record.organisation.as_str()).or_default();
        if entry.is_empty() {
            organisations.push(&record.organisation);
        }
        entry.push(i);
    }

    let mut groups: Vec<OrganisationGroup> = organisations
        .into_iter()
        .map(|organisation| {
            let mut indices = members.remove(organisation).unwrap_or_default();
            indices.sort_by_key(|&i| {
                let record = &records[i];
                (
                    record.class_label().to_string(),
                    record.status.priority(),
                    placements[i].position().unwrap_or(u32::MAX),
                    record.start_time.unwrap_or(u32::MAX),
                )
            });

            let best_position =
                indices.iter().filter_map(|&i| placements[i].position()).min();

            // Class transitions only: the indices are already class-sorted, so
            // blocks are contiguous runs of equal labels.
            let mut blocks: Vec<ClassBlock> = Vec::new();
            for &i in &indices {
                let label = records[i].class_label();
                let member = RankedCompetitor {
                    record: records[i].clone(),
                    placement: placements[i].clone(),
                };
                match blocks.last_mut() {
                    Some(block) if block.class == label => block.members.push(member),
                    _ => blocks
                        .push(ClassBlock { class: label.to_string(), members: vec![member] }),
                }
            }

            OrganisationGroup { organisation: organisation.to_string(), best_position, blocks }
        })
        .collect();

    groups.sort_by_key(|g| g.best_position.unwrap_or(u32::MAX));
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{finisher, in_class, runner};
    use crate::types::CompetitorStatus;

    #[test]
    fn positions_are_recomputed_within_the_class() {
        let field = vec![
            in_class(finisher("a", "Alpha", 100), "M21"),
            in_class(finisher("b", "Beta", 110), "M21"),
            // Slowest raw time of all, but the only W21 finisher in the field.
            in_class(finisher("c", "Beta", 500), "W21"),
        ];
        let groups = group_by_organisation(&field);

        let beta = groups.iter().find(|g| g.organisation == "Beta").unwrap();
        let w21 = beta.blocks.iter().find(|b| b.class == "W21").unwrap();
        assert_eq!(w21.members[0].placement.position(), Some(1));
        assert_eq!(w21.members[0].placement.loss(), Some(0));

        let m21 = beta.blocks.iter().find(|b| b.class == "M21").unwrap();
        assert_eq!(m21.members[0].placement, Placement::Ranked { position: 2, loss: 10 });
    }

    #[test]
    fn blocks_are_contiguous_and_in_class_name_order() {
        let field = vec![
            in_class(finisher("a", "Alpha", 100), "W21"),
            in_class(finisher("b", "Alpha", 120), "M21"),
            in_class(finisher("c", "Alpha", 130), "W21"),
            in_class(finisher("d", "Alpha", 90), "M21"),
        ];
        let groups = group_by_organisation(&field);
        let classes: Vec<_> = groups[0].blocks.iter().map(|b| b.class.as_str()).collect();
        assert_eq!(classes, vec!["M21", "W21"], "one block per class, name order");
        assert_eq!(groups[0].blocks[0].members.len(), 2);
        assert_eq!(groups[0].blocks[1].members.len(), 2);
    }

    #[test]
    fn organisations_order_by_best_position_unranked_last() {
        let field = vec![
            in_class(finisher("a", "Alpha", 200), "M21"),
            in_class(finisher("b", "Beta", 100), "M21"),
            in_class(runner("c", "Gamma", CompetitorStatus::MisPunch), "M21"),
        ];
        let groups = group_by_organisation(&field);
        let names: Vec<_> = groups.iter().map(|g| g.organisation.as_str()).collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
        assert_eq!(groups[0].best_position, Some(1));
        assert_eq!(groups[2].best_position, None);
    }

    #[test]
    fn within_a_block_ranked_precede_unranked_by_start_time() {
        let mut active = in_class(runner("x", "Alpha", CompetitorStatus::Active), "M21");
        active.start_time = Some(500);
        let mut dnf = in_class(runner("y", "Alpha", CompetitorStatus::DidNotFinish), "M21");
        dnf.start_time = Some(100);
        let field = vec![
            active,
            dnf,
            in_class(finisher("slow", "Alpha", 300), "M21"),
            in_class(finisher("fast", "Alpha", 100), "M21"),
        ];
        let groups = group_by_organisation(&field);
        let ids: Vec<_> =
            groups[0].blocks[0].members.iter().map(|m| m.record.id.to_string()).collect();
        assert_eq!(ids, vec!["fast", "slow", "x", "y"]);
    }

    #[test]
    fn empty_field_groups_to_nothing() {
        assert!(group_by_organisation(&[]).is_empty());
    }
}

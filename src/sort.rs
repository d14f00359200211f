//! Stable, direction-aware sorting of computed rows.
//!
//! Rows without a value for the chosen key (glyph-only positions, unpunched
//! legs) sort last regardless of direction: the direction toggle only reverses
//! ordering among rows that have a value. Implemented in the comparator rather
//! than by negating a sentinel, which would send missing rows to the front on a
//! descending sort.

use std::cmp::Ordering;

use crate::engine::ComputedCompetitor;
use crate::types::{SortDirection, SortKey};

/// Extract the sortable value of `row` under `key`, when it has one.
fn value(row: &ComputedCompetitor, key: SortKey) -> Option<u64> {
    match key {
        SortKey::Position => row.placement.position().map(u64::from),
        SortKey::Time => row.record.time.map(u64::from),
        SortKey::Loss => row.placement.loss().map(u64::from),
        SortKey::FinalLeg => row.legs.last().and_then(|f| f.leg_time).map(u64::from),
        SortKey::Leg(index) => row.legs.get(index).and_then(|f| f.leg_time).map(u64::from),
        SortKey::Split(index) => row.legs.get(index).and_then(|f| f.split_time).map(u64::from),
    }
}

/// Reorder `rows` by `key` in the given direction.
///
/// Stable: rows that compare equal under the key keep their relative order.
pub fn sort_rows(rows: &mut [ComputedCompetitor], key: SortKey, direction: SortDirection) {
    rows.sort_by(|a, b| match (value(a, key), value(b, key)) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => match direction {
            SortDirection::Ascending => a.cmp(&b),
            SortDirection::Descending => b.cmp(&a),
        },
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute;
    use crate::test_utils::{class_snapshot, finisher, runner, with_splits};
    use crate::types::CompetitorStatus;

    fn ids(rows: &[ComputedCompetitor]) -> Vec<String> {
        rows.iter().map(|r| r.record.id.to_string()).collect()
    }

    fn sample_rows() -> Vec<ComputedCompetitor> {
        let snapshot = class_snapshot(vec![
            with_splits(finisher("a", "Club", 100), &[30, 70]),
            with_splits(finisher("b", "Club", 110), &[50, 60]),
            // No leg times at all, no position.
            runner("c", "Club", CompetitorStatus::MisPunch),
        ]);
        compute(&snapshot).unwrap().competitors
    }

    #[test]
    fn missing_values_sort_last_in_both_directions() {
        let mut rows = sample_rows();

        sort_rows(&mut rows, SortKey::Leg(0), SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["b", "a", "c"], "missing leg must not jump to the front");

        sort_rows(&mut rows, SortKey::Leg(0), SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["a", "b", "c"]);
    }

    #[test]
    fn position_and_loss_sorts_put_the_leader_first() {
        let mut rows = sample_rows();

        sort_rows(&mut rows, SortKey::Position, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["a", "b", "c"]);

        // The leader's loss is 0, which must still beat the glyph-only row.
        sort_rows(&mut rows, SortKey::Loss, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["a", "b", "c"]);
    }

    #[test]
    fn final_leg_is_the_synthetic_last_index() {
        let mut rows = sample_rows();
        // Final legs: a = 100 - 70 = 30, b = 110 - 60 = 50.
        sort_rows(&mut rows, SortKey::FinalLeg, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["b", "a", "c"]);
    }

    #[test]
    fn split_key_orders_by_cumulative_time() {
        let mut rows = sample_rows();
        sort_rows(&mut rows, SortKey::Split(1), SortDirection::Ascending);
        // Cumulative at control 1: b = 60, a = 70.
        assert_eq!(ids(&rows), vec!["b", "a", "c"]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let snapshot = class_snapshot(vec![
            finisher("first", "Club", 100),
            finisher("second", "Club", 100),
            finisher("third", "Club", 100),
        ]);
        let mut rows = compute(&snapshot).unwrap().competitors;
        let before = ids(&rows);

        sort_rows(&mut rows, SortKey::Time, SortDirection::Descending);
        assert_eq!(ids(&rows), before, "stable sort must keep tied rows in place");
    }

    #[test]
    fn out_of_range_leg_index_treats_every_row_as_missing() {
        let mut rows = sample_rows();
        let before = ids(&rows);
        sort_rows(&mut rows, SortKey::Leg(99), SortDirection::Ascending);
        assert_eq!(ids(&rows), before);
    }
}

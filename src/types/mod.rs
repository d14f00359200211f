//! Core types for race result data.
//!
//! This module holds the input side of the engine: competitor records as the
//! live feed delivers them, the status classification table, and the sort-key
//! tokens a rendering layer uses to reorder computed collections.
//!
//! Derived view models live next to the passes that produce them
//! ([`rank`](crate::rank), [`splits`](crate::splits), [`group`](crate::group),
//! [`engine`](crate::engine)).

mod competitor;
mod sort_key;
mod status;

pub use competitor::{
    CompetitorId, CompetitorRecord, Seconds, Snapshot, SnapshotScope, SplitRecord,
};
pub use sort_key::{SortDirection, SortKey};
pub use status::{CompetitorStatus, StatusInfo};

//! Competitor records and snapshots delivered by the live feed.
//!
//! A snapshot is a complete, authoritative replacement for its scope (one class,
//! one club, or one event); the engine never reconciles partial updates. Records
//! arrive in feed order and carry camelCase field names on the wire.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::status::CompetitorStatus;

/// Elapsed whole seconds. Integer comparison keeps tie detection exact.
pub type Seconds = u32;

/// Stable competitor identity, unique within one snapshot scope.
///
/// Identity is load-bearing: change detection and club aggregation match rows
/// across snapshots by this value alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(transparent)]
pub struct CompetitorId(pub String);

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CompetitorId {
    fn from(value: &str) -> Self {
        CompetitorId(value.to_string())
    }
}

impl From<String> for CompetitorId {
    fn from(value: String) -> Self {
        CompetitorId(value)
    }
}

/// One punched control: code plus cumulative time from the start.
///
/// Cumulative times are non-decreasing along the sequence, and the control
/// ordering is identical and positionally aligned across all competitors of a
/// class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct SplitRecord {
    /// Control code as printed on the course.
    pub control: String,
    /// Elapsed seconds from start to this control.
    pub cumulative: Seconds,
}

/// One competitor row as delivered by the feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct CompetitorRecord {
    pub id: CompetitorId,
    pub name: String,
    pub organisation: String,
    pub status: CompetitorStatus,
    /// Start timestamp in seconds-of-day, when known.
    #[serde(default)]
    pub start_time: Option<Seconds>,
    /// Finish timestamp in seconds-of-day, when known.
    #[serde(default)]
    pub finish_time: Option<Seconds>,
    /// Measured elapsed time; present only for terminal statuses with a result.
    #[serde(default)]
    pub time: Option<Seconds>,
    /// Ordered cumulative split times.
    #[serde(default)]
    pub splits: Vec<SplitRecord>,
    /// Class membership for cross-class views.
    #[serde(default)]
    pub class_id: Option<String>,
    #[serde(default)]
    pub class_name: Option<String>,
}

impl CompetitorRecord {
    /// Class label used for grouping: class name when present, else class id.
    pub fn class_label(&self) -> &str {
        self.class_name.as_deref().or(self.class_id.as_deref()).unwrap_or("")
    }
}

/// The view a snapshot is scoped to. A scope change invalidates any carried-over
/// change-detection state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase", tag = "kind", content = "name")]
pub enum SnapshotScope {
    Class(String),
    Organisation(String),
    Event(String),
}

/// A full replacement set of competitor records for one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub scope: SnapshotScope,
    pub competitors: Vec<CompetitorRecord>,
}

impl Snapshot {
    /// Create a snapshot for the given scope.
    pub fn new(scope: SnapshotScope, competitors: Vec<CompetitorRecord>) -> Self {
        Self { scope, competitors }
    }
}

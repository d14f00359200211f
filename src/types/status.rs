//! Race status classification.
//!
//! Statuses form a small closed set, so classification is a lookup table rather
//! than open polymorphism: every status maps to a fixed sort priority and, for
//! the non-ranked ones, a display glyph + tooltip shown in place of a position.

use serde::{Deserialize, Serialize};

/// Race status reported by the feed for a competitor.
///
/// `Ok` is the single fully-ranked status: only competitors with status `Ok`
/// and a measured time receive a numeric position. Feed tokens outside the
/// known set deserialize to [`CompetitorStatus::Unknown`] instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "tauri", derive(specta::Type))]
#[serde(rename_all = "camelCase")]
pub enum CompetitorStatus {
    /// Finished with an approved result.
    Ok,
    /// Started and still out on the course.
    Active,
    /// Punched controls out of order or missed one.
    MisPunch,
    DidNotFinish,
    /// Exceeded the maximum allowed time.
    OverTime,
    Disqualified,
    DidNotStart,
    /// Running outside the competition.
    NotCompeting,
    /// Fallback for status tokens this engine does not recognize.
    #[serde(other)]
    Unknown,
}

/// Classification entry for one status: ordering priority plus display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInfo {
    /// Sort priority within a fixed total order; `Ok` is 0, unknown last.
    pub priority: u8,
    /// Short token rendered in place of a numeric position.
    pub glyph: &'static str,
    /// Hover text explaining the glyph.
    pub tooltip: &'static str,
}

impl CompetitorStatus {
    /// Look up the classification entry for this status.
    ///
    /// Total over the whole enum; there is no failing path.
    pub fn info(self) -> StatusInfo {
        match self {
            CompetitorStatus::Ok => StatusInfo { priority: 0, glyph: "", tooltip: "Approved result" },
            CompetitorStatus::Active => {
                StatusInfo { priority: 1, glyph: "-", tooltip: "Still racing" }
            }
            CompetitorStatus::MisPunch => {
                StatusInfo { priority: 2, glyph: "mp", tooltip: "Mispunched" }
            }
            CompetitorStatus::DidNotFinish => {
                StatusInfo { priority: 3, glyph: "dnf", tooltip: "Did not finish" }
            }
            CompetitorStatus::OverTime => {
                StatusInfo { priority: 4, glyph: "ot", tooltip: "Over maximum time" }
            }
            CompetitorStatus::Disqualified => {
                StatusInfo { priority: 5, glyph: "dsq", tooltip: "Disqualified" }
            }
            CompetitorStatus::DidNotStart => {
                StatusInfo { priority: 6, glyph: "dns", tooltip: "Did not start" }
            }
            CompetitorStatus::NotCompeting => {
                StatusInfo { priority: 7, glyph: "nc", tooltip: "Not competing" }
            }
            CompetitorStatus::Unknown => {
                StatusInfo { priority: 8, glyph: "?", tooltip: "Unknown status" }
            }
        }
    }

    /// Sort priority shorthand, see [`StatusInfo::priority`].
    pub fn priority(self) -> u8 {
        self.info().priority
    }

    /// Whether this status can carry a numeric position at all.
    pub fn is_rankable(self) -> bool {
        self == CompetitorStatus::Ok
    }
}

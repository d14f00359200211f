//! Error types for the ranking engine.
//!
//! The engine is designed to degrade rather than fail: records missing a time are
//! excluded from ranking, malformed split sequences yield `None` leg figures, and
//! unrecognized statuses fall back to a generic glyph. The variants here cover the
//! few conditions that cannot be absorbed that way.
//!
//! ## Error Categories
//!
//! - **Data Errors**: a snapshot that violates the engine's identity precondition
//! - **Key Errors**: sort-key tokens a rendering layer hands us that do not parse
//! - **Source Errors**: failures reported by the snapshot feed behind
//!   [`SnapshotSource`](crate::source::SnapshotSource)
//!
//! ## Retry Classification
//!
//! The driver uses [`EngineError::is_retryable`] to decide between backing off
//! (transient feed trouble) and discarding the offending snapshot (bad data):
//!
//! ```rust
//! use paceboard::EngineError;
//!
//! let error = EngineError::source_failed("feed connection reset");
//! assert!(error.is_retryable());
//! ```

use thiserror::Error;

use crate::types::CompetitorId;

/// Result type alias for engine operations.
pub type Result<T, E = EngineError> = std::result::Result<T, E>;

/// Main error type for engine operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Two records in one snapshot share an id. Identity is load-bearing for
    /// change detection and club aggregation, so this is a precondition
    /// violation on the feed, not a recoverable data state.
    #[error("duplicate competitor id '{id}' within one snapshot")]
    DuplicateCompetitorId { id: CompetitorId },

    #[error("unknown sort key '{token}'")]
    UnknownSortKey { token: String },

    #[error("snapshot source failed: {reason}")]
    Source {
        reason: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl EngineError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Source failures are transient by assumption (the feed will deliver a fresh
    /// full snapshot); data and key errors will not get better by retrying.
    pub fn is_retryable(&self) -> bool {
        match self {
            EngineError::Source { .. } => true,
            EngineError::DuplicateCompetitorId { .. } => false,
            EngineError::UnknownSortKey { .. } => false,
        }
    }

    /// Helper constructor for duplicate-id precondition violations.
    pub fn duplicate_id(id: impl Into<CompetitorId>) -> Self {
        EngineError::DuplicateCompetitorId { id: id.into() }
    }

    /// Helper constructor for unparseable sort-key tokens.
    pub fn unknown_sort_key(token: impl Into<String>) -> Self {
        EngineError::UnknownSortKey { token: token.into() }
    }

    /// Helper constructor for source errors.
    pub fn source_failed(reason: impl Into<String>) -> Self {
        EngineError::Source { reason: reason.into(), source: None }
    }

    /// Helper constructor for source errors with an underlying cause.
    pub fn source_failed_with(
        reason: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        EngineError::Source { reason: reason.into(), source: Some(source) }
    }
}

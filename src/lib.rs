//! Ranking and split-time analytics engine for live race results.
//!
//! Paceboard turns periodically-replaced snapshots of competitor records into
//! presentation-ready view models: overall positions with competition tie
//! handling, loss-to-leader, per-leg figures, statistical outlier flags,
//! club/class aggregation, and transient "what changed" highlighting between
//! snapshots.
//!
//! # Features
//!
//! - **Pure Computation**: every pass is a pure function of one snapshot
//! - **Graceful Degradation**: missing times and short split sequences yield
//!   `None` figures and status glyphs, never panics
//! - **Change Highlighting**: per-batch transient diff set with cancelable expiry
//! - **Stream Delivery**: computed snapshots and highlights as async streams
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use paceboard::{Paceboard, Result, Snapshot, SnapshotSource};
//! use futures::StreamExt;
//!
//! struct MyFeed;
//!
//! #[async_trait::async_trait]
//! impl SnapshotSource for MyFeed {
//!     async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
//!         // fetch the next full snapshot from wherever results live
//!         Ok(None)
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let board = Paceboard::launch(MyFeed);
//!     let mut results = board.results();
//!
//!     while let Some(snapshot) = results.next().await {
//!         for row in &snapshot.competitors {
//!             println!("{:?} {}", row.placement, row.record.name);
//!         }
//!     }
//! }
//! ```
//!
//! The computation passes are also usable directly without the async rim:
//! [`engine::compute`] for the full pipeline, or [`rank::rank`],
//! [`splits::analyze`], [`group::group_by_organisation`] and
//! [`sort::sort_rows`] individually.

// Core types and error handling
mod error;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Computation passes
pub mod deviation;
pub mod engine;
pub mod group;
pub mod rank;
pub mod sort;
pub mod splits;

// Stream-based feed architecture
pub mod board;
pub mod driver;
pub mod reconcile;
pub mod source;

// Core exports
pub use error::{EngineError, Result};
pub use types::*;

// Computation exports
pub use deviation::{LossSeverity, LossStats};
pub use engine::{ComputedCompetitor, ComputedSnapshot, compute};
pub use group::{ClassBlock, OrganisationGroup, group_by_organisation};
pub use rank::{Placement, RankedCompetitor, rank};
pub use sort::sort_rows;
pub use splits::LegFigures;

// Feed exports
pub use board::{BoardOptions, ResultBoard};
pub use reconcile::ChangeReconciler;
pub use source::SnapshotSource;

/// Unified entry point for launching result boards.
///
/// # Examples
///
/// ```rust,no_run
/// use paceboard::{BoardOptions, Paceboard, Result, Snapshot, SnapshotSource};
/// use std::time::Duration;
///
/// struct MyFeed;
///
/// #[async_trait::async_trait]
/// impl SnapshotSource for MyFeed {
///     async fn next_snapshot(&mut self) -> Result<Option<Snapshot>> {
///         Ok(None)
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     // Default ten-second highlight window...
///     let board = Paceboard::launch(MyFeed);
///
///     // ...or a custom one.
///     let custom = Paceboard::launch_with(
///         MyFeed,
///         BoardOptions { highlight_for: Duration::from_secs(5) },
///     );
///     # drop(board); drop(custom);
/// }
/// ```
pub struct Paceboard;

impl Paceboard {
    /// Launch a result board over `source` with default options.
    pub fn launch<S: SnapshotSource>(source: S) -> ResultBoard {
        ResultBoard::launch(source, BoardOptions::default())
    }

    /// Launch a result board over `source` with explicit options.
    pub fn launch_with<S: SnapshotSource>(source: S, options: BoardOptions) -> ResultBoard {
        ResultBoard::launch(source, options)
    }
}

//! Source trait for snapshot feeds.

use crate::Result;
use crate::types::Snapshot;

/// Trait for live-result snapshot feeds.
///
/// Sources abstract over however snapshots actually arrive (polling a results
/// server, a websocket push, a replay file) and handle their own timing
/// internally. The engine only ever sees whole snapshots; deltas and transport
/// concerns stay on the source side of this boundary.
#[async_trait::async_trait]
pub trait SnapshotSource: Send + 'static {
    /// Get the next full snapshot.
    ///
    /// Returns:
    /// - `Ok(Some(snapshot))` - New full replacement snapshot available
    /// - `Ok(None)` - Feed ended (normal termination)
    /// - `Err(e)` - Error occurred; the driver retries with backoff
    async fn next_snapshot(&mut self) -> Result<Option<Snapshot>>;
}

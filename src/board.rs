//! Result board: the owning handle over a snapshot feed.

use futures::{Stream, StreamExt};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::driver::Driver;
use crate::engine::ComputedSnapshot;
use crate::reconcile::DEFAULT_HIGHLIGHT_FOR;
use crate::source::SnapshotSource;
use crate::types::CompetitorId;

/// Configuration for a result board.
#[derive(Debug, Clone)]
pub struct BoardOptions {
    /// How long a changed row stays highlighted before the reconciler clears
    /// it, unless a newer snapshot supersedes the batch first.
    pub highlight_for: Duration,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self { highlight_for: DEFAULT_HIGHLIGHT_FOR }
    }
}

/// Live result board over a snapshot source.
///
/// Owns the driver task; dropping the board cancels it. One board corresponds
/// to one view scope lifecycle: create it when a view mounts, let the feed
/// switch scopes through it (highlight state resets automatically), drop it
/// when the view unmounts.
pub struct ResultBoard {
    /// Computed snapshot watch receiver
    results: watch::Receiver<Option<Arc<ComputedSnapshot>>>,

    /// Changed-id watch receiver
    changed: watch::Receiver<Arc<HashSet<CompetitorId>>>,

    /// Cancellation token for stopping the driver task
    cancel: CancellationToken,
}

impl ResultBoard {
    /// Launch a board over `source` with the given options.
    pub fn launch<S>(source: S, options: BoardOptions) -> Self
    where
        S: SnapshotSource,
    {
        info!("Launching result board (highlight {:?})", options.highlight_for);
        let channels = Driver::spawn(source, options);
        Self { results: channels.results, changed: channels.changed, cancel: channels.cancel }
    }

    /// Subscribe to computed snapshots.
    ///
    /// The stream yields each fully computed snapshot; if the consumer lags,
    /// intermediate snapshots are skipped in favor of the latest (watch
    /// semantics), which is the right behavior for a presentation layer.
    pub fn results(&self) -> impl Stream<Item = Arc<ComputedSnapshot>> + Unpin + 'static {
        WatchStream::new(self.results.clone()).filter_map(|opt| async move { opt }).boxed()
    }

    /// Get the latest computed snapshot, if one has arrived yet.
    pub fn current(&self) -> Option<Arc<ComputedSnapshot>> {
        self.results.borrow().clone()
    }

    /// Subscribe to the transient changed-id highlight set.
    pub fn changed_ids(&self) -> impl Stream<Item = Arc<HashSet<CompetitorId>>> + Unpin + 'static {
        WatchStream::new(self.changed.clone())
    }

    /// The currently highlighted ids.
    pub fn current_changed(&self) -> Arc<HashSet<CompetitorId>> {
        self.changed.borrow().clone()
    }
}

impl Drop for ResultBoard {
    fn drop(&mut self) {
        debug!("Dropping result board");
        // Cancel the driver task on drop for clean shutdown
        self.cancel.cancel();
    }
}

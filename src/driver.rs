//! Driver spawns and manages the snapshot processing task

use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::board::BoardOptions;
use crate::engine::{self, ComputedSnapshot};
use crate::reconcile::ChangeReconciler;
use crate::source::SnapshotSource;
use crate::types::{CompetitorId, SnapshotScope};

/// Result of spawning the driver task
pub struct DriverChannels {
    /// Receiver for computed snapshots
    pub results: watch::Receiver<Option<Arc<ComputedSnapshot>>>,
    /// Receiver for the transient changed-id highlight set
    pub changed: watch::Receiver<Arc<HashSet<CompetitorId>>>,
    /// Cancellation token for graceful shutdown
    pub cancel: CancellationToken,
}

/// Driver spawns and manages the snapshot processing task
///
/// Spawns a reader task that owns the source and the change reconciler. Each
/// snapshot is fully computed before it is swapped onto the watch channel, so
/// a reader never observes a half-updated result set.
pub struct Driver;

impl Driver {
    /// Spawn the driver task for the given source
    ///
    /// Returns watch receivers for computed snapshots and changed ids, plus a
    /// cancellation token for graceful shutdown.
    pub fn spawn<S>(source: S, options: BoardOptions) -> DriverChannels
    where
        S: SnapshotSource,
    {
        let (results_tx, results_rx) = watch::channel(None);
        let cancel = CancellationToken::new();

        let reconciler = ChangeReconciler::new(options.highlight_for);
        let changed_rx = reconciler.changed();

        let cancel_task = cancel.clone();
        tokio::spawn(async move {
            Self::snapshot_task(source, reconciler, results_tx, cancel_task).await;
        });

        DriverChannels { results: results_rx, changed: changed_rx, cancel }
    }

    /// Snapshot task - pulls snapshots, computes, reconciles, publishes
    async fn snapshot_task<S>(
        mut source: S,
        mut reconciler: ChangeReconciler,
        results_tx: watch::Sender<Option<Arc<ComputedSnapshot>>>,
        cancel: CancellationToken,
    ) where
        S: SnapshotSource,
    {
        info!("Snapshot task started");
        let mut snapshot_count = 0u64;
        let mut error_count = 0u32;
        let mut last_scope: Option<SnapshotScope> = None;
        const MAX_ERRORS: u32 = 10;

        loop {
            if cancel.is_cancelled() {
                info!("Snapshot task cancelled");
                break;
            }

            // Allow cancellation while waiting on the feed
            let result = tokio::select! {
                _ = cancel.cancelled() => {
                    info!("Snapshot task cancelled during read");
                    break;
                }
                result = source.next_snapshot() => result,
            };

            match result {
                Ok(Some(snapshot)) => {
                    error_count = 0;

                    // A scope change means the carried-over diff state refers
                    // to a different view entirely.
                    if last_scope.as_ref() != Some(&snapshot.scope) {
                        if last_scope.is_some() {
                            debug!("Scope changed: {:?} -> {:?}", last_scope, snapshot.scope);
                            reconciler.reset();
                        }
                        last_scope = Some(snapshot.scope.clone());
                    }

                    let computed = match engine::compute(&snapshot) {
                        Ok(computed) => Arc::new(computed),
                        Err(e) => {
                            // Data errors are not retryable; drop the snapshot
                            // and wait for the feed to replace it.
                            error!("Discarding snapshot: {}", e);
                            continue;
                        }
                    };

                    snapshot_count += 1;
                    debug!(
                        "Snapshot {}: {} competitors, {} legs",
                        snapshot_count,
                        computed.competitors.len(),
                        computed.leg_count
                    );

                    reconciler.apply(computed.clone());

                    if results_tx.send(Some(computed)).is_err() {
                        debug!("Result receiver dropped, shutting down");
                        break;
                    }
                }
                Ok(None) => {
                    info!("Source ended after {} snapshots", snapshot_count);
                    let _ = results_tx.send(None);
                    break;
                }
                Err(e) => {
                    error_count += 1;
                    warn!("Source error ({}/{}): {}", error_count, MAX_ERRORS, e);

                    if !e.is_retryable() || error_count >= MAX_ERRORS {
                        error!("Giving up on source, shutting down");
                        let _ = results_tx.send(None);
                        break;
                    }

                    // Exponential backoff: 50ms, 100ms, 200ms, ...
                    let backoff = std::time::Duration::from_millis(50 * (1 << error_count.min(5)));
                    tokio::time::sleep(backoff).await;
                }
            }
        }

        info!("Snapshot task ended (processed {} snapshots)", snapshot_count);
    }
}

//! Transient change highlighting between snapshots.
//!
//! Each new computed snapshot is diffed against the previous one by competitor
//! id; ids whose computed row differs form the "changed" set published on a
//! watch channel. The set is a single-shot highlight: a per-batch timer clears
//! it after the configured duration unless a newer snapshot supersedes the
//! batch first. Per id this is a two-state machine, unchanged -> changed
//! (timed) -> unchanged.
//!
//! The reconciler is the only stateful piece of the engine. It is owned by one
//! driver, reset when the snapshot scope changes, and cancels its pending timer
//! on drop so no stale callback can clear a highlight it no longer owns.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::engine::ComputedSnapshot;
use crate::types::CompetitorId;

/// Default highlight duration, see [`ChangeReconciler::new`].
pub const DEFAULT_HIGHLIGHT_FOR: Duration = Duration::from_secs(10);

/// Diffs consecutive computed snapshots into a transient changed-id set.
pub struct ChangeReconciler {
    highlight_for: Duration,
    previous: Option<Arc<ComputedSnapshot>>,
    changed_tx: Arc<watch::Sender<Arc<HashSet<CompetitorId>>>>,
    /// Bumped per batch; a pending expiry only clears its own batch.
    batch: Arc<AtomicU64>,
    /// Cancels the pending expiry of the current batch.
    expiry: CancellationToken,
}

impl ChangeReconciler {
    /// Create a reconciler whose highlights last `highlight_for`.
    pub fn new(highlight_for: Duration) -> Self {
        let (changed_tx, _) = watch::channel(Arc::new(HashSet::new()));
        Self {
            highlight_for,
            previous: None,
            changed_tx: Arc::new(changed_tx),
            batch: Arc::new(AtomicU64::new(0)),
            expiry: CancellationToken::new(),
        }
    }

    /// Watch the changed-id set. Receivers observe every batch and its expiry.
    pub fn changed(&self) -> watch::Receiver<Arc<HashSet<CompetitorId>>> {
        self.changed_tx.subscribe()
    }

    /// The currently highlighted ids.
    pub fn current_changed(&self) -> Arc<HashSet<CompetitorId>> {
        self.changed_tx.borrow().clone()
    }

    /// Diff `next` against the previous snapshot and start this batch's
    /// highlight window.
    ///
    /// Ids present in both snapshots whose full computed row differs are
    /// marked changed; newcomers and departures are not. Supersedes any
    /// pending expiry from the previous batch. Must be called from within a
    /// Tokio runtime (the expiry timer is a spawned task).
    pub fn apply(&mut self, next: Arc<ComputedSnapshot>) -> Arc<HashSet<CompetitorId>> {
        // Supersede the previous batch before publishing the new one.
        self.expiry.cancel();
        self.expiry = CancellationToken::new();
        let batch = self.batch.fetch_add(1, Ordering::SeqCst) + 1;

        let changed: HashSet<CompetitorId> = match &self.previous {
            Some(previous) => {
                let index: HashMap<&CompetitorId, usize> = previous
                    .competitors
                    .iter()
                    .enumerate()
                    .map(|(i, c)| (&c.record.id, i))
                    .collect();
                next.competitors
                    .iter()
                    .filter(|c| {
                        index
                            .get(&c.record.id)
                            .is_some_and(|&i| previous.competitors[i] != **c)
                    })
                    .map(|c| c.record.id.clone())
                    .collect()
            }
            None => HashSet::new(),
        };
        trace!("batch {}: {} changed of {}", batch, changed.len(), next.competitors.len());

        self.previous = Some(next);
        let changed = Arc::new(changed);
        self.changed_tx.send_replace(changed.clone());

        if !changed.is_empty() {
            let token = self.expiry.clone();
            let tx = self.changed_tx.clone();
            let batches = self.batch.clone();
            let highlight_for = self.highlight_for;
            tokio::spawn(async move {
                tokio::select! {
                    _ = token.cancelled() => {}
                    _ = tokio::time::sleep(highlight_for) => {
                        // Only clear our own batch; a newer one owns the
                        // channel now if the count moved on.
                        tx.send_if_modified(|current| {
                            if batches.load(Ordering::SeqCst) == batch && !current.is_empty() {
                                *current = Arc::new(HashSet::new());
                                true
                            } else {
                                false
                            }
                        });
                        debug!("batch {} highlight expired", batch);
                    }
                }
            });
        }

        changed
    }

    /// Forget the previous snapshot and clear any highlight.
    ///
    /// Called when the view's scope changes; rows from another scope must not
    /// be diffed against the new one.
    pub fn reset(&mut self) {
        self.expiry.cancel();
        self.expiry = CancellationToken::new();
        self.batch.fetch_add(1, Ordering::SeqCst);
        self.previous = None;
        self.changed_tx.send_replace(Arc::new(HashSet::new()));
        debug!("reconciler reset");
    }
}

impl Drop for ChangeReconciler {
    fn drop(&mut self) {
        // Pending expiry must not outlive its owner.
        self.expiry.cancel();
    }
}

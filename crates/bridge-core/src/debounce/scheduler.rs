//! Debounce scheduler
//!
//! Runs at most one cancellable delayed action per key. Scheduling a
//! key that already has a pending action replaces it; the replaced
//! action never fires. Cancellation and firing contend on a single
//! mutex, so for any episode exactly one of the two outcomes wins.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

type Action<M> = Box<dyn FnOnce(M) + Send + 'static>;

struct Pending<M> {
    /// Identifies which scheduled task owns this entry. A timer whose
    /// generation no longer matches must not fire.
    generation: u64,
    metadata: M,
    action: Action<M>,
    handle: JoinHandle<()>,
}

struct Inner<M> {
    next_generation: u64,
    pending: HashMap<String, Pending<M>>,
}

/// One cancellable delayed action per key, with at-most-once firing.
///
/// `M` is caller-supplied metadata attached to each pending action; it
/// is handed to the action when it fires, or returned from
/// [`cancel`](Self::cancel) when it does not.
pub struct DebounceScheduler<M> {
    inner: Arc<Mutex<Inner<M>>>,
}

impl<M: Send + 'static> DebounceScheduler<M> {
    /// Create an empty scheduler
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                next_generation: 0,
                pending: HashMap::new(),
            })),
        }
    }

    /// Schedule `action` to run after `delay`, replacing any action
    /// already pending for `key`.
    ///
    /// The replaced action is cancelled before the new one is
    /// registered and will never fire. Must be called from within a
    /// tokio runtime.
    pub fn schedule(
        &self,
        key: impl Into<String>,
        delay: Duration,
        metadata: M,
        action: impl FnOnce(M) + Send + 'static,
    ) {
        let key = key.into();
        let mut inner = self.inner.lock();

        inner.next_generation += 1;
        let generation = inner.next_generation;

        if let Some(old) = inner.pending.remove(&key) {
            old.handle.abort();
            tracing::trace!(key = %key, "Replaced pending action");
        }

        let handle = tokio::spawn({
            let inner = Arc::clone(&self.inner);
            let key = key.clone();
            async move {
                tokio::time::sleep(delay).await;

                // Commit the fire under the lock: the entry must still
                // exist and still belong to this task. cancel() and
                // schedule() take the same lock, so once the entry is
                // removed here neither can observe it again.
                let fired = {
                    let mut inner = inner.lock();
                    if inner
                        .pending
                        .get(&key)
                        .is_some_and(|p| p.generation == generation)
                    {
                        inner.pending.remove(&key)
                    } else {
                        None
                    }
                };

                if let Some(pending) = fired {
                    (pending.action)(pending.metadata);
                }
            }
        });

        // The timer task cannot reach its generation check until this
        // lock is released, so the insert always lands first.
        inner.pending.insert(
            key,
            Pending {
                generation,
                metadata,
                action: Box::new(action),
                handle,
            },
        );
    }

    /// Cancel the pending action for `key`, returning its metadata.
    ///
    /// Returns `None` if nothing is pending, including when the action
    /// already fired (the fired action's effects stand). Cancelling an
    /// already-cancelled key is a no-op.
    pub fn cancel(&self, key: &str) -> Option<M> {
        let mut inner = self.inner.lock();
        inner.pending.remove(key).map(|pending| {
            pending.handle.abort();
            pending.metadata
        })
    }

    /// Cancel every pending action without running any of them.
    ///
    /// Returns how many were discarded. Used on roster resync, where
    /// prior pending departures are meaningless.
    pub fn clear(&self) -> usize {
        let mut inner = self.inner.lock();
        let count = inner.pending.len();
        for (_, pending) in inner.pending.drain() {
            pending.handle.abort();
        }
        count
    }

    /// True if a delayed action is pending for `key`
    #[must_use]
    pub fn is_pending(&self, key: &str) -> bool {
        self.inner.lock().pending.contains_key(key)
    }

    /// Number of currently pending actions
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl<M: Send + 'static> Default for DebounceScheduler<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> std::fmt::Debug for DebounceScheduler<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebounceScheduler")
            .field("pending", &self.inner.lock().pending.len())
            .finish()
    }
}

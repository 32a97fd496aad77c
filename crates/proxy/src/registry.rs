//! Explicit registry of pending remote-reference calls.
//!
//! Deferred values constructed with a remote reference register the
//! pending call here. The registry is an owned object with a controlled
//! lifecycle: the host constructs it at startup, passes clones of the
//! handle to whatever code creates deferred values, and calls
//! [`RemoteRefRegistry::flush_all`] before any operation that requires
//! every outstanding remote side effect to have fired (typically
//! shutdown).
//!
//! Each pending call is invoked at most once, whether through
//! [`Deferred::trigger_remote_ref`](crate::Deferred::trigger_remote_ref)
//! or through a flush.

use latent_core::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// A pending remote side effect tied to a deferred value
pub type RemoteCall = Box<dyn FnOnce() -> Result<()> + Send>;

/// Shared slot holding a pending call until someone consumes it.
///
/// Both the registry and the owning deferred value hold the slot; taking
/// the call out of the inner `Option` is what enforces invoke-at-most-once.
pub(crate) struct Slot {
    pub(crate) call: Mutex<Option<RemoteCall>>,
}

/// Registry of outstanding remote-reference calls across all live
/// deferred values. Cheap to clone; clones share the same registry.
#[derive(Clone, Default)]
pub struct RemoteRefRegistry {
    pending: Arc<Mutex<Vec<Arc<Slot>>>>,
}

impl RemoteRefRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn register(&self, call: RemoteCall) -> Arc<Slot> {
        let slot = Arc::new(Slot {
            call: Mutex::new(Some(call)),
        });
        self.pending.lock().push(Arc::clone(&slot));
        slot
    }

    /// Remove a slot from the registry. Removing an absent slot is a no-op.
    pub(crate) fn unregister(&self, slot: &Arc<Slot>) {
        self.pending.lock().retain(|s| !Arc::ptr_eq(s, slot));
    }

    /// Invoke every still-pending remote reference and clear the registry.
    ///
    /// Failures are logged and do not stop the flush. Returns the number
    /// of calls invoked.
    pub fn flush_all(&self) -> usize {
        let slots = std::mem::take(&mut *self.pending.lock());
        let mut flushed = 0;
        for slot in slots {
            let Some(call) = slot.call.lock().take() else {
                // Already consumed through its owning handle.
                continue;
            };
            if let Err(error) = call() {
                tracing::warn!(%error, "remote reference call failed during flush");
            }
            flushed += 1;
        }
        flushed
    }

    /// Number of entries still registered
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}

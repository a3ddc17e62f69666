//! Coalescing work queue feeding the UI thread.
//!
//! Any thread may [`UiQueue::post`] a request; only the thread owning the
//! control tree drains it through the [`UiReceiver`]. A request that is already
//! pending is not enqueued a second time, so a burst of pushes for the same node
//! costs one refresh. Posting never blocks.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, mpsc};

use crate::tree::id::NodeId;

/// Work item executed on the UI thread.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UiRequest {
    /// Re-resolve a node's subject and refresh its content.
    Refresh(NodeId),
}

impl UiRequest {
    /// Node the request targets.
    pub fn node(self) -> NodeId {
        match self {
            Self::Refresh(id) => id,
        }
    }
}

/// Notifies the UI thread's run loop that requests are waiting.
///
/// Implementations must not block; a typical one posts a "drain" callback to
/// the native main loop.
pub trait UiWaker: Send + Sync {
    /// Schedule a drain of the pending requests.
    fn wake(&self);
}

impl<F> UiWaker for F
where
    F: Fn() + Send + Sync,
{
    fn wake(&self) {
        self();
    }
}

struct Shared {
    pending: Mutex<HashSet<UiRequest>>,
    tx: mpsc::Sender<UiRequest>,
    waker: Arc<dyn UiWaker>,
}

impl Shared {
    fn pending(&self) -> MutexGuard<'_, HashSet<UiRequest>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Posting side of the UI queue; cheap to clone and usable from any thread.
#[derive(Clone)]
pub struct UiQueue {
    shared: Arc<Shared>,
}

/// Draining side of the UI queue, owned by the UI thread.
pub struct UiReceiver {
    rx: mpsc::Receiver<UiRequest>,
    shared: Arc<Shared>,
}

/// Create a connected queue/receiver pair.
pub fn ui_queue(waker: Arc<dyn UiWaker>) -> (UiQueue, UiReceiver) {
    let (tx, rx) = mpsc::channel();
    let shared = Arc::new(Shared {
        pending: Mutex::new(HashSet::new()),
        tx,
        waker,
    });
    (
        UiQueue {
            shared: Arc::clone(&shared),
        },
        UiReceiver { rx, shared },
    )
}

impl UiQueue {
    /// Enqueue `request` unless an identical one is still pending.
    ///
    /// Returns `true` when the request was enqueued.
    pub fn post(&self, request: UiRequest) -> bool {
        if !self.shared.pending().insert(request) {
            tracing::debug!(?request, "coalesced pending ui request");
            return false;
        }
        if self.shared.tx.send(request).is_err() {
            self.shared.pending().remove(&request);
            tracing::debug!(?request, "ui receiver is gone; dropping request");
            return false;
        }
        self.shared.waker.wake();
        true
    }

    /// Closure suitable for [`UpdateEvent::register`](crate::UpdateEvent::register).
    pub(crate) fn poster(&self, request: UiRequest) -> impl Fn() + Send + Sync + 'static {
        let queue = self.clone();
        move || {
            queue.post(request);
        }
    }

    /// Number of requests waiting to be drained.
    pub fn pending_len(&self) -> usize {
        self.shared.pending().len()
    }
}

impl UiReceiver {
    /// Take the oldest pending request without blocking.
    ///
    /// The request leaves the pending set before it is returned, so a post made
    /// while it executes schedules another run.
    pub fn try_next(&self) -> Option<UiRequest> {
        let request = self.rx.try_recv().ok()?;
        self.shared.pending().remove(&request);
        Some(request)
    }
}

impl std::fmt::Debug for UiQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiQueue")
            .field("pending", &self.pending_len())
            .finish()
    }
}

impl std::fmt::Debug for UiReceiver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiReceiver")
            .field("pending", &self.shared.pending().len())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/event/queue.rs"]
mod tests;

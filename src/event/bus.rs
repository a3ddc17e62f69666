//! Subject-scoped update events.
//!
//! An [`UpdateEvent`] is a cheap, cloneable handle to a shared handler list.
//! [`UpdateEvent::push`] may be called from any thread; handlers run on the
//! pushing thread, synchronously, in registration order. Handlers registered
//! by a control tree only post work to the UI queue, so they never block.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

type Handler = Arc<dyn Fn() + Send + Sync>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    handlers: Vec<(u64, Handler)>,
}

fn lock(registry: &Mutex<Registry>) -> MutexGuard<'_, Registry> {
    // A handler panicking while we held the lock cannot leave the list half-edited.
    registry.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Observable with no payload: listeners pull current state from the subject.
#[derive(Clone, Default)]
pub struct UpdateEvent {
    registry: Arc<Mutex<Registry>>,
}

impl UpdateEvent {
    /// Create an event with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `handler`; it stays registered until the returned token is dropped.
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn register(&self, handler: impl Fn() + Send + Sync + 'static) -> Subscription {
        let mut reg = lock(&self.registry);
        let id = reg.next_id;
        reg.next_id += 1;
        reg.handlers.push((id, Arc::new(handler)));
        Subscription {
            registry: Arc::downgrade(&self.registry),
            id,
        }
    }

    /// Invoke every registered handler in registration order.
    ///
    /// The handler list is snapshotted first, so handlers may register or drop
    /// subscriptions (on this or other events) without deadlocking. A handler
    /// removed during a push still sees that push.
    pub fn push(&self) {
        let handlers: Vec<Handler> = lock(&self.registry)
            .handlers
            .iter()
            .map(|(_, h)| Arc::clone(h))
            .collect();
        for handler in handlers {
            handler();
        }
    }

    /// Number of live handlers.
    pub fn handler_count(&self) -> usize {
        lock(&self.registry).handlers.len()
    }

    /// Whether both handles refer to the same event.
    pub fn same_event(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.registry, &other.registry)
    }
}

impl std::fmt::Debug for UpdateEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateEvent")
            .field("handlers", &self.handler_count())
            .finish()
    }
}

/// Registration token returned by [`UpdateEvent::register`].
///
/// Dropping the token removes the handler. Tokens outliving their event are inert.
pub struct Subscription {
    registry: Weak<Mutex<Registry>>,
    id: u64,
}

impl Subscription {
    /// Remove the handler now.
    pub fn unsubscribe(self) {}

    /// Whether the handler is still registered.
    pub fn is_active(&self) -> bool {
        self.registry
            .upgrade()
            .is_some_and(|reg| lock(&reg).handlers.iter().any(|(id, _)| *id == self.id))
    }

    /// Whether this token belongs to `event`.
    pub fn is_for(&self, event: &UpdateEvent) -> bool {
        std::ptr::eq(self.registry.as_ptr(), Arc::as_ptr(&event.registry))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(reg) = self.registry.upgrade() else {
            return;
        };
        // Release the handler outside the lock: it may own subscriptions of its own.
        let removed = {
            let mut reg = lock(&reg);
            let idx = reg.handlers.iter().position(|(id, _)| *id == self.id);
            idx.map(|idx| reg.handlers.remove(idx))
        };
        drop(removed);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/event/bus.rs"]
mod tests;

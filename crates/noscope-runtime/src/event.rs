//! Multicast events
//!
//! Handlers receive the sender as `&dyn Any` together with the event
//! arguments. Forwarding a subscription through a facade passes the handler
//! through unchanged, so the sender a handler observes is always the object
//! that raised the event.

use parking_lot::RwLock;
use std::any::Any;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared event handler
pub type EventHandler<A> = Arc<dyn Fn(&dyn Any, &A) + Send + Sync>;

/// Token returned by `subscribe`, used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Raw id value
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Event with any number of subscribers
pub struct Event<A> {
    next_id: AtomicU64,
    handlers: RwLock<Vec<(SubscriptionId, EventHandler<A>)>>,
}

impl<A> Event<A> {
    /// Event without subscribers
    pub fn new() -> Self {
        Self {
            next_id: AtomicU64::new(1),
            handlers: RwLock::new(Vec::new()),
        }
    }

    /// Subscribe a closure
    pub fn subscribe<F>(&self, handler: F) -> SubscriptionId
    where
        F: Fn(&dyn Any, &A) + Send + Sync + 'static,
    {
        self.subscribe_handler(Arc::new(handler))
    }

    /// Subscribe an existing handler
    pub fn subscribe_handler(&self, handler: EventHandler<A>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.handlers.write().push((id, handler));
        id
    }

    /// Remove a subscription; false if it was not present
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut handlers = self.handlers.write();
        match handlers.iter().position(|(existing, _)| *existing == id) {
            Some(index) => {
                handlers.remove(index);
                true
            }
            None => false,
        }
    }

    /// Invoke every handler in subscription order
    ///
    /// Handlers may subscribe or unsubscribe while the event is being raised;
    /// such changes apply from the next `raise`.
    pub fn raise(&self, sender: &dyn Any, args: &A) {
        let snapshot: Vec<EventHandler<A>> = self
            .handlers
            .read()
            .iter()
            .map(|(_, handler)| Arc::clone(handler))
            .collect();
        for handler in snapshot {
            handler(sender, args);
        }
    }

    /// Number of live subscriptions
    pub fn subscriber_count(&self) -> usize {
        self.handlers.read().len()
    }

    /// Whether nothing is subscribed
    pub fn is_empty(&self) -> bool {
        self.handlers.read().is_empty()
    }
}

impl<A> Default for Event<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> fmt::Debug for Event<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

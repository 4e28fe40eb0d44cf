//! # burnout_event - Synchronous Event Delivery
//!
//! Event plumbing for gameplay state owners:
//! - Typed observer registries with priority ordering
//! - Polled channels for subscribers that prefer to pull
//! - A [`Dispatcher`] that fans one event out to both
//!
//! Delivery is synchronous: when `emit` returns, every registered handler has
//! run and every live channel holds a copy of the event. Observers only ever
//! see `&E` or an owned clone, so they cannot reach back into the emitter.

use crossbeam_channel::Sender;

pub use crossbeam_channel::Receiver;

/// Handler priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Event handler function type
pub type EventHandler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

/// Registry of callback observers for a single event type
pub struct Observers<E> {
    /// Handlers, kept sorted by priority (highest first)
    handlers: Vec<(SubscriberId, Priority, EventHandler<E>)>,
    /// Next subscriber ID
    next_subscriber_id: u64,
}

impl<E> Observers<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            next_subscriber_id: 1,
        }
    }

    /// Subscribe with normal priority
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(handler, Priority::Normal)
    }

    /// Subscribe with priority
    ///
    /// Handlers of equal priority run in registration order.
    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        self.handlers.push((id, priority, Box::new(handler)));
        // Stable sort keeps registration order within a priority
        self.handlers.sort_by(|a, b| b.1.cmp(&a.1));

        id
    }

    /// Unsubscribe. Returns false if the ID was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.handlers.len();
        self.handlers.retain(|(sub_id, _, _)| *sub_id != id);
        self.handlers.len() != before
    }

    /// Run every handler against the event
    pub fn emit(&self, event: &E) {
        for (_, _, handler) in &self.handlers {
            handler(event);
        }
    }

    /// Number of registered handlers
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if no handlers are registered
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Remove all handlers
    pub fn clear(&mut self) {
        self.handlers.clear();
    }
}

impl<E> Default for Observers<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Fan-out of cloned events into polled channels
pub struct EventChannel<E> {
    senders: Vec<Sender<E>>,
}

impl<E: Clone> EventChannel<E> {
    /// Create a channel set with no subscribers
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
        }
    }

    /// Open a new unbounded subscription
    pub fn subscribe(&mut self) -> Receiver<E> {
        let (tx, rx) = crossbeam_channel::unbounded();
        self.senders.push(tx);
        rx
    }

    /// Send a copy of the event to every live subscriber.
    /// Subscribers whose receiver was dropped are forgotten.
    pub fn send(&mut self, event: &E) {
        self.senders.retain(|tx| tx.send(event.clone()).is_ok());
    }

    /// Number of subscriptions that were live at the last send
    pub fn len(&self) -> usize {
        self.senders.len()
    }

    /// Check if there are no subscriptions
    pub fn is_empty(&self) -> bool {
        self.senders.is_empty()
    }
}

impl<E: Clone> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Drain everything currently queued on a receiver
pub fn drain<E>(rx: &Receiver<E>) -> Vec<E> {
    rx.try_iter().collect()
}

/// Callback observers and polled channels behind one `emit`
pub struct Dispatcher<E> {
    observers: Observers<E>,
    channels: EventChannel<E>,
}

impl<E: Clone> Dispatcher<E> {
    /// Create a dispatcher with no subscribers
    pub fn new() -> Self {
        Self {
            observers: Observers::new(),
            channels: EventChannel::new(),
        }
    }

    /// Register a callback with normal priority
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.observers.subscribe(handler)
    }

    /// Register a callback with priority
    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.observers.subscribe_with_priority(handler, priority)
    }

    /// Remove a callback
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        self.observers.unsubscribe(id)
    }

    /// Open a polled subscription
    pub fn subscribe_channel(&mut self) -> Receiver<E> {
        self.channels.subscribe()
    }

    /// Deliver to callbacks first, then to channels
    pub fn emit(&mut self, event: E) {
        self.observers.emit(&event);
        self.channels.send(&event);
    }

    /// Total number of callbacks and live channels
    pub fn subscriber_count(&self) -> usize {
        self.observers.len() + self.channels.len()
    }
}

impl<E: Clone> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Prelude
pub mod prelude {
    pub use crate::{
        drain, Dispatcher, EventChannel, EventHandler, Observers, Priority, Receiver, SubscriberId,
    };
}

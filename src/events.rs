//! Event bus module
//!
//! In-process publish/subscribe registry carrying named events with a string
//! payload. Subscribers are registered per event kind and invoked
//! synchronously, in registration order, from the publish call. No buffering,
//! no persistence, no backpressure.

use std::collections::HashMap;
use std::sync::Arc;

/// Event kinds recognized by the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Log,
    Error,
}

impl EventKind {
    /// Prefix used when rendering an event of this kind as a log line.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Log => "LOG",
            Self::Error => "ERROR",
        }
    }
}

/// A callback invoked for every published event of the kind it registered for.
pub trait Subscriber: Send + Sync {
    fn on_event(&self, kind: EventKind, message: &str);
}

/// Registry mapping event kinds to ordered subscriber lists.
///
/// Built once at startup, before the listener binds, and read-only
/// thereafter.
#[derive(Default)]
pub struct EventBus {
    subscribers: HashMap<EventKind, Vec<Arc<dyn Subscriber>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber for one event kind.
    ///
    /// Subscribers fire in registration order.
    pub fn subscribe(&mut self, kind: EventKind, subscriber: Arc<dyn Subscriber>) {
        self.subscribers.entry(kind).or_default().push(subscriber);
    }

    /// Synchronously invoke every subscriber registered for `kind`.
    pub fn publish(&self, kind: EventKind, message: &str) {
        if let Some(subscribers) = self.subscribers.get(&kind) {
            for subscriber in subscribers {
                subscriber.on_event(kind, message);
            }
        }
    }
}

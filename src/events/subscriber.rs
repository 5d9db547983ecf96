//! # Event subscriber trait and fan-out set.
//!
//! [`Subscribe`] is the extension point for plugging observers into the
//! scheduler: logging, telemetry capture, match replays, test recorders.
//!
//! Delivery is synchronous and in-line with the cycle: the scheduler emits
//! every event to every subscriber, in subscriber registration order,
//! before the cycle continues. There is exactly one logical thread, so a
//! slow subscriber slows the control loop — keep handlers cheap.
//!
//! ## Rules
//! - Events arrive in `seq` order.
//! - Subscribers must not panic; there is no isolation layer between a
//!   subscriber and the control loop driving the robot.
//! - Stateful subscribers use interior mutability (`on_event` takes `&self`).
//!
//! ## Implementing a subscriber
//! ```rust
//! use std::cell::Cell;
//! use commandeer::{Event, EventKind, Subscribe};
//!
//! struct RejectionCounter {
//!     rejected: Cell<u64>,
//! }
//!
//! impl Subscribe for RejectionCounter {
//!     fn on_event(&self, event: &Event) {
//!         if matches!(event.kind, EventKind::ScheduleRejected) {
//!             self.rejected.set(self.rejected.get() + 1);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "rejection-counter"
//!     }
//! }
//! ```

use std::rc::Rc;

use crate::events::Event;

/// Event subscriber for scheduler observability.
///
/// Handlers run synchronously inside `run_cycle`; events are delivered in
/// emission order to every subscriber.
pub trait Subscribe {
    /// Processes a single event.
    fn on_event(&self, event: &Event);

    /// Returns the subscriber name used in logs.
    ///
    /// Prefer short, descriptive names (e.g., "log", "telemetry"). The
    /// default uses `type_name::<Self>()`, which can be verbose.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Ordered fan-out set of subscribers.
///
/// The scheduler owns one of these and emits every event through it.
pub struct SubscriberSet {
    subscribers: Vec<Rc<dyn Subscribe>>,
}

impl SubscriberSet {
    /// Creates a set from the given subscribers, preserving order.
    pub fn new(subscribers: Vec<Rc<dyn Subscribe>>) -> Self {
        Self { subscribers }
    }

    /// Creates an empty set.
    pub fn empty() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Appends a subscriber. Later subscribers see events after earlier ones.
    pub fn push(&mut self, subscriber: Rc<dyn Subscribe>) {
        self.subscribers.push(subscriber);
    }

    /// Delivers an event to every subscriber, in order.
    pub fn emit(&self, event: &Event) {
        for sub in &self.subscribers {
            sub.on_event(event);
        }
    }

    /// Returns the number of subscribers.
    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    /// Returns true if no subscribers are attached.
    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;
    use crate::events::EventKind;

    struct Sink {
        seen: RefCell<Vec<EventKind>>,
    }

    impl Subscribe for Sink {
        fn on_event(&self, event: &Event) {
            self.seen.borrow_mut().push(event.kind);
        }
    }

    #[test]
    fn test_emit_fans_out_in_order() {
        let a = Rc::new(Sink {
            seen: RefCell::new(Vec::new()),
        });
        let b = Rc::new(Sink {
            seen: RefCell::new(Vec::new()),
        });
        let set = SubscriberSet::new(vec![a.clone(), b.clone()]);

        set.emit(&Event::new(EventKind::CommandScheduled));
        set.emit(&Event::new(EventKind::CommandFinished));

        let expect = vec![EventKind::CommandScheduled, EventKind::CommandFinished];
        assert_eq!(*a.seen.borrow(), expect);
        assert_eq!(*b.seen.borrow(), expect);
    }
}

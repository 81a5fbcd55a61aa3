//! Change notifications.
//!
//! Menus, HUDs, and stages react to balance changes, respawns, and phase
//! changes by subscribing to an [`EventBus`]. Delivery is synchronous and in
//! registration order; an event is fully delivered before the emitting
//! operation returns.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use squid_run::events::{EventBus, RunEvent};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let mut bus = EventBus::new();
//!
//! let sink = Rc::clone(&seen);
//! let id = bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
//!
//! bus.emit(&RunEvent::CoinsChanged(75));
//! assert_eq!(seen.borrow().as_slice(), &[RunEvent::CoinsChanged(75)]);
//!
//! assert!(bus.unsubscribe(id));
//! bus.emit(&RunEvent::CoinsChanged(50));
//! assert_eq!(seen.borrow().len(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::core::ParticipantId;
use crate::features::FeatureKind;
use crate::run::RunPhase;

/// Something observers may care about.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunEvent {
    /// Coin balance changed; carries the new balance.
    CoinsChanged(i64),

    /// Prize balance changed; carries the new balance.
    PrizeChanged(i64),

    /// The player revived; the active stage should reset itself.
    StageRespawn,

    /// A purchased feature took effect.
    FeatureActivated(FeatureKind),

    /// The run controller moved between phases.
    PhaseChanged { from: RunPhase, to: RunPhase },

    /// A participant left the roster.
    ParticipantEliminated { id: ParticipantId, remaining: usize },
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

type Handler = Box<dyn FnMut(&RunEvent)>;

/// Ordered list of subscribers.
#[derive(Default)]
pub struct EventBus {
    subscribers: Vec<(SubscriptionId, Handler)>,
    next_id: u32,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler. Handlers run in the order they were added.
    pub fn subscribe(&mut self, handler: impl FnMut(&RunEvent) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Remove a handler. Returns false if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Deliver to every subscriber.
    pub fn emit(&mut self, event: &RunEvent) {
        log::trace!("emit {event:?} to {} subscribers", self.subscribers.len());
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

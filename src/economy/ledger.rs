//! A single persisted, non-negative balance.

use serde::{Deserialize, Serialize};

use crate::events::{EventBus, RunEvent};
use crate::storage::{keys, KeyValueStore};

/// Which balance a [`Ledger`] tracks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    /// Spendable currency: run entry, revives, features.
    Coins,
    /// Accumulated winnings from completed runs.
    Prize,
}

impl Currency {
    /// Storage key for this balance.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Currency::Coins => keys::TOTAL_COINS,
            Currency::Prize => keys::TOTAL_PRIZE,
        }
    }

    /// Change notification carrying the new balance.
    #[must_use]
    pub const fn changed(self, balance: i64) -> RunEvent {
        match self {
            Currency::Coins => RunEvent::CoinsChanged(balance),
            Currency::Prize => RunEvent::PrizeChanged(balance),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Currency::Coins => write!(f, "coins"),
            Currency::Prize => write!(f, "prize"),
        }
    }
}

/// Balance that never goes negative.
///
/// Every successful mutation writes through to the store, flushes it, and
/// emits a change event. Failed spends change nothing and emit nothing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ledger {
    currency: Currency,
    balance: i64,
}

impl Ledger {
    /// Create a ledger with an explicit balance (clamped to zero).
    #[must_use]
    pub fn new(currency: Currency, balance: i64) -> Self {
        Self {
            currency,
            balance: balance.max(0),
        }
    }

    /// Read the persisted balance, or `default` if none is stored.
    pub fn load(currency: Currency, store: &dyn KeyValueStore, default: i64) -> Self {
        let stored = store.get_or(currency.key(), default);
        if stored < 0 {
            log::warn!("stored {currency} balance {stored} is negative, resetting to 0");
        }
        Self::new(currency, stored)
    }

    #[must_use]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    #[must_use]
    pub fn balance(&self) -> i64 {
        self.balance
    }

    #[must_use]
    pub fn has_enough(&self, amount: i64) -> bool {
        self.balance >= amount
    }

    /// Deduct `amount` if affordable. Returns false (and does nothing) otherwise.
    pub fn spend(
        &mut self,
        amount: i64,
        store: &mut dyn KeyValueStore,
        events: &mut EventBus,
    ) -> bool {
        if amount < 0 {
            log::error!("refusing to spend negative {} {}", amount, self.currency);
            return false;
        }
        if !self.has_enough(amount) {
            log::info!(
                "cannot spend {amount} {}: balance is {}",
                self.currency,
                self.balance
            );
            return false;
        }
        self.balance -= amount;
        self.commit(store, events);
        log::info!("spent {amount} {}, remaining {}", self.currency, self.balance);
        true
    }

    /// Credit `amount`. Negative amounts are rejected.
    pub fn add(
        &mut self,
        amount: i64,
        store: &mut dyn KeyValueStore,
        events: &mut EventBus,
    ) -> bool {
        if amount < 0 {
            log::error!("refusing to add negative {} {}", amount, self.currency);
            return false;
        }
        self.balance = self.balance.saturating_add(amount);
        self.commit(store, events);
        log::info!("added {amount} {}, total {}", self.currency, self.balance);
        true
    }

    fn commit(&self, store: &mut dyn KeyValueStore, events: &mut EventBus) {
        store.set(self.currency.key(), self.balance);
        store.flush_or_log();
        events.emit(&self.currency.changed(self.balance));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recorder(bus: &mut EventBus) -> Rc<RefCell<Vec<RunEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));
        seen
    }

    #[test]
    fn test_load_default_and_stored() {
        let mut store = MemoryStore::new();
        assert_eq!(Ledger::load(Currency::Coins, &store, 100).balance(), 100);

        store.set(keys::TOTAL_COINS, 40);
        assert_eq!(Ledger::load(Currency::Coins, &store, 100).balance(), 40);
        assert_eq!(Ledger::load(Currency::Prize, &store, 0).balance(), 0);
    }

    #[test]
    fn test_load_clamps_negative() {
        let mut store = MemoryStore::new();
        store.set(keys::TOTAL_PRIZE, -300);
        assert_eq!(Ledger::load(Currency::Prize, &store, 0).balance(), 0);
    }

    #[test]
    fn test_spend_success_persists_and_notifies() {
        let mut store = MemoryStore::new();
        let mut bus = EventBus::new();
        let seen = recorder(&mut bus);
        let mut coins = Ledger::new(Currency::Coins, 25);

        assert!(coins.spend(25, &mut store, &mut bus));
        assert_eq!(coins.balance(), 0);
        assert_eq!(store.get(keys::TOTAL_COINS), Some(0));
        assert_eq!(store.flush_count(), 1);
        assert_eq!(*seen.borrow(), vec![RunEvent::CoinsChanged(0)]);
    }

    #[test]
    fn test_spend_insufficient_is_silent() {
        let mut store = MemoryStore::new();
        let mut bus = EventBus::new();
        let seen = recorder(&mut bus);
        let mut coins = Ledger::new(Currency::Coins, 10);

        assert!(!coins.spend(11, &mut store, &mut bus));
        assert_eq!(coins.balance(), 10);
        assert!(store.is_empty());
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_add_uses_own_channel() {
        let mut store = MemoryStore::new();
        let mut bus = EventBus::new();
        let seen = recorder(&mut bus);
        let mut prize = Ledger::new(Currency::Prize, 0);

        assert!(prize.add(3000, &mut store, &mut bus));
        assert_eq!(prize.balance(), 3000);
        assert_eq!(store.get(keys::TOTAL_PRIZE), Some(3000));
        assert_eq!(store.get(keys::TOTAL_COINS), None);
        assert_eq!(*seen.borrow(), vec![RunEvent::PrizeChanged(3000)]);
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let mut store = MemoryStore::new();
        let mut bus = EventBus::new();
        let mut coins = Ledger::new(Currency::Coins, 10);

        assert!(!coins.add(-5, &mut store, &mut bus));
        assert!(!coins.spend(-5, &mut store, &mut bus));
        assert_eq!(coins.balance(), 10);
    }

    #[test]
    fn test_add_saturates() {
        let mut store = MemoryStore::new();
        let mut bus = EventBus::new();
        let mut prize = Ledger::new(Currency::Prize, i64::MAX - 1);
        prize.add(10, &mut store, &mut bus);
        assert_eq!(prize.balance(), i64::MAX);
    }
}

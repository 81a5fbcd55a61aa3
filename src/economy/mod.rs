//! Persistent currencies that outlive any single run.
//!
//! ## Key Components
//!
//! - [`Ledger`]: one non-negative balance with write-through persistence
//! - [`Economy`]: the coin and prize ledgers side by side
//! - [`ExchangeQuote`]: stepped prize-to-coin conversion
//! - [`DailyStatus`]: the once-a-day free coin claim
//!
//! ## Pending deltas
//!
//! Grants that happen away from the menu (run winnings, exchanges, daily and
//! ad rewards) are also recorded under `PrizeToAdd` / `CoinsToAdd` so the
//! menu can animate a count-up the next time it is shown.

mod daily;
mod exchange;
mod ledger;

pub use daily::DailyStatus;
pub use exchange::ExchangeQuote;
pub use ledger::{Currency, Ledger};

use crate::core::{ExchangeConfig, RewardConfig};
use crate::events::EventBus;
use crate::storage::{keys, KeyValueStore};

/// Coin and prize balances.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Economy {
    pub coins: Ledger,
    pub prize: Ledger,
}

impl Economy {
    /// Load both balances. `starting_coins` applies on first launch only.
    pub fn load(store: &dyn KeyValueStore, starting_coins: i64) -> Self {
        Self {
            coins: Ledger::load(Currency::Coins, store, starting_coins),
            prize: Ledger::load(Currency::Prize, store, 0),
        }
    }

    #[must_use]
    pub fn ledger(&self, currency: Currency) -> &Ledger {
        match currency {
            Currency::Coins => &self.coins,
            Currency::Prize => &self.prize,
        }
    }

    pub fn ledger_mut(&mut self, currency: Currency) -> &mut Ledger {
        match currency {
            Currency::Coins => &mut self.coins,
            Currency::Prize => &mut self.prize,
        }
    }

    /// Price the exchange at `level` steps against the current prize balance.
    #[must_use]
    pub fn quote_exchange(&self, config: &ExchangeConfig, level: i64) -> ExchangeQuote {
        ExchangeQuote::new(config, self.prize.balance(), level)
    }

    /// Convert `level` steps of prize into coins.
    ///
    /// Returns false without touching either balance if the quote is not
    /// confirmable.
    pub fn exchange(
        &mut self,
        config: &ExchangeConfig,
        level: i64,
        store: &mut dyn KeyValueStore,
        events: &mut EventBus,
    ) -> bool {
        let quote = self.quote_exchange(config, level);
        if !quote.can_confirm {
            log::info!(
                "exchange of {} prize refused (balance {})",
                quote.prize_cost,
                self.prize.balance()
            );
            return false;
        }
        if !self.prize.spend(quote.prize_cost, store, events) {
            return false;
        }
        self.coins.add(quote.coins_gained, store, events);
        record_pending(store, keys::COINS_TO_ADD, quote.coins_gained);
        true
    }

    /// Claim the daily coin grant if it is due.
    ///
    /// Returns the coins granted, or the status explaining why not.
    pub fn claim_daily(
        &mut self,
        config: &RewardConfig,
        now: i64,
        store: &mut dyn KeyValueStore,
        events: &mut EventBus,
    ) -> Result<i64, DailyStatus> {
        match DailyStatus::check(store, now) {
            DailyStatus::Available => {}
            waiting => return Err(waiting),
        }
        self.coins.add(config.daily_amount, store, events);
        record_pending(store, keys::COINS_TO_ADD, config.daily_amount);
        store.set(keys::DAILY_REWARD_NEXT_CLAIM, now + config.daily_interval_secs);
        store.flush_or_log();
        log::info!("daily reward of {} claimed", config.daily_amount);
        Ok(config.daily_amount)
    }

    /// Grant the coins for a watched ad.
    pub fn grant_ad_reward(
        &mut self,
        config: &RewardConfig,
        store: &mut dyn KeyValueStore,
        events: &mut EventBus,
    ) {
        self.coins.add(config.ad_amount, store, events);
        record_pending(store, keys::COINS_TO_ADD, config.ad_amount);
    }
}

/// Record a delta for the menu count-up animation.
pub fn record_pending(store: &mut dyn KeyValueStore, key: &str, amount: i64) {
    store.set(key, amount);
    store.flush_or_log();
}

/// Read and clear the pending coin delta.
pub fn take_pending_coins(store: &mut dyn KeyValueStore) -> i64 {
    take(store, keys::COINS_TO_ADD)
}

/// Read and clear the pending prize delta.
pub fn take_pending_prize(store: &mut dyn KeyValueStore) -> i64 {
    take(store, keys::PRIZE_TO_ADD)
}

fn take(store: &mut dyn KeyValueStore, key: &str) -> i64 {
    let value = store.get_or(key, 0);
    if store.get(key).is_some() {
        store.remove(key);
        store.flush_or_log();
    }
    value
}

use serde::{Deserialize, Serialize};

use crate::core::ExchangeConfig;

/// Price and button state for one exchange level.
///
/// Level `n` converts `n × prize_step` prize into `n × coin_step` coins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeQuote {
    pub level: i64,
    pub prize_cost: i64,
    pub coins_gained: i64,
    /// The balance covers this level and meets the minimum.
    pub can_confirm: bool,
    /// The balance covers the next level up.
    pub can_increase: bool,
    /// Level 1 is the floor.
    pub can_decrease: bool,
}

impl ExchangeQuote {
    #[must_use]
    pub fn new(config: &ExchangeConfig, prize_balance: i64, level: i64) -> Self {
        let prize_cost = level.saturating_mul(config.prize_step);
        let next_cost = level.saturating_add(1).saturating_mul(config.prize_step);
        Self {
            level,
            prize_cost,
            coins_gained: level.saturating_mul(config.coin_step),
            can_confirm: level >= 1
                && prize_balance >= config.min_prize
                && prize_balance >= prize_cost,
            can_increase: prize_balance >= next_cost,
            can_decrease: level > 1,
        }
    }
}

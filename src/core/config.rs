//! Run configuration.
//!
//! Hosts configure the core at startup by providing:
//! - `RunConfig`: roster size, stage count, costs and rewards
//! - `ExchangeConfig`: prize-to-coin conversion steps
//! - `RewardConfig`: daily and ad coin grants
//!
//! Nothing in the run logic hardcodes these numbers.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Complete run configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Roster size at run start (player included).
    pub total_slots: usize,

    /// Number of character types, player included (10 = player + 9 archetypes).
    pub character_types: u16,

    /// Number of stages in a run.
    pub stage_count: usize,

    /// Coins spent to start a scored run.
    pub entry_cost: i64,

    /// Coins spent to revive after losing inside a stage.
    pub revive_cost: i64,

    /// Prize added per eliminated participant.
    pub per_player_reward: i64,

    /// Coin balance when nothing is persisted yet.
    pub starting_coins: i64,

    /// Dalgona never eliminates below this many survivors.
    pub min_remaining_after_dalgona: usize,

    /// Largest tug-of-war team.
    pub max_team_size: usize,

    /// Chance (0-100) that each NPC votes to continue.
    pub vote_pass_percent: u8,

    pub exchange: ExchangeConfig,
    pub rewards: RewardConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            total_slots: 20,
            character_types: 10,
            stage_count: 6,
            entry_cost: 25,
            revive_cost: 30,
            per_player_reward: 1000,
            starting_coins: 100,
            min_remaining_after_dalgona: 10,
            max_team_size: 5,
            vote_pass_percent: 80,
            exchange: ExchangeConfig::default(),
            rewards: RewardConfig::default(),
        }
    }
}

impl RunConfig {
    /// Default configuration: 20 slots, 10 character types, 6 stages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_slots(mut self, total_slots: usize) -> Self {
        self.total_slots = total_slots;
        self
    }

    #[must_use]
    pub fn with_character_types(mut self, character_types: u16) -> Self {
        self.character_types = character_types;
        self
    }

    #[must_use]
    pub fn with_stage_count(mut self, stage_count: usize) -> Self {
        self.stage_count = stage_count;
        self
    }

    #[must_use]
    pub fn with_entry_cost(mut self, cost: i64) -> Self {
        self.entry_cost = cost;
        self
    }

    #[must_use]
    pub fn with_revive_cost(mut self, cost: i64) -> Self {
        self.revive_cost = cost;
        self
    }

    #[must_use]
    pub fn with_reward(mut self, per_player_reward: i64) -> Self {
        self.per_player_reward = per_player_reward;
        self
    }

    #[must_use]
    pub fn with_starting_coins(mut self, coins: i64) -> Self {
        self.starting_coins = coins;
        self
    }

    #[must_use]
    pub fn with_vote_pass_percent(mut self, percent: u8) -> Self {
        self.vote_pass_percent = percent;
        self
    }

    #[must_use]
    pub fn with_max_team_size(mut self, size: usize) -> Self {
        self.max_team_size = size;
        self
    }

    /// Index of the final stage.
    #[must_use]
    pub fn last_stage(&self) -> usize {
        self.stage_count.saturating_sub(1)
    }

    /// Prize for surviving alone: every starting slot's reward.
    #[must_use]
    pub fn last_standing_prize(&self) -> i64 {
        crate::policy::last_standing_prize(self.total_slots, self.per_player_reward)
    }

    /// Check every field for values the run logic cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_slots == 0 {
            return Err(ConfigError::NoSlots);
        }
        if self.character_types < 2 {
            return Err(ConfigError::TooFewCharacterTypes(self.character_types));
        }
        if self.stage_count == 0 {
            return Err(ConfigError::NoStages);
        }
        for (name, value) in [
            ("entry_cost", self.entry_cost),
            ("revive_cost", self.revive_cost),
            ("per_player_reward", self.per_player_reward),
            ("starting_coins", self.starting_coins),
        ] {
            if value < 0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        self.exchange.validate()?;
        self.rewards.validate()
    }
}

/// Prize-to-coin conversion in fixed steps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExchangeConfig {
    /// Prize consumed per step.
    pub prize_step: i64,
    /// Coins granted per step.
    pub coin_step: i64,
    /// Prize balance required before any exchange is offered.
    pub min_prize: i64,
}

impl Default for ExchangeConfig {
    fn default() -> Self {
        Self {
            prize_step: 1000,
            coin_step: 50,
            min_prize: 1000,
        }
    }
}

impl ExchangeConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("prize_step", self.prize_step), ("coin_step", self.coin_step)] {
            if value <= 0 {
                return Err(ConfigError::NonPositive { name, value });
            }
        }
        if self.min_prize < 0 {
            return Err(ConfigError::Negative {
                name: "min_prize",
                value: self.min_prize,
            });
        }
        Ok(())
    }
}

/// Free coin grants outside of runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardConfig {
    /// Coins for the daily claim.
    pub daily_amount: i64,
    /// Seconds between daily claims.
    pub daily_interval_secs: i64,
    /// Coins for watching an ad.
    pub ad_amount: i64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            daily_amount: 50,
            daily_interval_secs: 24 * 60 * 60,
            ad_amount: 50,
        }
    }
}

impl RewardConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [("daily_amount", self.daily_amount), ("ad_amount", self.ad_amount)] {
            if value < 0 {
                return Err(ConfigError::Negative { name, value });
            }
        }
        if self.daily_interval_secs <= 0 {
            return Err(ConfigError::NonPositive {
                name: "daily_interval_secs",
                value: self.daily_interval_secs,
            });
        }
        Ok(())
    }
}

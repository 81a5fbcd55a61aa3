//! Data for the between-stage prize reveal.
//!
//! [`RunController::stage_complete`](super::RunController::stage_complete)
//! writes a small snapshot to the store; the reveal screen reads it back with
//! [`PrizeReveal::load`] and turns it into a [`RevealPlan`]: how many money
//! bundles are already in the jar, how many drop per eliminated participant,
//! and the counter values to tick through.

use serde::{Deserialize, Serialize};

use crate::policy::prize_for;
use crate::storage::{keys, KeyValueStore};

/// Snapshot of the last completed stage.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeReveal {
    pub stage_index: usize,
    pub eliminated: usize,
    pub start_players: usize,
    pub previous_prize: i64,
}

/// One tick of the count-up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealStep {
    pub remaining: usize,
    pub prize: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealPlan {
    /// Counter value before anything drops.
    pub starting_prize: i64,
    /// Bundles shown before the count-up starts.
    pub existing_bundles: i64,
    /// Bundles dropped for each eliminated participant.
    pub bundles_per_player: i64,
    /// One entry per eliminated participant.
    pub steps: Vec<RevealStep>,
}

impl RevealPlan {
    /// Counter value once every step has played.
    #[must_use]
    pub fn final_prize(&self) -> i64 {
        self.steps.last().map_or(self.starting_prize, |step| step.prize)
    }
}

impl PrizeReveal {
    /// Read the snapshot. Missing keys read as zero.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        Self {
            stage_index: read_count(store, keys::CURRENT_STAGE_INDEX),
            eliminated: read_count(store, keys::ELIMINATED_IN_LAST_STAGE),
            start_players: read_count(store, keys::START_PLAYERS_THIS_ROUND),
            previous_prize: store.get_or(keys::PREVIOUS_RUN_PRIZE, 0).max(0),
        }
    }

    /// Write the snapshot and flush.
    pub fn store(&self, store: &mut dyn KeyValueStore) {
        store.set(keys::PREVIOUS_RUN_PRIZE, self.previous_prize);
        store.set(keys::ELIMINATED_IN_LAST_STAGE, to_value(self.eliminated));
        store.set(keys::START_PLAYERS_THIS_ROUND, to_value(self.start_players));
        store.set(keys::CURRENT_STAGE_INDEX, to_value(self.stage_index));
        store.flush_or_log();
    }

    /// The first stage always counts up from zero.
    #[must_use]
    pub fn starting_prize(&self) -> i64 {
        if self.stage_index == 0 {
            0
        } else {
            self.previous_prize
        }
    }

    /// Lay out the animation. A non-positive `bundle_value` disables bundles.
    #[must_use]
    pub fn plan(&self, per_player_reward: i64, bundle_value: i64) -> RevealPlan {
        let starting_prize = self.starting_prize();
        let (existing_bundles, bundles_per_player) = if bundle_value > 0 {
            (starting_prize / bundle_value, per_player_reward / bundle_value)
        } else {
            log::error!("bundle value must be positive, got {bundle_value}");
            (0, 0)
        };

        // A stored count can exceed the field it was taken from.
        let eliminated = self.eliminated.min(self.start_players);
        let steps = (1..=eliminated)
            .map(|k| RevealStep {
                remaining: self.start_players.saturating_sub(k),
                prize: starting_prize.saturating_add(prize_for(k, per_player_reward)),
            })
            .collect();

        RevealPlan {
            starting_prize,
            existing_bundles,
            bundles_per_player,
            steps,
        }
    }
}

fn read_count(store: &dyn KeyValueStore, key: &str) -> usize {
    usize::try_from(store.get_or(key, 0)).unwrap_or(0)
}

fn to_value(count: usize) -> i64 {
    i64::try_from(count).unwrap_or(i64::MAX)
}

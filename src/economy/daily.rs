use serde::{Deserialize, Serialize};

use crate::storage::{keys, KeyValueStore};

/// Whether the daily coin grant can be claimed right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DailyStatus {
    Available,
    Cooldown { remaining_secs: i64 },
}

impl DailyStatus {
    /// Check against the stored next-claim time. `now` is unix seconds.
    ///
    /// A nonsensical stored time (negative) is dropped and the reward
    /// treated as available.
    pub fn check(store: &mut dyn KeyValueStore, now: i64) -> Self {
        match store.get(keys::DAILY_REWARD_NEXT_CLAIM) {
            None => DailyStatus::Available,
            Some(next) if next < 0 => {
                log::warn!("discarding invalid daily reward time {next}");
                store.remove(keys::DAILY_REWARD_NEXT_CLAIM);
                store.flush_or_log();
                DailyStatus::Available
            }
            Some(next) if now >= next => DailyStatus::Available,
            Some(next) => DailyStatus::Cooldown {
                remaining_secs: next - now,
            },
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        self == DailyStatus::Available
    }

    /// Forget the last claim. For QA builds.
    pub fn reset(store: &mut dyn KeyValueStore) {
        store.remove(keys::DAILY_REWARD_NEXT_CLAIM);
        store.flush_or_log();
        log::warn!("daily reward timer reset");
    }
}

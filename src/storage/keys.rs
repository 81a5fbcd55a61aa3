//! Persisted key names.
//!
//! These match the keys existing save files already use, so they are spelled
//! out rather than derived.

/// Spendable coin balance.
pub const TOTAL_COINS: &str = "TotalCoins";

/// Accumulated prize balance.
pub const TOTAL_PRIZE: &str = "TotalPrize";

/// Run prize before the last stage's increment (reveal counts up from here).
pub const PREVIOUS_RUN_PRIZE: &str = "PreviousRunPrize";

/// Participants eliminated by the last completed stage.
pub const ELIMINATED_IN_LAST_STAGE: &str = "EliminatedInLastStage";

/// Roster size when the last completed stage began.
pub const START_PLAYERS_THIS_ROUND: &str = "StartPlayersThisRound";

/// Index of the last completed stage.
pub const CURRENT_STAGE_INDEX: &str = "CurrentStageIndex";

/// Prize committed by the last finished run, waiting to be animated.
pub const PRIZE_TO_ADD: &str = "PrizeToAdd";

/// Coins granted outside a run, waiting to be animated.
pub const COINS_TO_ADD: &str = "CoinsToAdd";

/// Unix seconds at which the next daily reward becomes claimable.
pub const DAILY_REWARD_NEXT_CLAIM: &str = "DailyRewardLastClaimTime";

/// Bumped whenever a run starts or finishes. Checkpoints carry it so a
/// finished run cannot be resumed.
pub const RUN_SERIAL: &str = "RunSerial";

/// One-time onboarding flag for a stage (0-based index, stored 1-based).
#[must_use]
pub fn tutorial_seen(stage_index: usize) -> String {
    format!("TutorialSeen_Lvl{}", stage_index + 1)
}

//! How a finished stage shrinks the roster.

use serde::{Deserialize, Serialize};

use crate::core::{ParticipantId, RunRng};
use crate::roster::Roster;

/// Win or loss for the player's side of a team contest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Won,
    Lost,
}

/// What a stage reports when it finishes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StageReport {
    /// The stage already eliminated participants one by one; count the
    /// difference since the stage started.
    RosterDelta,

    /// Remove this many participants at random, never the player.
    Eliminate(usize),

    /// Single result for the player's side. Losers were eliminated
    /// individually during the stage.
    Outcome(Verdict),
}

/// What applying a report did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// The stage was survived; this many left the roster during it.
    Eliminated(usize),
    /// The player lost; the run is over.
    RunLost,
}

/// Apply `report` to `roster`.
///
/// Eliminations are always counted as the drop from `stage_start_len`, so
/// deaths during the stage and random removals at the end add up.
pub fn resolve(
    report: StageReport,
    roster: &mut Roster,
    stage_start_len: usize,
    rng: &mut RunRng,
) -> Resolution {
    match report {
        StageReport::RosterDelta | StageReport::Outcome(Verdict::Won) => {}
        StageReport::Eliminate(count) => {
            let removed = roster.eliminate_random(count, ParticipantId::PLAYER, rng);
            if removed < count {
                log::warn!("asked to eliminate {count}, only {removed} could go");
            }
        }
        StageReport::Outcome(Verdict::Lost) => return Resolution::RunLost,
    }
    Resolution::Eliminated(delta_eliminated(stage_start_len, roster.len()))
}

/// Participants lost since the stage started.
#[must_use]
pub fn delta_eliminated(stage_start_len: usize, now_len: usize) -> usize {
    stage_start_len.saturating_sub(now_len)
}

/// Prize earned for `eliminated` participants.
#[must_use]
pub fn prize_for(eliminated: usize, per_player_reward: i64) -> i64 {
    i64::try_from(eliminated)
        .unwrap_or(i64::MAX)
        .saturating_mul(per_player_reward)
}

/// Prize for surviving alone, independent of what was accumulated.
#[must_use]
pub fn last_standing_prize(total_slots: usize, per_player_reward: i64) -> i64 {
    prize_for(total_slots, per_player_reward)
}

/// Only the player (or nobody) is left.
#[must_use]
pub fn is_last_standing(roster_len: usize) -> bool {
    roster_len <= 1
}

/// Half the field goes, rounded down (marbles pairs).
#[must_use]
pub fn half_of(remaining: usize) -> usize {
    remaining / 2
}

/// `desired` eliminations, capped so at least `min_remaining` survive.
#[must_use]
pub fn bounded_count(remaining: usize, min_remaining: usize, desired: usize) -> usize {
    desired.min(remaining.saturating_sub(min_remaining))
}

/// Dalgona: 1 to 4 random eliminations, never below `min_remaining`.
pub fn dalgona_eliminations(remaining: usize, min_remaining: usize, rng: &mut RunRng) -> usize {
    if remaining <= min_remaining {
        return 0;
    }
    bounded_count(remaining, min_remaining, rng.gen_inclusive(1, 4))
}

//! Transient per-run state and its checkpoint form.

use serde::{Deserialize, Serialize};

use super::{RunMode, RunPhase};
use crate::core::{ParticipantId, RunConfig, RunRngState};
use crate::error::RunError;
use crate::roster::Roster;

/// Everything that resets when a run starts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    pub(super) mode: RunMode,
    pub(super) phase: RunPhase,
    pub(super) stage_index: usize,
    /// Only grows during a run; zeroed on start and failure.
    pub(super) run_prize: i64,
    pub(super) roster: Roster,
    pub(super) stage_start_len: usize,
}

impl RunState {
    #[must_use]
    pub fn mode(&self) -> RunMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    #[must_use]
    pub fn stage_index(&self) -> usize {
        self.stage_index
    }

    #[must_use]
    pub fn run_prize(&self) -> i64 {
        self.run_prize
    }

    #[must_use]
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Roster size when the current stage began.
    #[must_use]
    pub fn stage_start_len(&self) -> usize {
        self.stage_start_len
    }

    /// Check a decoded state against `config` before adopting it.
    pub fn validate(&self, config: &RunConfig) -> Result<(), RunError> {
        if self.stage_index >= config.stage_count {
            return Err(RunError::InvalidCheckpoint("stage index out of range"));
        }
        if self.phase.stage().is_some_and(|stage| stage != self.stage_index) {
            return Err(RunError::InvalidCheckpoint("phase and stage index disagree"));
        }
        if self.stage_start_len > config.total_slots {
            return Err(RunError::InvalidCheckpoint("more participants than slots"));
        }
        if self.stage_start_len < self.roster.len() {
            return Err(RunError::InvalidCheckpoint("roster grew during a stage"));
        }
        if self.roster.count_of(ParticipantId::PLAYER) > 1 {
            return Err(RunError::InvalidCheckpoint("player appears more than once"));
        }
        if self.run_prize < 0 {
            return Err(RunError::InvalidCheckpoint("negative run prize"));
        }
        Ok(())
    }
}

/// Serialized form of a suspended run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub(super) struct Checkpoint {
    /// Value of the persisted run serial when the checkpoint was taken.
    pub serial: i64,
    pub state: RunState,
    pub rng: RunRngState,
}

impl Checkpoint {
    pub fn encode(&self) -> Result<Vec<u8>, bincode::Error> {
        bincode::serialize(self)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, bincode::Error> {
        bincode::deserialize(bytes)
    }
}

/// How a run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunOutcome {
    /// Cleared the final stage with others still alive.
    Survived,
    /// Everyone else was eliminated.
    LastStanding,
    /// The survivors voted to stop.
    VotedOut,
    /// The player lost a stage or gave up.
    Failed,
}

impl RunOutcome {
    /// Did the run end in `RunComplete` (prize kept)?
    #[must_use]
    pub const fn is_complete(self) -> bool {
        !matches!(self, RunOutcome::Failed)
    }
}

/// Record of the last finished run, for results screens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    /// Prize committed to the ledger (0 for failures).
    pub prize: i64,
    /// Stages fully cleared.
    pub stages_cleared: usize,
    /// Roster size at the end.
    pub survivors: usize,
}

/// What comes after the prize reveal of a finished stage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NextStep {
    Vote,
    /// Last one standing or final stage: the reveal ends the run.
    Finish,
}

/// Result of a completed stage, as handed to the prize reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageSummary {
    pub stage_index: usize,
    pub start_len: usize,
    pub eliminated: usize,
    pub remaining: usize,
    pub previous_prize: i64,
    pub run_prize: i64,
    pub next: NextStep,
}

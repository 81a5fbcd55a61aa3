use serde::{Deserialize, Serialize};

/// Where the run controller is in the stage sequence.
///
/// ```text
/// NotStarted → StageInProgress(0) → AwaitingPrizeReveal → AwaitingVote
///            → StageInProgress(1) → … → RunComplete
/// ```
///
/// `RunFailed` is reachable from any stage or vote. Both terminal phases
/// accept a new `start_run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunPhase {
    #[default]
    NotStarted,
    /// Playing the stage at this index.
    StageInProgress(usize),
    AwaitingPrizeReveal,
    AwaitingVote,
    RunComplete,
    RunFailed,
}

impl RunPhase {
    /// Can a new run start from here?
    #[must_use]
    pub const fn accepts_start(self) -> bool {
        matches!(self, RunPhase::NotStarted | RunPhase::RunComplete | RunPhase::RunFailed)
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, RunPhase::RunComplete | RunPhase::RunFailed)
    }

    /// Stage index when a stage is being played.
    #[must_use]
    pub const fn stage(self) -> Option<usize> {
        match self {
            RunPhase::StageInProgress(index) => Some(index),
            _ => None,
        }
    }
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunPhase::NotStarted => write!(f, "not started"),
            RunPhase::StageInProgress(index) => write!(f, "playing stage {}", index + 1),
            RunPhase::AwaitingPrizeReveal => write!(f, "revealing prize"),
            RunPhase::AwaitingVote => write!(f, "voting"),
            RunPhase::RunComplete => write!(f, "run complete"),
            RunPhase::RunFailed => write!(f, "run failed"),
        }
    }
}

/// Scored run or unscored sandbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunMode {
    /// Entry cost paid; roster, prize and ledgers are live.
    #[default]
    Main,
    /// Free play of a single stage. Run bookkeeping is bypassed.
    Practice,
}

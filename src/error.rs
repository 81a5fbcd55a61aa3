//! Error types.
//!
//! Nothing here is fatal to the host. Spend-gated operations report
//! [`RunError::InsufficientFunds`] so the caller can show a "cannot afford"
//! message; storage failures are logged and the in-memory value is kept.

use thiserror::Error;

use crate::run::RunPhase;

/// Invalid configuration values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A run needs at least one roster slot.
    #[error("total slots must be at least 1")]
    NoSlots,

    /// The player plus at least one archetype.
    #[error("need at least 2 character types (player + 1 archetype), got {0}")]
    TooFewCharacterTypes(u16),

    /// At least one stage must be configured.
    #[error("stage count must be at least 1")]
    NoStages,

    /// Costs and rewards cannot be negative.
    #[error("{name} must not be negative (got {value})")]
    Negative { name: &'static str, value: i64 },

    /// Exchange steps must be positive.
    #[error("{name} must be positive (got {value})")]
    NonPositive { name: &'static str, value: i64 },
}

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage file is not valid json: {0}")]
    Json(#[from] serde_json::Error),
}

/// Caller-visible failures from run operations.
#[derive(Debug, Error)]
pub enum RunError {
    /// Not enough coins for the gated action.
    #[error("not enough coins: need {needed}, have {available}")]
    InsufficientFunds { needed: i64, available: i64 },

    /// The operation is not valid in the current phase.
    #[error("operation not valid while {0}")]
    WrongPhase(RunPhase),

    /// The operation is only meaningful in a scored run.
    #[error("operation only available in a scored run")]
    PracticeMode,

    /// The stage index is outside the configured stage list.
    #[error("no stage {index} (only {stage_count} configured)")]
    UnknownStage { index: usize, stage_count: usize },

    /// The controller was given a configuration it cannot run.
    #[error("invalid run configuration: {0}")]
    Config(#[from] ConfigError),

    /// Feature prices must not be negative.
    #[error("invalid cost {0}")]
    InvalidCost(i64),

    /// The checkpoint belongs to a run that has since started or finished.
    #[error("checkpoint is from run {checkpoint}, current run is {current}")]
    StaleCheckpoint { checkpoint: i64, current: i64 },

    /// The checkpoint decoded but does not fit the active configuration.
    #[error("checkpoint rejected: {0}")]
    InvalidCheckpoint(&'static str),

    /// A checkpoint could not be encoded or decoded.
    #[error("checkpoint codec failed: {0}")]
    Checkpoint(#[from] bincode::Error),
}

impl RunError {
    /// Is this the "cannot afford" case?
    #[must_use]
    pub fn is_insufficient_funds(&self) -> bool {
        matches!(self, RunError::InsufficientFunds { .. })
    }
}

//! # squid-run
//!
//! Engine-independent core of an elimination-style party game: a roster of
//! participants goes through a fixed sequence of stages, each stage removes
//! some of them, and the player banks prize money for every elimination they
//! survive.
//!
//! ## Design Principles
//!
//! 1. **No engine**: rendering, physics, audio, and input stay in the host.
//!    Stages talk to the core through [`RunController`] and [`StageReport`].
//!
//! 2. **Explicit context**: one controller is constructed at startup and
//!    passed to whoever needs it. There is no global instance.
//!
//! 3. **Tick-driven time**: the core never sleeps. Timers advance on
//!    `tick(dt)` and animations report completion back.
//!
//! ## State Values
//!
//! Balances and persisted counters are `i64`. Booleans in storage are 0/1.
//!
//! ## Modules
//!
//! - `core`: participant IDs, RNG, configuration
//! - `storage`: key/value persistence
//! - `events`: synchronous observer bus
//! - `roster`: alive participants and team splits
//! - `economy`: coins, prize, exchange, daily and ad rewards
//! - `policy`: elimination counts, prize rules, votes
//! - `features`: purchasable in-stage boosts and their timers
//! - `run`: the run state machine

pub mod core;
pub mod economy;
pub mod error;
pub mod events;
pub mod features;
pub mod policy;
pub mod roster;
pub mod run;
pub mod storage;

// Re-export commonly used types
pub use crate::core::{ExchangeConfig, ParticipantId, RewardConfig, RunConfig, RunRng, RunRngState};

pub use crate::economy::{Currency, DailyStatus, Economy, ExchangeQuote, Ledger};

pub use crate::error::{ConfigError, RunError, StorageError};

pub use crate::events::{EventBus, RunEvent, SubscriptionId};

pub use crate::features::{Cooldown, FeatureKind, FeatureSlot, FeatureSpec, HoldGate, Release};

pub use crate::policy::{Resolution, StageReport, Verdict, VoteTally};

pub use crate::roster::{Roster, Team, TeamSplit};

pub use crate::run::{
    NextStep, PrizeReveal, RevealPlan, RevealStep, RunController, RunMode, RunOutcome, RunPhase,
    RunState, RunSummary, StageSummary,
};

pub use crate::storage::{JsonFileStore, KeyValueStore, MemoryStore};

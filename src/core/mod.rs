//! Core types: participant IDs, RNG, configuration.
//!
//! Everything else in the crate builds on these. Hosts configure a run via
//! `RunConfig` rather than changing the run logic.

pub mod participant;
pub mod rng;
pub mod config;

pub use participant::ParticipantId;
pub use rng::{RunRng, RunRngState};
pub use config::{ExchangeConfig, RewardConfig, RunConfig};

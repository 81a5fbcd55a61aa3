//! The run state machine.
//!
//! A run is one paid attempt at the stage sequence:
//!
//! ```text
//! start_run → stage → prize reveal → vote → stage → … → complete
//! ```
//!
//! ## Key Components
//!
//! - [`RunController`]: owns the roster, balances, RNG and event bus
//! - [`RunPhase`] / [`RunMode`]: where the run is and whether it scores
//! - [`PrizeReveal`]: snapshot the reveal screen animates from
//! - [`RunState`]: checkpointable transient state
//!
//! ## Example
//!
//! ```
//! use squid_run::core::{RunConfig, RunRng};
//! use squid_run::policy::StageReport;
//! use squid_run::run::{NextStep, RunController, RunPhase};
//! use squid_run::storage::MemoryStore;
//!
//! let config = RunConfig::default();
//! let mut ctl = RunController::new(config, MemoryStore::new(), RunRng::new(1)).unwrap();
//! ctl.start_run().unwrap();
//! assert_eq!(ctl.coins(), 75);
//!
//! let summary = ctl.stage_complete(StageReport::Eliminate(3)).unwrap();
//! assert_eq!(summary.run_prize, 3000);
//! assert_eq!(summary.next, NextStep::Vote);
//!
//! ctl.prize_reveal_complete();
//! ctl.voting_complete(false);
//! assert_eq!(ctl.phase(), RunPhase::RunComplete);
//! assert_eq!(ctl.prize(), 3000);
//! ```

mod controller;
mod phase;
mod reveal;
mod state;

pub use controller::RunController;
pub use phase::{RunMode, RunPhase};
pub use reveal::{PrizeReveal, RevealPlan, RevealStep};
pub use state::{NextStep, RunOutcome, RunState, RunSummary, StageSummary};

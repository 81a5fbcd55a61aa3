//! Roster: which participants are still alive in the current run.
//!
//! The roster is only mutated through the run controller; stages get a
//! read-only view plus the elimination entry points.

mod store;
mod teams;

pub use store::Roster;
pub use teams::{Team, TeamSplit};

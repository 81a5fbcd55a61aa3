//! Elimination policy: pure decisions about how the roster shrinks and how
//! much prize that earns.
//!
//! - [`StageReport`] is what a stage hands back when it ends
//! - [`resolve`] applies a report to a roster
//! - the free functions compute per-stage elimination counts and prizes
//! - [`VoteTally`] decides whether the survivors continue

mod elimination;
mod vote;

pub use elimination::{
    bounded_count, dalgona_eliminations, delta_eliminated, half_of, is_last_standing,
    last_standing_prize, prize_for, resolve, Resolution, StageReport, Verdict,
};
pub use vote::VoteTally;

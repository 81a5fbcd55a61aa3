//! Continue-or-quit vote between stages.

use serde::{Deserialize, Serialize};

use crate::core::RunRng;

/// Vote counts. The player may vote once; NPC votes are rolled up front.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteTally {
    pub npc_yes: usize,
    pub npc_no: usize,
    pub player: Option<bool>,
}

impl VoteTally {
    /// Roll `npc_voters` independent votes, each yes with `pass_percent`% chance.
    pub fn cast(npc_voters: usize, pass_percent: u8, rng: &mut RunRng) -> Self {
        let npc_yes = (0..npc_voters).filter(|_| rng.roll_percent(pass_percent)).count();
        let tally = Self {
            npc_yes,
            npc_no: npc_voters - npc_yes,
            player: None,
        };
        log::debug!(
            "npc votes: {} yes, {} no ({pass_percent}% pass chance)",
            tally.npc_yes,
            tally.npc_no
        );
        tally
    }

    /// Everyone alive except the player votes as an NPC.
    #[must_use]
    pub fn npc_voters_for(roster_len: usize) -> usize {
        roster_len.saturating_sub(1)
    }

    /// Record the player's vote. Later votes are ignored.
    pub fn vote(&mut self, yes: bool) -> bool {
        if self.player.is_some() {
            return false;
        }
        self.player = Some(yes);
        true
    }

    #[must_use]
    pub fn yes(&self) -> usize {
        self.npc_yes + usize::from(self.player == Some(true))
    }

    #[must_use]
    pub fn no(&self) -> usize {
        self.npc_no + usize::from(self.player == Some(false))
    }

    /// Strict majority of yes votes.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.yes() > self.no()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cast_counts_everyone() {
        let tally = VoteTally::cast(9, 80, &mut RunRng::new(1));
        assert_eq!(tally.npc_yes + tally.npc_no, 9);
        assert_eq!(tally.player, None);
    }

    #[test]
    fn test_cast_extremes() {
        let all_yes = VoteTally::cast(5, 100, &mut RunRng::new(2));
        assert_eq!(all_yes.npc_yes, 5);
        assert!(all_yes.passed());

        let all_no = VoteTally::cast(5, 0, &mut RunRng::new(2));
        assert_eq!(all_no.npc_no, 5);
        assert!(!all_no.passed());
    }

    #[test]
    fn test_player_breaks_tie() {
        let mut tally = VoteTally {
            npc_yes: 2,
            npc_no: 2,
            player: None,
        };
        assert!(!tally.passed());
        assert!(tally.vote(true));
        assert!(tally.passed());
        assert!(!tally.vote(false));
        assert_eq!(tally.yes(), 3);
        assert_eq!(tally.no(), 2);
    }

    #[test]
    fn test_npc_voters() {
        assert_eq!(VoteTally::npc_voters_for(10), 9);
        assert_eq!(VoteTally::npc_voters_for(0), 0);
    }

    #[test]
    fn test_no_voters_fails() {
        assert!(!VoteTally::default().passed());
    }
}

//! Team assignment for two-sided stages (tug-of-war).

use smallvec::SmallVec;

use super::Roster;
use crate::core::{ParticipantId, RunRng};

/// One side of a team contest. Teams rarely exceed eight.
pub type Team = SmallVec<[ParticipantId; 8]>;

/// Result of [`Roster::split_teams`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TeamSplit {
    /// Members per side.
    pub team_size: usize,
    /// The player's side when the player is alive.
    pub team_a: Team,
    pub team_b: Team,
    /// Participants sitting this contest out. They survive it automatically.
    pub safe: Vec<ParticipantId>,
}

impl TeamSplit {
    /// Is the player competing on team A?
    #[must_use]
    pub fn player_on_team_a(&self) -> bool {
        self.team_a.contains(&ParticipantId::PLAYER)
    }

    /// The members of whichever side lost.
    #[must_use]
    pub fn losers(&self, team_a_won: bool) -> &[ParticipantId] {
        if team_a_won {
            &self.team_b
        } else {
            &self.team_a
        }
    }
}

impl Roster {
    /// Split the roster into two equal teams plus a safe group.
    ///
    /// Team size is `min(len / 2, max_team_size)`. The player, if alive,
    /// always plays on team A. AIs are shuffled; the first ones sit out and
    /// the rest fill team A, then team B. With no match possible everyone is
    /// safe.
    pub fn split_teams(&self, max_team_size: usize, rng: &mut RunRng) -> TeamSplit {
        let total = self.len();
        let team_size = (total / 2).min(max_team_size);
        let player_alive = self.contains(ParticipantId::PLAYER);

        let mut ais: Vec<ParticipantId> = self.iter().filter(|id| !id.is_player()).collect();
        rng.shuffle(&mut ais);

        if team_size == 0 {
            let mut safe = ais;
            if player_alive {
                safe.insert(0, ParticipantId::PLAYER);
            }
            return TeamSplit {
                team_size: 0,
                safe,
                ..TeamSplit::default()
            };
        }

        let player_slot = usize::from(player_alive);
        let match_ais = team_size * 2 - player_slot;
        let safe_count = ais.len() - match_ais;

        let mut team_a = Team::new();
        if player_alive {
            team_a.push(ParticipantId::PLAYER);
        }
        let (safe, playing) = ais.split_at(safe_count);
        let (for_a, for_b) = playing.split_at(team_size - player_slot);
        team_a.extend_from_slice(for_a);

        log::debug!(
            "teams split: {total} total, {team_size}v{team_size}, {} safe",
            safe.len()
        );
        TeamSplit {
            team_size,
            team_a,
            team_b: Team::from_slice(for_b),
            safe: safe.to_vec(),
        }
    }
}

//! Participant identification.
//!
//! ## ParticipantId
//!
//! Every roster slot holds a `ParticipantId`. ID 0 is always the human
//! player; IDs `1..archetype_count` are enemy archetypes. Archetype IDs may
//! repeat across slots, the player ID never does.

use serde::{Deserialize, Serialize};

/// Roster entry identifier.
///
/// `ParticipantId::PLAYER` (0) is the human-controlled participant.
/// Everything else is an enemy archetype.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ParticipantId(pub u16);

impl ParticipantId {
    /// The human-controlled player.
    pub const PLAYER: ParticipantId = ParticipantId(0);

    /// Create a new participant ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Is this the human player?
    #[must_use]
    pub const fn is_player(self) -> bool {
        self.0 == Self::PLAYER.0
    }

    /// Iterate over every archetype ID for `type_count` character types.
    ///
    /// `type_count` includes the player, so 10 types yields archetypes 1..=9.
    ///
    /// ```
    /// use squid_run::core::ParticipantId;
    ///
    /// let archetypes: Vec<_> = ParticipantId::archetypes(4).collect();
    /// assert_eq!(archetypes, vec![
    ///     ParticipantId::new(1),
    ///     ParticipantId::new(2),
    ///     ParticipantId::new(3),
    /// ]);
    /// ```
    pub fn archetypes(type_count: u16) -> impl Iterator<Item = ParticipantId> {
        (1..type_count).map(ParticipantId)
    }
}

impl std::fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_player() {
            write!(f, "Player")
        } else {
            write!(f, "Archetype {}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_constant() {
        assert!(ParticipantId::PLAYER.is_player());
        assert!(!ParticipantId::new(3).is_player());
        assert_eq!(ParticipantId::PLAYER.raw(), 0);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", ParticipantId::PLAYER), "Player");
        assert_eq!(format!("{}", ParticipantId::new(7)), "Archetype 7");
    }

    #[test]
    fn test_archetypes_exclude_player() {
        let ids: Vec<_> = ParticipantId::archetypes(10).collect();
        assert_eq!(ids.len(), 9);
        assert!(ids.iter().all(|id| !id.is_player()));
        assert_eq!(ids.last(), Some(&ParticipantId::new(9)));
    }

    #[test]
    fn test_archetypes_degenerate() {
        assert_eq!(ParticipantId::archetypes(1).count(), 0);
        assert_eq!(ParticipantId::archetypes(0).count(), 0);
    }

    #[test]
    fn test_serialization() {
        let id = ParticipantId::new(4);
        let json = serde_json::to_string(&id).unwrap();
        let back: ParticipantId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}

//! The authoritative list of alive participants.
//!
//! Uses an `im` persistent vector so [`Roster::snapshot`] is an O(1) clone
//! that stage code can hold onto without aliasing the live list.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::{ParticipantId, RunRng};

/// Ordered collection of alive participant IDs.
///
/// ## Invariants
///
/// - `ParticipantId::PLAYER` appears at most once
/// - Size never grows except through [`initialize`](Self::initialize)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    entries: Vector<ParticipantId>,
}

impl Roster {
    /// Create an empty roster.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from explicit entries, keeping only the first player.
    pub fn from_entries(entries: impl IntoIterator<Item = ParticipantId>) -> Self {
        let mut roster = Self::new();
        let mut has_player = false;
        for id in entries {
            if id.is_player() {
                if has_player {
                    log::warn!("dropping duplicate player entry");
                    continue;
                }
                has_player = true;
            }
            roster.entries.push_back(id);
        }
        roster
    }

    /// Fill the roster for a new run.
    ///
    /// The player goes in once, every archetype in `1..character_types` goes
    /// in once, and the remaining slots get uniformly random archetypes. The
    /// whole list is then shuffled. If there are fewer slots than character
    /// types, a random subset of archetypes is kept so the size still equals
    /// `total_slots`.
    ///
    /// Returns false and leaves the roster untouched when `total_slots` is 0
    /// or there are no archetypes to draw from.
    pub fn initialize(
        &mut self,
        total_slots: usize,
        character_types: u16,
        rng: &mut RunRng,
    ) -> bool {
        if total_slots == 0 {
            log::error!("cannot build a roster with zero slots");
            return false;
        }
        if character_types < 2 {
            log::error!("cannot build a roster with {character_types} character types");
            return false;
        }

        let mut archetypes: Vec<ParticipantId> =
            ParticipantId::archetypes(character_types).collect();
        rng.shuffle(&mut archetypes);
        archetypes.truncate(total_slots - 1);

        let mut fill = Vec::with_capacity(total_slots);
        fill.push(ParticipantId::PLAYER);
        fill.extend(archetypes);
        while fill.len() < total_slots {
            fill.push(ParticipantId(rng.gen_range_u16(1, character_types)));
        }
        rng.shuffle(&mut fill);

        self.entries = fill.into_iter().collect();
        log::info!(
            "roster initialized with {} entries ({} character types)",
            self.entries.len(),
            character_types
        );
        true
    }

    /// Remove the first occurrence of `id`.
    ///
    /// Missing IDs are not an error: several stage systems may report the
    /// same death, and only the first one lands.
    pub fn eliminate(&mut self, id: ParticipantId) -> bool {
        match self.entries.index_of(&id) {
            Some(index) => {
                self.entries.remove(index);
                log::debug!("{id} eliminated, {} remaining", self.entries.len());
                true
            }
            None => {
                log::warn!("{id} not in roster (already eliminated?)");
                false
            }
        }
    }

    /// Remove up to `count` uniformly chosen entries, never `protect`.
    ///
    /// Returns how many were actually removed. When `protect` is present at
    /// least that one entry always survives.
    pub fn eliminate_random(
        &mut self,
        count: usize,
        protect: ParticipantId,
        rng: &mut RunRng,
    ) -> usize {
        let mut candidates: Vec<usize> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, id)| **id != protect)
            .map(|(index, _)| index)
            .collect();

        let to_remove = count.min(candidates.len());
        // Partial Fisher-Yates: the first `to_remove` slots become the sample.
        for i in 0..to_remove {
            let j = i + rng.gen_index(candidates.len() - i);
            candidates.swap(i, j);
        }
        let mut chosen = candidates[..to_remove].to_vec();
        chosen.sort_unstable_by(|a, b| b.cmp(a));
        for index in chosen {
            self.entries.remove(index);
        }

        log::debug!("{to_remove} eliminated at random, {} remaining", self.entries.len());
        to_remove
    }

    /// Empty the roster.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// O(1) copy of the current entries.
    #[must_use]
    pub fn snapshot(&self) -> Vector<ParticipantId> {
        self.entries.clone()
    }

    #[must_use]
    pub fn contains(&self, id: ParticipantId) -> bool {
        self.entries.contains(&id)
    }

    /// How many slots hold `id`.
    #[must_use]
    pub fn count_of(&self, id: ParticipantId) -> usize {
        self.entries.iter().filter(|entry| **entry == id).count()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ParticipantId> + '_ {
        self.entries.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[u16]) -> Vec<ParticipantId> {
        raw.iter().copied().map(ParticipantId).collect()
    }

    #[test]
    fn test_initialize_default_shape() {
        let mut rng = RunRng::new(42);
        let mut roster = Roster::new();

        assert!(roster.initialize(20, 10, &mut rng));
        assert_eq!(roster.len(), 20);
        assert_eq!(roster.count_of(ParticipantId::PLAYER), 1);
        for archetype in ParticipantId::archetypes(10) {
            assert!(roster.contains(archetype), "{archetype} missing");
        }
    }

    #[test]
    fn test_initialize_replaces_previous_roster() {
        let mut rng = RunRng::new(1);
        let mut roster = Roster::from_entries(ids(&[0, 1, 1, 1]));

        assert!(roster.initialize(6, 3, &mut rng));
        assert_eq!(roster.len(), 6);
        assert_eq!(roster.count_of(ParticipantId::PLAYER), 1);
    }

    #[test]
    fn test_initialize_fewer_slots_than_types() {
        let mut rng = RunRng::new(5);
        let mut roster = Roster::new();

        assert!(roster.initialize(4, 10, &mut rng));
        assert_eq!(roster.len(), 4);
        assert!(roster.contains(ParticipantId::PLAYER));
        // Truncated archetypes are distinct.
        let mut archetypes: Vec<_> = roster.iter().filter(|id| !id.is_player()).collect();
        archetypes.sort();
        archetypes.dedup();
        assert_eq!(archetypes.len(), 3);
    }

    #[test]
    fn test_initialize_single_slot_is_just_the_player() {
        let mut rng = RunRng::new(5);
        let mut roster = Roster::new();
        assert!(roster.initialize(1, 10, &mut rng));
        assert_eq!(roster.snapshot().into_iter().collect::<Vec<_>>(), vec![ParticipantId::PLAYER]);
    }

    #[test]
    fn test_initialize_rejects_bad_config() {
        let mut rng = RunRng::new(5);
        let mut roster = Roster::from_entries(ids(&[0, 2]));

        assert!(!roster.initialize(0, 10, &mut rng));
        assert!(!roster.initialize(10, 1, &mut rng));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_initialize_is_shuffled() {
        let mut rng = RunRng::new(42);
        let mut roster = Roster::new();
        roster.initialize(20, 10, &mut rng);
        let first: Vec<_> = roster.iter().collect();

        // The unshuffled layout would start with the player followed by 1..9.
        let unshuffled: Vec<_> = std::iter::once(ParticipantId::PLAYER)
            .chain(ParticipantId::archetypes(10))
            .collect();
        assert_ne!(&first[..10], unshuffled.as_slice());
    }

    #[test]
    fn test_eliminate_first_occurrence_only() {
        let mut roster = Roster::from_entries(ids(&[0, 3, 5, 3]));

        assert!(roster.eliminate(ParticipantId(3)));
        assert_eq!(roster.iter().collect::<Vec<_>>(), ids(&[0, 5, 3]));
        assert!(roster.eliminate(ParticipantId(3)));
        assert!(!roster.eliminate(ParticipantId(3)));
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_eliminate_random_protects() {
        let mut rng = RunRng::new(8);
        let mut roster = Roster::from_entries(ids(&[4, 0, 2, 2, 7, 1, 9, 3, 3, 6]));

        let removed = roster.eliminate_random(5, ParticipantId::PLAYER, &mut rng);
        assert_eq!(removed, 5);
        assert_eq!(roster.len(), 5);
        assert!(roster.contains(ParticipantId::PLAYER));
    }

    #[test]
    fn test_eliminate_random_clamps() {
        let mut rng = RunRng::new(8);
        let mut roster = Roster::from_entries(ids(&[1, 0, 2]));

        let removed = roster.eliminate_random(10, ParticipantId::PLAYER, &mut rng);
        assert_eq!(removed, 2);
        assert_eq!(roster.iter().collect::<Vec<_>>(), ids(&[0]));

        let mut without_player = Roster::from_entries(ids(&[1, 2, 3]));
        let removed = without_player.eliminate_random(10, ParticipantId::PLAYER, &mut rng);
        assert_eq!(removed, 3);
        assert!(without_player.is_empty());
    }

    #[test]
    fn test_eliminate_random_zero() {
        let mut rng = RunRng::new(8);
        let mut roster = Roster::from_entries(ids(&[0, 1]));
        assert_eq!(roster.eliminate_random(0, ParticipantId::PLAYER, &mut rng), 0);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut roster = Roster::from_entries(ids(&[0, 1, 2]));
        let snapshot = roster.snapshot();
        roster.eliminate(ParticipantId(1));

        assert_eq!(snapshot.len(), 3);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_from_entries_drops_extra_player() {
        let roster = Roster::from_entries(ids(&[0, 1, 0]));
        assert_eq!(roster.count_of(ParticipantId::PLAYER), 1);
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_clear() {
        let mut roster = Roster::from_entries(ids(&[0, 1]));
        roster.clear();
        assert!(roster.is_empty());
        assert!(!roster.contains(ParticipantId::PLAYER));
    }

    #[test]
    fn test_roster_serde() {
        let roster = Roster::from_entries(ids(&[0, 4, 4, 2]));
        let json = serde_json::to_string(&roster).unwrap();
        let back: Roster = serde_json::from_str(&json).unwrap();
        assert_eq!(roster, back);
    }
}

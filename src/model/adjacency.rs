use std::collections::BTreeMap;

use crate::model::city::CityId;
use crate::model::direction::Direction;

/// Per-city directional neighbor slots.
///
/// Every registered city holds exactly four slots (north/west/south/east).
/// The central invariant: if A's `north` slot references B, B's `south` slot
/// references A, and symmetrically for west/east. [`connect`] and
/// [`disconnect_all`] maintain this on every mutation.
///
/// BTreeMap for deterministic iteration.
///
/// [`connect`]: AdjacencyMap::connect
/// [`disconnect_all`]: AdjacencyMap::disconnect_all
#[derive(Debug, Clone, Default)]
pub struct AdjacencyMap {
    slots: BTreeMap<CityId, [Option<CityId>; 4]>,
}

impl AdjacencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the four empty slots for a newly registered city.
    ///
    /// # Panics
    /// Panics if `city` already has slots; the mutator calls this exactly
    /// once per registration.
    pub fn init_slots(&mut self, city: CityId) {
        let prev = self.slots.insert(city, [None; 4]);
        assert!(prev.is_none(), "init_slots: {city} already has slots");
    }

    pub fn contains(&self, city: CityId) -> bool {
        self.slots.contains_key(&city)
    }

    /// Set `a`'s `direction` slot to `b` and `b`'s opposite slot to `a`.
    ///
    /// Last write wins: any value previously held in either slot is
    /// overwritten without complaint. Returns `false` without touching
    /// anything when either city has no slot entry.
    pub fn connect(&mut self, a: CityId, b: CityId, direction: Direction) -> bool {
        if !self.slots.contains_key(&a) || !self.slots.contains_key(&b) {
            return false;
        }
        if let Some(slots) = self.slots.get_mut(&a) {
            slots[direction.index()] = Some(b);
        }
        if let Some(slots) = self.slots.get_mut(&b) {
            slots[direction.opposite().index()] = Some(a);
        }
        true
    }

    /// Clear every slot that points at `city`, on both sides of each link.
    ///
    /// A neighbor whose reciprocal slot was already cleared (or repointed by
    /// a later overwrite) is left alone, so the operation is idempotent and
    /// tolerant of partial prior cleanup. Self-links collapse to clearing
    /// the city's own slots.
    pub fn disconnect_all(&mut self, city: CityId) {
        let Some(slots) = self.slots.get(&city).copied() else {
            return;
        };
        for neighbor in slots.into_iter().flatten() {
            if neighbor == city {
                continue;
            }
            if let Some(back) = self.slots.get_mut(&neighbor) {
                for slot in back.iter_mut() {
                    if *slot == Some(city) {
                        *slot = None;
                    }
                }
            }
        }
        if let Some(own) = self.slots.get_mut(&city) {
            *own = [None; 4];
        }
    }

    /// Drop the slot entry for `city` entirely. Call after `disconnect_all`.
    pub fn remove(&mut self, city: CityId) {
        self.slots.remove(&city);
    }

    pub fn slot(&self, city: CityId, direction: Direction) -> Option<CityId> {
        self.slots.get(&city).and_then(|slots| slots[direction.index()])
    }

    /// Non-empty slot values in slot order.
    ///
    /// Duplicates are kept: a city linked in two directions appears twice,
    /// which gives it double weight when a neighbor is drawn uniformly.
    pub fn neighbors(&self, city: CityId) -> Vec<CityId> {
        self.slots
            .get(&city)
            .map(|slots| slots.iter().flatten().copied().collect())
            .unwrap_or_default()
    }

    pub fn has_any_neighbor(&self, city: CityId) -> bool {
        self.slots
            .get(&city)
            .is_some_and(|slots| slots.iter().any(Option::is_some))
    }
}

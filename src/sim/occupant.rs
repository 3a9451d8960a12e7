use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::model::CityId;

/// Identifier of one mobile occupant. Occupants are numbered 1..=N at
/// placement time.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize,
)]
#[serde(transparent)]
pub struct OccupantId(pub u32);

impl fmt::Display for OccupantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-occupant state machine.
///
/// `Moving` only exists inside a tick's movement phase: the plan marks each
/// mover `Moving(target)` before any arrival is committed, then every mover
/// lands as `Alive(target)`. `Destroyed` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccupantState {
    Alive(CityId),
    Moving(CityId),
    Destroyed,
}

/// Where everyone is.
///
/// `by_city` is the iteration structure: each roster `Vec` preserves arrival
/// order, which is the order destruction reports list occupants in.
/// `states` tracks the per-occupant machine, including the `Destroyed`
/// records that have already left `by_city`.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    pub states: BTreeMap<OccupantId, OccupantState>,
    pub by_city: BTreeMap<CityId, Vec<OccupantId>>,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put an occupant on a city, appending to the arrival roster.
    pub fn place(&mut self, occupant: OccupantId, city: CityId) {
        self.states.insert(occupant, OccupantState::Alive(city));
        self.by_city.entry(city).or_default().push(occupant);
    }

    /// Occupants currently alive (on some city).
    pub fn live_count(&self) -> usize {
        self.by_city.values().map(Vec::len).sum()
    }

    /// Arrival-ordered roster of a city; empty for unoccupied cities.
    pub fn occupants_at(&self, city: CityId) -> &[OccupantId] {
        self.by_city.get(&city).map_or(&[], |v| v.as_slice())
    }

    pub fn state_of(&self, occupant: OccupantId) -> Option<OccupantState> {
        self.states.get(&occupant).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_records_state_and_roster() {
        let mut occupancy = Occupancy::new();
        let city = CityId(1);
        occupancy.place(OccupantId(1), city);
        occupancy.place(OccupantId(2), city);

        assert_eq!(occupancy.live_count(), 2);
        assert_eq!(occupancy.occupants_at(city), &[OccupantId(1), OccupantId(2)]);
        assert_eq!(
            occupancy.state_of(OccupantId(1)),
            Some(OccupantState::Alive(city))
        );
    }

    #[test]
    fn rosters_preserve_arrival_order() {
        let mut occupancy = Occupancy::new();
        let city = CityId(7);
        for n in [3, 1, 2] {
            occupancy.place(OccupantId(n), city);
        }
        assert_eq!(
            occupancy.occupants_at(city),
            &[OccupantId(3), OccupantId(1), OccupantId(2)]
        );
    }

    #[test]
    fn unoccupied_city_has_empty_roster() {
        let occupancy = Occupancy::new();
        assert!(occupancy.occupants_at(CityId(1)).is_empty());
        assert_eq!(occupancy.live_count(), 0);
    }
}

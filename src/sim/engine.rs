use std::collections::BTreeMap;
use std::fmt;

use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::Serialize;

use crate::model::{CityId, SharedCityMap};
use crate::sim::occupant::{Occupancy, OccupantId, OccupantState};

/// Tick budget used when a config does not override it.
pub const DEFAULT_MAX_TICKS: u32 = 10_000;

/// Configuration for one invasion run.
///
/// The same map, config and seed always produce the same run.
#[derive(Debug, Clone)]
pub struct InvasionConfig {
    /// How many occupants to place at start.
    pub occupants: u32,
    /// Hard tick budget; the run may stop earlier (see [`run`]).
    pub max_ticks: u32,
    pub seed: u64,
}

impl InvasionConfig {
    pub fn new(occupants: u32, seed: u64) -> Self {
        Self {
            occupants,
            max_ticks: DEFAULT_MAX_TICKS,
            seed,
        }
    }
}

/// One city destroyed by simultaneous multi-occupancy.
///
/// `occupants` lists the ids involved in arrival order. `Display` renders
/// the announcement sentence, e.g.
/// `Bar has been destroyed by alien 3 and alien 5!`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DestructionEvent {
    pub tick: u32,
    pub city: String,
    pub occupants: Vec<OccupantId>,
}

impl fmt::Display for DestructionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} has been destroyed by ", self.city)?;
        for (i, occupant) in self.occupants.iter().enumerate() {
            if i > 0 {
                f.write_str(if i + 1 == self.occupants.len() {
                    " and "
                } else {
                    ", "
                })?;
            }
            write!(f, "alien {occupant}")?;
        }
        f.write_str("!")
    }
}

/// What a finished run produced: the ordered destruction events, how many
/// ticks actually executed, and how many occupants survived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvasionReport {
    pub events: Vec<DestructionEvent>,
    pub ticks: u32,
    pub survivors: u32,
}

/// Place occupants 1..=count, each on an independently chosen uniform-random
/// currently registered city. Overlap is allowed; nothing is destroyed until
/// the first tick's destruction phase looks.
pub fn place_occupants(
    map: &SharedCityMap,
    count: u32,
    rng: &mut dyn RngCore,
) -> Occupancy {
    let ids = map.read(|m| m.city_ids());
    let mut occupancy = Occupancy::new();
    if ids.is_empty() {
        return occupancy;
    }
    for n in 1..=count {
        let city = ids[rng.random_range(0..ids.len())];
        occupancy.place(OccupantId(n), city);
    }
    occupancy
}

/// Execute one tick: movement phase, then destruction phase.
///
/// Returns the destruction events of this tick, in city-id order.
pub fn step(
    map: &SharedCityMap,
    occupancy: &mut Occupancy,
    rng: &mut dyn RngCore,
    tick: u32,
) -> Vec<DestructionEvent> {
    // -- Movement phase --
    //
    // The plan is computed from the start-of-tick rosters under one read
    // section and committed into a fresh roster map, so nothing is mutated
    // mid-scan and no occupant moves twice. Every occupant of a city with a
    // neighbor draws its own target (duplicate slots weigh double); cities
    // without neighbors keep their rosters as-is.
    let mut next: BTreeMap<CityId, Vec<OccupantId>> = BTreeMap::new();
    let mut moves: Vec<(OccupantId, CityId)> = Vec::new();
    map.read(|m| {
        for (&city, residents) in &occupancy.by_city {
            let neighbors = m.neighbors(city);
            if neighbors.is_empty() {
                next.entry(city).or_default().extend(residents.iter().copied());
            } else {
                for &occupant in residents {
                    let target = neighbors[rng.random_range(0..neighbors.len())];
                    moves.push((occupant, target));
                }
            }
        }
    });
    for &(occupant, target) in &moves {
        occupancy
            .states
            .insert(occupant, OccupantState::Moving(target));
    }
    for (occupant, target) in moves {
        next.entry(target).or_default().push(occupant);
        occupancy
            .states
            .insert(occupant, OccupantState::Alive(target));
    }
    occupancy.by_city = next;

    // -- Destruction phase --
    let doomed: Vec<CityId> = occupancy
        .by_city
        .iter()
        .filter(|(_, roster)| roster.len() > 1)
        .map(|(&city, _)| city)
        .collect();

    let mut events = Vec::with_capacity(doomed.len());
    for city in doomed {
        let Some(occupants) = occupancy.by_city.remove(&city) else {
            continue;
        };
        let Some(name) = map.write(|m| m.remove_city_id(city)) else {
            panic!("destruction phase: occupied {city} is not in the map");
        };
        for &occupant in &occupants {
            occupancy.states.insert(occupant, OccupantState::Destroyed);
        }
        tracing::debug!(city = %name, occupants = occupants.len(), "city destroyed");
        events.push(DestructionEvent {
            tick,
            city: name,
            occupants,
        });
    }
    events
}

/// Run a full invasion: seed one generator, place occupants, then tick until
/// the budget runs out or no further destruction is reachable.
///
/// Early termination: after a tick, the loop stops when fewer than two
/// occupants remain alive, or when no occupied city has a neighbor left; in
/// either case the state can never change again. The first tick always
/// executes, so occupants seeded together on an isolated city are still
/// caught by the first destruction phase.
pub fn run(map: &SharedCityMap, config: &InvasionConfig) -> InvasionReport {
    if config.occupants == 0 || map.city_count() == 0 {
        return InvasionReport {
            events: Vec::new(),
            ticks: 0,
            survivors: 0,
        };
    }

    let mut rng = SmallRng::seed_from_u64(config.seed);
    let mut occupancy = place_occupants(map, config.occupants, &mut rng);
    let mut events = Vec::new();
    let mut ticks = 0;

    for tick in 1..=config.max_ticks {
        events.extend(step(map, &mut occupancy, &mut rng, tick));
        ticks = tick;

        if occupancy.live_count() < 2 {
            break;
        }
        let any_mobile =
            map.read(|m| occupancy.by_city.keys().any(|&city| m.has_any_neighbor(city)));
        if !any_mobile {
            break;
        }
    }

    let survivors = occupancy.live_count() as u32;
    InvasionReport {
        events,
        ticks,
        survivors,
    }
}

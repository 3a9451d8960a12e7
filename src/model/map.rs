use std::fmt;

use serde::Serialize;

use crate::error::MapError;
use crate::model::adjacency::AdjacencyMap;
use crate::model::city::CityId;
use crate::model::direction::Direction;
use crate::model::registry::CityRegistry;

/// The road network: a [`CityRegistry`] plus an [`AdjacencyMap`], mutated
/// together so neither can be observed half-updated through `&CityMap`.
///
/// For cross-thread access wrap it in
/// [`SharedCityMap`](crate::model::SharedCityMap), which puts every
/// operation behind one readers-writer lock.
#[derive(Debug, Clone, Default)]
pub struct CityMap {
    registry: CityRegistry,
    adjacency: AdjacencyMap,
}

impl CityMap {
    pub fn new() -> Self {
        Self {
            registry: CityRegistry::new(),
            adjacency: AdjacencyMap::new(),
        }
    }

    /// Register a city and initialize its four empty slots.
    pub fn add_city(&mut self, name: &str) -> Result<CityId, MapError> {
        let id = self.registry.register(name)?;
        self.adjacency.init_slots(id);
        Ok(id)
    }

    /// Connect `a` to `b` in `direction`, mirroring the opposite slot on `b`.
    ///
    /// Overwrites whatever either slot held (last write wins). Fails with
    /// [`MapError::UnknownCity`] naming the missing city.
    pub fn add_connection(
        &mut self,
        a: &str,
        b: &str,
        direction: Direction,
    ) -> Result<(), MapError> {
        let id_a = self
            .registry
            .lookup(a)
            .ok_or_else(|| MapError::UnknownCity(a.to_string()))?;
        let id_b = self
            .registry
            .lookup(b)
            .ok_or_else(|| MapError::UnknownCity(b.to_string()))?;
        let linked = self.adjacency.connect(id_a, id_b, direction);
        assert!(linked, "add_connection: registered city lost its slots");
        Ok(())
    }

    /// Remove a city and every connection touching it.
    ///
    /// Returns `false` (silent no-op) when the name is not registered.
    pub fn remove_city(&mut self, name: &str) -> bool {
        match self.registry.lookup(name) {
            Some(id) => {
                self.remove_city_id(id);
                true
            }
            None => false,
        }
    }

    /// Id-keyed removal used by the simulation. Returns the removed name.
    pub fn remove_city_id(&mut self, id: CityId) -> Option<String> {
        let name = self.registry.name_of(id)?.to_string();
        self.adjacency.disconnect_all(id);
        self.adjacency.remove(id);
        self.registry.unregister(&name);
        Some(name)
    }

    pub fn lookup(&self, name: &str) -> Option<CityId> {
        self.registry.lookup(name)
    }

    pub fn name_of(&self, id: CityId) -> Option<&str> {
        self.registry.name_of(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.registry.lookup(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    /// City ids in registration order.
    pub fn city_ids(&self) -> Vec<CityId> {
        self.registry.ids().collect()
    }

    /// City names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.names()
    }

    pub fn slot(&self, id: CityId, direction: Direction) -> Option<CityId> {
        self.adjacency.slot(id, direction)
    }

    /// Non-empty neighbor slots of `id`, duplicates kept (see
    /// [`AdjacencyMap::neighbors`]).
    pub fn neighbors(&self, id: CityId) -> Vec<CityId> {
        self.adjacency.neighbors(id)
    }

    pub fn has_any_neighbor(&self, id: CityId) -> bool {
        self.adjacency.has_any_neighbor(id)
    }

    /// A deterministic view of the whole map, cities sorted by name.
    pub fn snapshot(&self) -> MapSnapshot {
        let mut cities = Vec::with_capacity(self.registry.len());
        for (name, id) in self.registry.iter_by_name() {
            let slot_name = |direction: Direction| {
                self.adjacency
                    .slot(id, direction)
                    .and_then(|n| self.registry.name_of(n))
                    .map(String::from)
            };
            cities.push(CitySnapshot {
                name: name.to_string(),
                north: slot_name(Direction::North),
                west: slot_name(Direction::West),
                south: slot_name(Direction::South),
                east: slot_name(Direction::East),
            });
        }
        MapSnapshot { cities }
    }
}

/// One city's row in a [`MapSnapshot`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CitySnapshot {
    pub name: String,
    pub north: Option<String>,
    pub west: Option<String>,
    pub south: Option<String>,
    pub east: Option<String>,
}

/// Deterministic export of the map, sorted by city name.
///
/// `Display` renders one line per city:
/// `CITY: <name>  CONNECTIONS: north=<n|none> west=<w|none> south=<s|none> east=<e|none>`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapSnapshot {
    pub cities: Vec<CitySnapshot>,
}

fn slot_or_none(slot: &Option<String>) -> &str {
    slot.as_deref().unwrap_or("none")
}

impl fmt::Display for MapSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for city in &self.cities {
            writeln!(
                f,
                "CITY: {}  CONNECTIONS: north={} west={} south={} east={}",
                city.name,
                slot_or_none(&city.north),
                slot_or_none(&city.west),
                slot_or_none(&city.south),
                slot_or_none(&city.east),
            )?;
        }
        Ok(())
    }
}

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::MapError;
use crate::model::city::CityId;
use crate::model::direction::Direction;
use crate::model::map::{CityMap, MapSnapshot};

/// A [`CityMap`] behind one readers-writer lock.
///
/// Structural mutations take the write lock; queries take the read lock, so
/// external readers (printing, lookups) can run concurrently with each other
/// while the simulation thread mutates between them. Guards never escape
/// this module, so every lock is released on every path.
///
/// Poisoning is absorbed: the map is plain data and structurally valid
/// between operations, so a panicked writer in another thread does not wedge
/// the graph for everyone else.
#[derive(Debug, Default)]
pub struct SharedCityMap {
    inner: RwLock<CityMap>,
}

impl SharedCityMap {
    pub fn new(map: CityMap) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }

    fn read_guard(&self) -> RwLockReadGuard<'_, CityMap> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, CityMap> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` under the read lock. Keep `f` small: the lock is held for
    /// exactly its duration.
    pub fn read<R>(&self, f: impl FnOnce(&CityMap) -> R) -> R {
        f(&self.read_guard())
    }

    /// Run `f` under the write lock; `f`'s mutations are one atomic unit as
    /// seen by readers.
    pub fn write<R>(&self, f: impl FnOnce(&mut CityMap) -> R) -> R {
        f(&mut self.write_guard())
    }

    pub fn add_city(&self, name: &str) -> Result<CityId, MapError> {
        self.write_guard().add_city(name)
    }

    pub fn add_connection(&self, a: &str, b: &str, direction: Direction) -> Result<(), MapError> {
        self.write_guard().add_connection(a, b, direction)
    }

    pub fn remove_city(&self, name: &str) -> bool {
        self.write_guard().remove_city(name)
    }

    pub fn lookup(&self, name: &str) -> Option<CityId> {
        self.read_guard().lookup(name)
    }

    pub fn city_count(&self) -> usize {
        self.read_guard().len()
    }

    pub fn snapshot(&self) -> MapSnapshot {
        self.read_guard().snapshot()
    }

    pub fn into_inner(self) -> CityMap {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<CityMap> for SharedCityMap {
    fn from(map: CityMap) -> Self {
        Self::new(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mutator_api_round_trips() {
        let shared = SharedCityMap::default();
        shared.add_city("Foo").unwrap();
        shared.add_city("Bar").unwrap();
        shared.add_connection("Foo", "Bar", Direction::West).unwrap();

        assert!(shared.lookup("Foo").is_some());
        assert_eq!(shared.city_count(), 2);

        assert!(shared.remove_city("Bar"));
        assert!(!shared.remove_city("Bar"));
        let snapshot = shared.snapshot();
        assert_eq!(snapshot.cities.len(), 1);
        assert_eq!(snapshot.cities[0].west, None);
    }

    #[test]
    fn unknown_city_error_releases_the_lock() {
        let shared = SharedCityMap::default();
        shared.add_city("Foo").unwrap();
        assert!(shared
            .add_connection("Foo", "Ghost", Direction::North)
            .is_err());
        // A failed mutation must not hold the write lock.
        assert_eq!(shared.city_count(), 1);
    }

    #[test]
    fn readers_run_while_a_writer_mutates() {
        let shared = SharedCityMap::default();
        for name in ["A", "B", "C", "D", "E", "F", "G", "H"] {
            shared.add_city(name).unwrap();
        }
        shared.add_connection("A", "B", Direction::North).unwrap();
        shared.add_connection("C", "D", Direction::West).unwrap();

        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let snapshot = shared.snapshot();
                        // Readers may see any prefix of the removals, but
                        // never a dangling connection.
                        for city in &snapshot.cities {
                            for slot in [&city.north, &city.west, &city.south, &city.east] {
                                if let Some(neighbor) = slot {
                                    assert!(
                                        snapshot.cities.iter().any(|c| &c.name == neighbor),
                                        "dangling reference to {neighbor}"
                                    );
                                }
                            }
                        }
                    }
                });
            }
            for name in ["B", "D", "F", "H"] {
                shared.remove_city(name);
            }
        });

        assert_eq!(shared.city_count(), 4);
    }
}

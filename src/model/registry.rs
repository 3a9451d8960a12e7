use std::collections::BTreeMap;

use crate::error::MapError;
use crate::model::city::{City, CityId};

/// Owns the name → city mapping. Pure lookup and storage; adjacency lives in
/// [`AdjacencyMap`](crate::model::AdjacencyMap).
///
/// Both indexes are BTreeMaps so iteration is deterministic: `ids()` yields
/// registration order, `names()` lexicographic order.
#[derive(Debug, Clone)]
pub struct CityRegistry {
    cities: BTreeMap<CityId, City>,
    by_name: BTreeMap<String, CityId>,
    next_id: u64,
}

impl Default for CityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CityRegistry {
    pub fn new() -> Self {
        Self {
            cities: BTreeMap::new(),
            by_name: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Register a new city under `name` and return its id.
    ///
    /// Re-registering an existing name is an error; callers that want
    /// get-or-create semantics (the map loader) check with [`lookup`] first.
    ///
    /// [`lookup`]: CityRegistry::lookup
    pub fn register(&mut self, name: &str) -> Result<CityId, MapError> {
        if self.by_name.contains_key(name) {
            return Err(MapError::DuplicateCity(name.to_string()));
        }
        let id = CityId(self.next_id);
        self.next_id += 1;
        self.by_name.insert(name.to_string(), id);
        self.cities.insert(
            id,
            City {
                id,
                name: name.to_string(),
            },
        );
        Ok(id)
    }

    pub fn lookup(&self, name: &str) -> Option<CityId> {
        self.by_name.get(name).copied()
    }

    pub fn get(&self, id: CityId) -> Option<&City> {
        self.cities.get(&id)
    }

    pub fn name_of(&self, id: CityId) -> Option<&str> {
        self.cities.get(&id).map(|c| c.name.as_str())
    }

    /// Remove the entry for `name`. Silently a no-op when absent.
    ///
    /// No adjacency side effects: callers clean slots first.
    pub fn unregister(&mut self, name: &str) -> Option<CityId> {
        let id = self.by_name.remove(name)?;
        self.cities.remove(&id);
        Some(id)
    }

    /// City names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// `(name, id)` pairs in lexicographic name order.
    pub fn iter_by_name(&self) -> impl Iterator<Item = (&str, CityId)> {
        self.by_name.iter().map(|(name, &id)| (name.as_str(), id))
    }

    /// City ids in registration order.
    pub fn ids(&self) -> impl Iterator<Item = CityId> + '_ {
        self.cities.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.cities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cities.is_empty()
    }
}

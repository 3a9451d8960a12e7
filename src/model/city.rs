use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier for a registered city.
///
/// Allocated once at registration and never reused, so adjacency slots and
/// occupant bookkeeping key on it rather than on value equality of a city
/// struct, and removals of other cities can never alias it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CityId(pub u64);

impl fmt::Display for CityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "city#{}", self.0)
    }
}

/// A node in the road network. Immutable once registered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
}

pub mod adjacency;
pub mod city;
pub mod direction;
pub mod map;
pub mod registry;
pub mod shared;

pub use adjacency::AdjacencyMap;
pub use city::{City, CityId};
pub use direction::Direction;
pub use map::{CityMap, CitySnapshot, MapSnapshot};
pub use registry::CityRegistry;
pub use shared::SharedCityMap;

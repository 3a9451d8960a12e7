pub mod error;
pub mod flush;
pub mod loader;
pub mod model;
pub mod sim;

pub use error::MapError;
pub use loader::{load_map, parse_map};
pub use model::{City, CityId, CityMap, Direction, MapSnapshot, SharedCityMap};
pub use sim::{DestructionEvent, InvasionConfig, InvasionReport, OccupantId, run};

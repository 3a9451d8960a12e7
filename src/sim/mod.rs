pub mod engine;
pub mod occupant;

pub use engine::{
    DEFAULT_MAX_TICKS, DestructionEvent, InvasionConfig, InvasionReport, place_occupants, run,
    step,
};
pub use occupant::{Occupancy, OccupantId, OccupantState};

use std::fmt;

use serde::de;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One of the four compass directions a road can leave a city in.
///
/// Variant order matches the rendered connection order
/// (`north west south east`), so slot indexes and output agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    West,
    South,
    East,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::West,
        Direction::South,
        Direction::East,
    ];

    /// The mirrored direction: a road north out of A enters B from the south.
    pub fn opposite(self) -> Self {
        match self {
            Direction::North => Direction::South,
            Direction::West => Direction::East,
            Direction::South => Direction::North,
            Direction::East => Direction::West,
        }
    }

    /// Parse one of the four lowercase tokens. Anything else is `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "north" => Some(Direction::North),
            "west" => Some(Direction::West),
            "south" => Some(Direction::South),
            "east" => Some(Direction::East),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::West => "west",
            Direction::South => "south",
            Direction::East => "east",
        }
    }

    /// Slot position inside a city's `[Option<CityId>; 4]` adjacency entry.
    pub(crate) fn index(self) -> usize {
        match self {
            Direction::North => 0,
            Direction::West => 1,
            Direction::South => 2,
            Direction::East => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Direction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Direction::parse(&s)
            .ok_or_else(|| de::Error::custom(format!("unknown direction `{s}`")))
    }
}

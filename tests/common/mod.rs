use invasion_sim::{SharedCityMap, parse_map};

/// The classic five-city cross: Foo in the middle, one neighbor per
/// direction, Bar reachable from Bee as well.
pub const CROSS_MAP: &str = "\
Foo north=Bar west=Baz south=Qu-ux east=Bee
Bar south=Foo west=Bee
";

/// Three cities in a row; anything starting on X and Z meets in Y.
pub const LINEAR_MAP: &str = "\
X east=Y
Y east=Z
";

pub fn cross_map() -> SharedCityMap {
    SharedCityMap::new(parse_map(CROSS_MAP).expect("cross map is well-formed"))
}

pub fn linear_map() -> SharedCityMap {
    SharedCityMap::new(parse_map(LINEAR_MAP).expect("linear map is well-formed"))
}

use std::fs;
use std::path::Path;

use crate::error::MapError;
use crate::model::{CityMap, Direction};

/// Parse a map description into a [`CityMap`].
///
/// One city per line: `CITYNAME DIR=NEIGHBOR ...`, fields space-separated,
/// `DIR` one of `north`/`west`/`south`/`east`. Referenced neighbors are
/// created on first mention, so lines may name cities that get their own
/// line later (or never). Blank lines are skipped.
///
/// Any malformed line aborts the load with
/// [`MapError::MalformedLine`] carrying the 1-based line number.
pub fn parse_map(text: &str) -> Result<CityMap, MapError> {
    let mut map = CityMap::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let mut fields = raw.split_whitespace();
        let Some(name) = fields.next() else {
            continue; // blank line
        };
        if name.contains('=') {
            return Err(MapError::MalformedLine {
                line,
                reason: format!("expected a city name, got `{name}`"),
            });
        }
        ensure_city(&mut map, name)?;

        for field in fields {
            let Some((token, neighbor)) = field.split_once('=') else {
                return Err(MapError::MalformedLine {
                    line,
                    reason: format!("expected DIR=NEIGHBOR, got `{field}`"),
                });
            };
            let Some(direction) = Direction::parse(token) else {
                return Err(MapError::MalformedLine {
                    line,
                    reason: format!("unknown direction `{token}`"),
                });
            };
            if neighbor.is_empty() {
                return Err(MapError::MalformedLine {
                    line,
                    reason: format!("missing neighbor name after `{token}=`"),
                });
            }
            ensure_city(&mut map, neighbor)?;
            map.add_connection(name, neighbor, direction)?;
        }
    }

    Ok(map)
}

/// Read and parse a map description file.
pub fn load_map(path: impl AsRef<Path>) -> Result<CityMap, MapError> {
    let text = fs::read_to_string(path)?;
    parse_map(&text)
}

/// Lookup-first registration, so repeated mentions of a name merge instead
/// of tripping the duplicate-city error.
fn ensure_city(map: &mut CityMap, name: &str) -> Result<(), MapError> {
    if map.lookup(name).is_none() {
        map.add_city(name)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_line_with_all_four_directions() {
        let map = parse_map("Foo north=Bar west=Baz south=Qu-ux east=Bee\n").unwrap();
        assert_eq!(map.len(), 5);
        let foo = map.lookup("Foo").unwrap();
        assert_eq!(map.slot(foo, Direction::North), map.lookup("Bar"));
        assert_eq!(map.slot(foo, Direction::West), map.lookup("Baz"));
        assert_eq!(map.slot(foo, Direction::South), map.lookup("Qu-ux"));
        assert_eq!(map.slot(foo, Direction::East), map.lookup("Bee"));
    }

    #[test]
    fn neighbors_created_before_their_own_line() {
        let text = "Foo north=Bar\nBar south=Foo west=Bee\n";
        let map = parse_map(text).unwrap();
        assert_eq!(map.len(), 3);
        let bar = map.lookup("Bar").unwrap();
        assert_eq!(map.slot(bar, Direction::South), map.lookup("Foo"));
        assert_eq!(map.slot(bar, Direction::West), map.lookup("Bee"));
    }

    #[test]
    fn mirrored_slots_follow_from_each_line() {
        let map = parse_map("Foo east=Bee\n").unwrap();
        let bee = map.lookup("Bee").unwrap();
        assert_eq!(map.slot(bee, Direction::West), map.lookup("Foo"));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let map = parse_map("\nFoo north=Bar\n\n   \nBaz\n").unwrap();
        assert_eq!(map.len(), 3);
        assert!(map.contains("Baz"));
    }

    #[test]
    fn city_with_no_connections_is_fine() {
        let map = parse_map("Hermit\n").unwrap();
        let hermit = map.lookup("Hermit").unwrap();
        assert!(!map.has_any_neighbor(hermit));
    }

    #[test]
    fn unknown_direction_reports_the_line() {
        let err = parse_map("Foo north=Bar\nBaz up=Foo\n").unwrap_err();
        match err {
            MapError::MalformedLine { line, reason } => {
                assert_eq!(line, 2);
                assert!(reason.contains("up"), "reason was: {reason}");
            }
            other => panic!("expected MalformedLine, got {other:?}"),
        }
    }

    #[test]
    fn field_without_equals_is_malformed() {
        let err = parse_map("Foo north\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn line_starting_with_a_connection_is_malformed() {
        let err = parse_map("north=Bar\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn empty_neighbor_name_is_malformed() {
        let err = parse_map("Foo north=\n").unwrap_err();
        assert!(matches!(err, MapError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn repeated_mentions_of_a_city_merge() {
        let text = "Foo north=Bar\nBar east=Baz\nFoo west=Baz\n";
        let map = parse_map(text).unwrap();
        assert_eq!(map.len(), 3);
        let foo = map.lookup("Foo").unwrap();
        assert_eq!(map.slot(foo, Direction::North), map.lookup("Bar"));
        assert_eq!(map.slot(foo, Direction::West), map.lookup("Baz"));
    }
}

use invasion_sim::{InvasionConfig, SharedCityMap, parse_map, sim};

const MAP: &str = "\
Foo north=Bar west=Baz south=Qu-ux east=Bee
Bar south=Foo west=Bee
Baz north=Qu-ux
Bee north=Diq
";

fn main() {
    let map = parse_map(MAP).expect("demo map is well-formed");
    let shared = SharedCityMap::new(map);

    let report = sim::run(&shared, &InvasionConfig::new(8, 42));
    for event in &report.events {
        eprintln!("[tick {:>4}] {event}", event.tick);
    }
    eprintln!(
        "ran {} ticks: {} destroyed, {} survivors",
        report.ticks,
        report.events.len(),
        report.survivors
    );
    eprint!("{}", shared.snapshot());
}

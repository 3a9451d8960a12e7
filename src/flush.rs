use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::model::MapSnapshot;
use crate::sim::InvasionReport;

/// Write an iterator of serializable items to a JSONL file (one JSON object
/// per line).
fn write_jsonl<T: Serialize>(path: &Path, items: impl Iterator<Item = T>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for item in items {
        serde_json::to_writer(&mut writer, &item)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()
}

/// Flush a finished run to JSONL files in the given output directory.
///
/// Creates the directory if it does not exist. Writes 2 files:
/// - `events.jsonl`: one destruction event per line, in run order
/// - `cities.jsonl`: one surviving city per line, sorted by name
pub fn flush_report(
    report: &InvasionReport,
    snapshot: &MapSnapshot,
    output_dir: &Path,
) -> io::Result<()> {
    fs::create_dir_all(output_dir)?;

    write_jsonl(&output_dir.join("events.jsonl"), report.events.iter())?;
    write_jsonl(&output_dir.join("cities.jsonl"), snapshot.cities.iter())?;

    Ok(())
}

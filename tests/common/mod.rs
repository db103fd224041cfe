use std::io::Error;
use std::path::Path;

/// Writes a scenario file with the `at,kind,value` header.
pub fn write_scenario(path: &Path, rows: &[(&str, &str, &str)]) -> Result<(), Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    wtr.write_record(["at", "kind", "value"])?;

    for (at, kind, value) in rows {
        wtr.write_record([*at, *kind, *value])?;
    }

    wtr.flush()?;
    Ok(())
}

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::{de::DeserializeOwned, Serialize};

/// Serializes an object to a JSON file.
pub fn object_to_json<T: Serialize, P: AsRef<Path>>(output_path: P, object: &T) -> Result<()> {
    let output_path = output_path.as_ref();
    let j = serde_json::to_string_pretty(object)?;
    std::fs::write(output_path, j).with_context(|| format!("writing {}", output_path.display()))
}

/// Deserializes an object from a JSON file.
pub fn object_from_json<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<T> {
    let file_path = file_path.as_ref();
    let contents = std::fs::read_to_string(file_path)
        .with_context(|| format!("reading {}", file_path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing {}", file_path.display()))
}

/// Reads one JSON value per line. Blank lines are skipped.
pub fn read_json_lines<T: DeserializeOwned, P: AsRef<Path>>(file_path: P) -> Result<Vec<T>> {
    let file_path = file_path.as_ref();
    let file = File::open(file_path).with_context(|| format!("opening {}", file_path.display()))?;
    let mut values = Vec::new();
    for (line_idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let v = serde_json::from_str(&line)
            .with_context(|| format!("{}:{}: bad record", file_path.display(), line_idx + 1))?;
        values.push(v);
    }
    Ok(values)
}

pub fn write_json_lines<T: Serialize, P: AsRef<Path>>(output_path: P, values: &[T]) -> Result<()> {
    let output_path = output_path.as_ref();
    let file =
        File::create(output_path).with_context(|| format!("creating {}", output_path.display()))?;
    let mut writer = BufWriter::new(file);
    for v in values {
        serde_json::to_writer(&mut writer, v)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub mod records;

pub use records::{read_records, read_records_from_path};

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

/// Read a JSON object of metric id to number, e.g. goals or current values
pub fn read_value_map(path: &Path) -> Result<BTreeMap<String, f64>> {
    let contents = read_file(path)?;
    serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON object of numbers", path.display()))
}

/// Write to `path` when given, stdout otherwise
pub fn emit(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => write_file(path, content),
        None => {
            println!("{}", content);
            Ok(())
        }
    }
}

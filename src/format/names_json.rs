//! The `{"names": [...]}` JSON format.

use std::path::Path;

use serde_json::{Map, Value};

use crate::format::error::LoadError;
use crate::model::{NameDataFile, NameRecord, PERCENT_MAX};

/// File extension accepted by [`load_names_file`].
pub const NAMES_EXTENSION: &str = "json";

/// Example of a valid file, shown to users when an upload is rejected.
pub const SAMPLE_JSON: &str = r#"{
  "names": [
    { "name": "John Doe", "x": 30, "y": 40 },
    { "name": "Jane Smith", "x": 70, "y": 60 }
  ]
}"#;

/// Check if a path has the names file extension.
pub fn is_names_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(NAMES_EXTENSION))
}

/// Read and validate a names file from disk.
pub fn load_names_file(path: &Path) -> Result<(String, NameDataFile), LoadError> {
    if !is_names_file(path) {
        return Err(LoadError::UnsupportedFileType {
            path: path.to_path_buf(),
        });
    }

    let text = std::fs::read_to_string(path)?;
    let data = parse_names_json(&text)?;
    log::debug!("Loaded {} names from {:?}", data.len(), path);
    Ok((text, data))
}

/// Parse and validate names JSON.
///
/// Validation runs over the whole document before anything is returned;
/// the first violation rejects the file.
pub fn parse_names_json(text: &str) -> Result<NameDataFile, LoadError> {
    let value: Value = serde_json::from_str(text)?;

    let entries = value
        .get("names")
        .and_then(Value::as_array)
        .ok_or_else(|| {
            LoadError::schema(r#"expected an object with a "names" array"#)
        })?;

    let names = entries
        .iter()
        .enumerate()
        .map(|(index, entry)| parse_record(index, entry))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NameDataFile::new(names))
}

fn parse_record(index: usize, entry: &Value) -> Result<NameRecord, LoadError> {
    let fields = entry.as_object().ok_or_else(|| {
        LoadError::schema(format!("names[{}] must be an object", index))
    })?;

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| LoadError::schema(format!("names[{}].name must be a string", index)))?;
    if name.is_empty() {
        return Err(LoadError::schema(format!(
            "names[{}].name must not be empty",
            index
        )));
    }

    let x = percent_field(fields, index, "x")?;
    let y = percent_field(fields, index, "y")?;

    Ok(NameRecord::new(name, x, y))
}

fn percent_field(fields: &Map<String, Value>, index: usize, key: &str) -> Result<f32, LoadError> {
    let value = fields
        .get(key)
        .and_then(Value::as_f64)
        .ok_or_else(|| LoadError::schema(format!("names[{}].{} must be a number", index, key)))?;

    if !(0.0..=f64::from(PERCENT_MAX)).contains(&value) {
        return Err(LoadError::schema(format!(
            "names[{}].{} must be between 0 and 100, got {}",
            index, key, value
        )));
    }

    Ok(value as f32)
}

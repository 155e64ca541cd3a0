//! JSON/CSV file helpers and map manipulation (flatten, merge, filter).
//!
//! JSON values are `serde_json::Value` throughout; CSV cells are plain
//! strings with no type coercion in either direction.

use crate::error::DataError;
use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

pub type JsonMap = Map<String, Value>;

fn io_err(path: &Path, source: std::io::Error) -> DataError {
    DataError::Io {
        path: path.display().to_string(),
        source,
    }
}

/// Read and parse a JSON file.
pub fn read_json(path: &Path) -> Result<Value, DataError> {
    let content = fs::read_to_string(path).map_err(|e| io_err(path, e))?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a value as pretty-printed JSON (2-space indent, UTF-8 preserved
/// unescaped) with a trailing newline.
pub fn write_json(value: &Value, path: &Path) -> Result<(), DataError> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    fs::write(path, content).map_err(|e| io_err(path, e))
}

/// Render a value as a pretty-printed JSON string.
pub fn pretty_json(value: &Value) -> Result<String, DataError> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Read a CSV file with a header row into one map per record, keyed by the
/// header names. Cell values are strings.
pub fn read_csv(path: &Path) -> Result<Vec<JsonMap>, DataError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;
        let mut map = JsonMap::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            map.insert(header.to_string(), Value::String(cell.to_string()));
        }
        records.push(map);
    }
    Ok(records)
}

/// Read a headerless CSV file as raw rows of strings.
pub fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>, DataError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    let mut rows = Vec::new();
    for row in reader.records() {
        let row = row?;
        rows.push(row.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Write records to CSV with a header row. Column order comes from
/// `fieldnames` when given, otherwise from the first record. Missing fields
/// are written as empty cells; values are stringified without quoting games.
pub fn write_csv(
    records: &[JsonMap],
    path: &Path,
    fieldnames: Option<Vec<String>>,
) -> Result<(), DataError> {
    let first = records.first().ok_or(DataError::EmptyInput)?;
    let headers: Vec<String> =
        fieldnames.unwrap_or_else(|| first.keys().cloned().collect());

    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(&headers)?;
    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(h).map(cell_string).unwrap_or_default())
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush().map_err(|e| io_err(path, e))?;
    Ok(())
}

/// Convert a JSON file whose root is an array of flat objects to CSV.
pub fn json_to_csv(json_path: &Path, csv_path: &Path) -> Result<(), DataError> {
    let value = read_json(json_path)?;
    let array = value.as_array().ok_or(DataError::NotAnArray)?;
    let records: Vec<JsonMap> = array
        .iter()
        .map(|v| v.as_object().cloned().ok_or(DataError::NotAnArray))
        .collect::<Result<_, _>>()?;
    write_csv(&records, csv_path, None)
}

/// Convert a CSV file (with header) to a JSON array of objects.
pub fn csv_to_json(csv_path: &Path, json_path: &Path) -> Result<(), DataError> {
    let records = read_csv(csv_path)?;
    if records.is_empty() {
        return Err(DataError::EmptyInput);
    }
    let value = Value::Array(records.into_iter().map(Value::Object).collect());
    write_json(&value, json_path)
}

/// Flatten a nested object into a single level with compound keys.
///
/// Nested objects recurse with their key appended through `sep`; every other
/// value (arrays included) is a leaf and is carried over as-is.
pub fn flatten_dict(map: &JsonMap, sep: &str) -> JsonMap {
    let mut result = JsonMap::new();
    flatten_into(map, "", sep, &mut result);
    result
}

fn flatten_into(map: &JsonMap, parent: &str, sep: &str, out: &mut JsonMap) {
    for (key, value) in map {
        let path = if parent.is_empty() {
            key.clone()
        } else {
            format!("{parent}{sep}{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &path, sep, out),
            other => {
                out.insert(path, other.clone());
            }
        }
    }
}

/// Shallow-merge maps; later maps overwrite earlier ones on key conflicts.
pub fn merge_dicts(maps: &[JsonMap]) -> JsonMap {
    let mut result = JsonMap::new();
    for map in maps {
        for (key, value) in map {
            result.insert(key.clone(), value.clone());
        }
    }
    result
}

/// Keep only the entries whose key appears in the allowlist. Keys that are
/// absent from the map are ignored, not inserted as null.
pub fn filter_dict(map: &JsonMap, keys: &[String]) -> JsonMap {
    map.iter()
        .filter(|(k, _)| keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

fn cell_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

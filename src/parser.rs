//! Catalog loading from JSON or CSV.
//!
//! JSON catalogs are an array of objects in either the nested or the flat
//! rating shape. CSV catalogs use the flat shape with a header row; cells
//! that read as numbers become numbers so the normalizer sees typed values.

use serde_json::{Map, Number, Value};
use std::path::Path;
use tracing::debug;

use crate::error::CatalogError;
use crate::record::ApplicationRecord;

/// CSV columns kept as text even when they look numeric.
const TEXT_COLUMNS: &[&str] = &["name", "appId", "appName", "category"];

/// Decodes a JSON catalog into records, preserving order.
///
/// # Errors
///
/// Returns an error if the bytes are not JSON, the top level is not an
/// array, or an element is not an object.
pub fn parse_catalog_json(bytes: &[u8]) -> Result<Vec<ApplicationRecord>, CatalogError> {
    let value: Value = serde_json::from_slice(bytes)?;
    let Value::Array(rows) = value else {
        return Err(CatalogError::NotAnArray);
    };

    rows.iter()
        .enumerate()
        .map(|(index, row)| {
            if row.is_object() {
                Ok(ApplicationRecord::from_raw(row))
            } else {
                Err(CatalogError::NotAnObject { index })
            }
        })
        .collect()
}

/// Decodes a CSV catalog with a header row into records.
pub fn parse_catalog_csv(bytes: &[u8]) -> Result<Vec<ApplicationRecord>, CatalogError> {
    let mut rdr = csv::Reader::from_reader(bytes);
    let headers = rdr.headers()?.clone();

    let mut records = Vec::new();
    for result in rdr.records() {
        let row = result?;
        let object: Map<String, Value> = headers
            .iter()
            .zip(row.iter())
            .filter(|(_, cell)| !cell.trim().is_empty())
            .map(|(header, cell)| {
                let value = if TEXT_COLUMNS.contains(&header) {
                    Value::String(cell.to_string())
                } else {
                    cell_value(cell)
                };
                (header.to_string(), value)
            })
            .collect();
        records.push(ApplicationRecord::from_raw(&Value::Object(object)));
    }

    Ok(records)
}

fn cell_value(cell: &str) -> Value {
    let trimmed = cell.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return Value::Number(n.into());
    }
    match trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(cell.to_string()),
    }
}

/// Reads a catalog file, choosing the decoder from its extension.
pub fn load_catalog(path: &Path) -> Result<Vec<ApplicationRecord>, CatalogError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or_default()
        .to_ascii_lowercase();

    let bytes = std::fs::read(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let records = match ext.as_str() {
        "json" => parse_catalog_json(&bytes)?,
        "csv" => parse_catalog_csv(&bytes)?,
        other => return Err(CatalogError::UnsupportedFormat(other.to_string())),
    };

    debug!(path = %path.display(), records = records.len(), "Catalog loaded");
    Ok(records)
}

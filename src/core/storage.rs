//! Read-modify-write persistence of moderation results.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::utils::ensure_dir;
use crate::api::StoreError;

/// One moderated prompt as written to the results file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResultEntry {
    pub id: String,
    pub timestamp: String,
    pub label: Option<String>,
    pub input: String,
    pub response: Value,
}

/// Create the results directory if it doesn't exist.
pub fn setup(results_dir: &Path) -> Result<(), StoreError> {
    ensure_dir(results_dir)
}

/// Appends `entry` to the JSON array at `path`, creating the file as `[]` first if needed.
///
/// The whole array is re-read and rewritten on every call. If the existing
/// file is not a JSON array, nothing is written.
pub fn save_result(entry: &ResultEntry, path: &Path) -> Result<(), StoreError> {
    if !path.exists() {
        fs::write(path, "[]").map_err(|e| StoreError::io(path, e))?;
    }

    let mut data = load_results(path)?;
    data.push(serde_json::to_value(entry).map_err(|e| StoreError::json(path, e))?);

    let out = serde_json::to_string_pretty(&data).map_err(|e| StoreError::json(path, e))?;
    fs::write(path, out).map_err(|e| StoreError::io(path, e))?;
    log::debug!("{} now holds {} entries", path.display(), data.len());
    Ok(())
}

/// Reads the results array.
pub fn load_results(path: &Path) -> Result<Vec<Value>, StoreError> {
    let raw = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
    match serde_json::from_str(&raw).map_err(|e| StoreError::json(path, e))? {
        Value::Array(items) => Ok(items),
        _ => Err(StoreError::NotAnArray(path.to_path_buf())),
    }
}

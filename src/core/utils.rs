use chrono::Local;
use std::fs;
use std::path::Path;

use crate::api::StoreError;

/// Ensure directory exists.
pub fn ensure_dir(path: &Path) -> Result<(), StoreError> {
    if !path.exists() {
        fs::create_dir_all(path).map_err(|e| StoreError::io(path, e))?;
    }
    Ok(())
}

/// Sequential prompt ID, e.g. `prompt-007`.
pub fn prompt_id(index: usize) -> String {
    format!("prompt-{:03}", index)
}

/// Local wall-clock time as ISO-8601 without offset, microsecond precision.
pub fn local_timestamp() -> String {
    Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string()
}

//! Reader for `KEY=value` properties files.
//!
//! The file format is the dotenv dialect: one assignment per line, `#`
//! comments, optional quoting. Parsing is delegated to `dotenvy` without
//! touching the process environment.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

/// Reads every assignment from `path` into a map.
///
/// Returns `Ok(None)` when the file does not exist.
pub fn read_properties(path: &Path) -> Result<Option<HashMap<String, String>>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }

    let to_error = |source| ConfigError::Properties {
        path: path.to_path_buf(),
        source,
    };

    let mut values = HashMap::new();
    for item in dotenvy::from_path_iter(path).map_err(to_error)? {
        let (key, value) = item.map_err(to_error)?;
        values.insert(key, value);
    }

    Ok(Some(values))
}

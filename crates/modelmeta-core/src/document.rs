//! Loading metadata documents from YAML or JSON.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::MetadataError;

/// Parse a metadata document from a YAML string.
pub fn from_yaml_str(yaml: &str) -> Result<Value, MetadataError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Parse a metadata document from a JSON string.
pub fn from_json_str(json: &str) -> Result<Value, MetadataError> {
    Ok(serde_json::from_str(json)?)
}

/// Read a metadata document from disk.
///
/// Files ending in `.json` are parsed as JSON, everything else as YAML.
pub fn from_file(path: impl AsRef<Path>) -> Result<Value, MetadataError> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    tracing::debug!(path = %path.display(), json = is_json, "Loading metadata document");

    if is_json {
        from_json_str(&contents)
    } else {
        from_yaml_str(&contents)
    }
}

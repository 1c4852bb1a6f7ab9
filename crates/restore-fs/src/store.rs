//! Format-agnostic settings document loading

use crate::{Error, PortablePath, Result};
use serde::de::DeserializeOwned;
use std::fs;

/// Load a settings document from a file.
///
/// Format is detected from the file extension:
/// - `.toml` -> TOML
/// - `.json` -> JSON
/// - `.yaml`, `.yml` -> YAML
pub fn load_document<T: DeserializeOwned>(path: &PortablePath) -> Result<T> {
    tracing::trace!(%path, "loading settings document");
    let content = read_text(path)?;
    let extension = path.extension().unwrap_or("");

    match extension.to_lowercase().as_str() {
        "toml" => toml::from_str(&content).map_err(|e| Error::SettingsParse {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        }),
        "json" => serde_json::from_str(&content).map_err(|e| Error::SettingsParse {
            path: path.to_native(),
            format: "JSON".into(),
            message: e.to_string(),
        }),
        "yaml" | "yml" => serde_yaml::from_str(&content).map_err(|e| Error::SettingsParse {
            path: path.to_native(),
            format: "YAML".into(),
            message: e.to_string(),
        }),
        _ => Err(Error::UnsupportedFormat {
            extension: extension.to_string(),
        }),
    }
}

/// Read a file to a string with a path-tagged error.
pub fn read_text(path: &PortablePath) -> Result<String> {
    fs::read_to_string(path.to_native()).map_err(|e| Error::io(path.to_native(), e))
}

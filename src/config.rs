//! Engine configuration and table location.

use crate::types::{EngineError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Where table files live and how they are read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base directory for relative table identifiers.
    pub data_dir: PathBuf,
    /// Extension appended to identifiers that lack it.
    pub extension: String,
    /// Field delimiter (single ASCII character).
    pub delimiter: char,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            extension: "csv".to_string(),
            delimiter: ',',
        }
    }
}

impl Config {
    /// Load configuration from a JSON file.
    ///
    /// Missing keys take their default values.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| EngineError::Config(format!("Invalid config: {}", e)))?;
        config.delimiter_byte()?;
        Ok(config)
    }

    /// Delimiter as the single byte the CSV reader expects.
    pub fn delimiter_byte(&self) -> Result<u8> {
        if self.delimiter.is_ascii() {
            Ok(self.delimiter as u8)
        } else {
            Err(EngineError::Config(format!(
                "Delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            )))
        }
    }

    /// Resolve a table identifier to a file path.
    ///
    /// Expands `~`, appends the configured extension when the identifier does
    /// not already end with it (case-insensitive), and anchors relative
    /// identifiers at `data_dir`.
    pub fn resolve_path(&self, identifier: &str) -> PathBuf {
        let expanded = shellexpand::tilde(identifier).into_owned();
        let suffix = format!(".{}", self.extension.to_lowercase());
        let file = if expanded.to_lowercase().ends_with(&suffix) {
            expanded
        } else {
            format!("{}{}", expanded, suffix)
        };

        let path = PathBuf::from(file);
        if path.is_absolute() {
            return path;
        }
        let base = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();
        PathBuf::from(base).join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_resolve_path_appends_extension() {
        let config = Config {
            data_dir: PathBuf::from("/data"),
            ..Config::default()
        };

        assert_eq!(config.resolve_path("employees"), PathBuf::from("/data/employees.csv"));
        assert_eq!(config.resolve_path("sample/e.CSV"), PathBuf::from("/data/sample/e.CSV"));
        assert_eq!(config.resolve_path("/abs/t"), PathBuf::from("/abs/t.csv"));
    }

    #[test]
    fn test_load_partial_config() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("minisql.json");
        fs::write(&file, r#"{"delimiter": ";"}"#).unwrap();

        let config = Config::load(&file).unwrap();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.extension, "csv");
        assert_eq!(config.delimiter_byte().unwrap(), b';');
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let config = Config {
            delimiter: '§',
            ..Config::default()
        };
        assert!(matches!(config.delimiter_byte(), Err(EngineError::Config(_))));
    }
}

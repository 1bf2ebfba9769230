//! Configuration file handling
//!
//! The audit reads its server connection settings from a small TOML file
//! with a single `[config]` table.

use serde::Deserialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur while loading the configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk
    #[error("Failed to read config file {path}: {source}")]
    ReadFailed { path: PathBuf, source: io::Error },

    /// The file content is not valid TOML or lacks required keys
    #[error("Failed to parse config file: {0}")]
    ParseFailed(#[from] toml::de::Error),
}

/// Connection settings for the media server
///
/// All three keys are required; a missing key fails the load.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
    /// Base URL of the media server, e.g. `http://plex.local:32400`
    pub baseurl: String,
    /// Authentication token for the server's API
    pub token: String,
    /// Name of the TV library section to audit
    pub library_name: String,
}

/// Top-level structure of the configuration file
#[derive(Debug, Deserialize)]
struct ConfigFile {
    config: Config,
}

impl Config {
    /// Loads the configuration from the given TOML file
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    ///
    /// The parsed `Config`, or a `ConfigError` if the file cannot be read
    /// or does not contain the required keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Parses the configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_complete_config() {
        let config = Config::from_toml_str(
            r#"
            [config]
            baseurl = "http://plex.local:32400"
            token = "secret"
            library_name = "TV Shows"
            "#,
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                baseurl: "http://plex.local:32400".to_string(),
                token: "secret".to_string(),
                library_name: "TV Shows".to_string(),
            }
        );
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let result = Config::from_toml_str(
            r#"
            [config]
            baseurl = "http://plex.local:32400"
            token = "secret"
            "#,
        );

        assert!(matches!(result, Err(ConfigError::ParseFailed(_))));
    }

    #[test]
    fn test_missing_config_table_is_an_error() {
        let result = Config::from_toml_str(r#"baseurl = "http://plex.local:32400""#);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = Config::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::ReadFailed { .. })));
    }
}

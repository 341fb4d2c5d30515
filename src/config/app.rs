//! Application configuration loading from config.toml
//!
//! Every key is optional. A missing file means the defaults, so the bot can start with nothing
//! but a token in the environment.

use crate::core::repeat::RepeatLimits;
use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Environment variable naming an alternate config file
pub const CONFIG_PATH_VAR: &str = "RAIZ_CONFIG";
/// Config file used when `RAIZ_CONFIG` is unset
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Limits for `/raiz` and `/raizv2`
    pub repeat: RepeatLimits,
    /// Gateway presence
    pub presence: PresenceConfig,
}

/// Presence shown under the bot's name
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PresenceConfig {
    /// Text after "Watching"
    pub activity: String,
}

impl Default for PresenceConfig {
    fn default() -> Self {
        Self {
            activity: "for /raiz • /diag".to_string(),
        }
    }
}

/// Parses and validates config from TOML text.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.repeat.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read ([`Error::Io`])
/// - The TOML syntax is invalid
/// - The repeat limits are inconsistent
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    tracing::debug!("Attempting to load configuration from: {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref)
        .inspect_err(|e| tracing::error!("Failed to read config file {}: {e}", path_ref.display()))?;
    parse_config(&contents)
}

/// Loads the file named by `RAIZ_CONFIG`, or ./config.toml, falling back to defaults
/// when that file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    if Path::new(&path).exists() {
        load_config(&path)
    } else {
        tracing::info!(path = %path, "No config file found, using defaults");
        Ok(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.repeat.char_ceiling, 1900);
        assert_eq!(config.repeat.max_chunks, 5);
    }

    #[test]
    fn test_parse_partial_repeat_section() {
        let toml_str = r#"
            [repeat]
            max_chunks = 3
            max_count = 6

            [presence]
            activity = "the chat"
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.repeat.max_chunks, 3);
        assert_eq!(config.repeat.max_count, 6);
        assert_eq!(config.repeat.char_ceiling, 1900);
        assert_eq!(config.presence.activity, "the chat");
    }

    #[test]
    fn test_inconsistent_limits_rejected() {
        let toml_str = r"
            [repeat]
            char_ceiling = 2500
        ";
        assert!(matches!(parse_config(toml_str), Err(Error::Config { .. })));
    }

    #[test]
    fn test_bad_toml_rejected() {
        assert!(parse_config("[repeat\nmax_chunks = ").is_err());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_config("definitely/not/here.toml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

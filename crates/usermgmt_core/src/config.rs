//! Runtime configuration for the user management core.
//!
//! # Responsibility
//! - Describe logging and listing defaults in one serde-friendly struct.
//! - Load them from a TOML document or `USERMGMT_*` environment variables.
//!
//! # Invariants
//! - Every field has a default, so an empty document is a valid config.
//! - `validate()` runs after every load; an invalid config is never returned.

use crate::logging::{default_log_level, normalize_level};
use serde::Deserialize;
use std::path::{Path, PathBuf};

const ENV_PREFIX: &str = "USERMGMT_";
const DEFAULT_PAGE_SIZE: usize = 10;
const DEFAULT_MAX_PAGE_SIZE: usize = 50;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value `{value}` for {key}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Process-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// `trace|debug|info|warn|error`.
    pub log_level: String,
    /// Absolute directory for rolling log files; `None` disables file logging.
    pub log_dir: Option<PathBuf>,
    pub default_page_size: usize,
    pub max_page_size: usize,
    /// Load the built-in seed users when the store starts empty.
    pub seed_on_start: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            default_page_size: DEFAULT_PAGE_SIZE,
            max_page_size: DEFAULT_MAX_PAGE_SIZE,
            seed_on_start: true,
        }
    }
}

impl AppConfig {
    /// Parses a TOML document; missing keys fall back to defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and parses a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Builds a config from `USERMGMT_*` process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary `NAME -> value` lookup.
    ///
    /// Recognized names: `USERMGMT_LOG_LEVEL`, `USERMGMT_LOG_DIR`,
    /// `USERMGMT_DEFAULT_PAGE_SIZE`, `USERMGMT_MAX_PAGE_SIZE`,
    /// `USERMGMT_SEED_ON_START`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |suffix: &str| {
            lookup(&format!("{ENV_PREFIX}{suffix}"))
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let mut config = Self::default();
        if let Some(level) = get("LOG_LEVEL") {
            config.log_level = level;
        }
        if let Some(dir) = get("LOG_DIR") {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(raw) = get("DEFAULT_PAGE_SIZE") {
            config.default_page_size = parse_usize("USERMGMT_DEFAULT_PAGE_SIZE", raw)?;
        }
        if let Some(raw) = get("MAX_PAGE_SIZE") {
            config.max_page_size = parse_usize("USERMGMT_MAX_PAGE_SIZE", raw)?;
        }
        if let Some(raw) = get("SEED_ON_START") {
            config.seed_on_start = parse_bool("USERMGMT_SEED_ON_START", raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks field values and cross-field constraints.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if normalize_level(&self.log_level).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "log_level",
                value: self.log_level.clone(),
            });
        }
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::InvalidValue {
                    key: "log_dir",
                    value: dir.display().to_string(),
                });
            }
        }
        if self.default_page_size == 0 {
            return Err(ConfigError::Invalid(
                "default_page_size must be at least 1".to_string(),
            ));
        }
        if self.max_page_size < self.default_page_size {
            return Err(ConfigError::Invalid(format!(
                "max_page_size {} is below default_page_size {}",
                self.max_page_size, self.default_page_size
            )));
        }
        Ok(())
    }
}

fn parse_usize(key: &'static str, value: String) -> Result<usize, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

fn parse_bool(key: &'static str, value: String) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue { key, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let config = AppConfig::from_toml_str("").expect("empty document is valid");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.default_page_size, 10);
        assert!(config.seed_on_start);
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = AppConfig::from_toml_str(
            "log_level = \"warn\"\nlog_dir = \"/var/log/usermgmt\"\ndefault_page_size = 25\n",
        )
        .expect("overrides should parse");
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, Some(PathBuf::from("/var/log/usermgmt")));
        assert_eq!(config.default_page_size, 25);
        assert_eq!(config.max_page_size, 50);
    }

    #[test]
    fn toml_rejects_unknown_keys() {
        let err = AppConfig::from_toml_str("page_sise = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_lookup_parses_numbers_and_flags() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("USERMGMT_MAX_PAGE_SIZE", "100"),
            ("USERMGMT_SEED_ON_START", "off"),
            ("USERMGMT_LOG_LEVEL", " "),
        ]))
        .expect("env lookup should parse");
        assert_eq!(config.max_page_size, 100);
        assert!(!config.seed_on_start);
        assert_eq!(config.log_level, AppConfig::default().log_level);
    }

    #[test]
    fn env_lookup_rejects_garbage_numbers() {
        let err = AppConfig::from_lookup(lookup_from(&[("USERMGMT_DEFAULT_PAGE_SIZE", "ten")]))
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "USERMGMT_DEFAULT_PAGE_SIZE", .. }
        ));
    }

    #[test]
    fn unknown_log_level_is_rejected_at_load() {
        let err = AppConfig::from_toml_str("log_level = \"loud\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "log_level", ref value } if value == "loud"
        ));

        let err = AppConfig::from_lookup(lookup_from(&[("USERMGMT_LOG_LEVEL", "verbose")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "log_level", .. }));
    }

    #[test]
    fn relative_log_dir_is_rejected_at_load() {
        let err = AppConfig::from_toml_str("log_dir = \"relative/logs\"").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { key: "log_dir", ref value } if value == "relative/logs"
        ));

        let err = AppConfig::from_lookup(lookup_from(&[("USERMGMT_LOG_DIR", "logs")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "log_dir", .. }));
    }

    #[test]
    fn log_level_aliases_are_accepted() {
        let config = AppConfig::from_toml_str("log_level = \"WARNING\"")
            .expect("warning alias should be accepted");
        assert_eq!(config.log_level, "WARNING");
    }

    #[test]
    fn max_page_size_below_default_is_invalid() {
        let err =
            AppConfig::from_toml_str("default_page_size = 20\nmax_page_size = 5").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn load_reads_file_from_disk() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("usermgmt.toml");
        std::fs::write(&path, "seed_on_start = false\n").expect("config file should be written");
        let config = AppConfig::load(&path).expect("config file should load");
        assert!(!config.seed_on_start);

        let missing = AppConfig::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}

//! Layered Settings
//!
//! Defaults, then an optional config file, then `KEEP_`-prefixed environment
//! variables (`KEEP_LOG_LEVEL`, `KEEP_NOISE__IGNORE_DELETED`, ...).

use alerting::NoiseConfig;
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Maximum log level (default: "info")
    pub log_level: String,
    pub noise: NoiseConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            noise: NoiseConfig::default(),
        }
    }
}

impl Settings {
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, Environment::with_prefix("KEEP"))
    }

    /// `KEEP_NOISE__NOISY_STATUSES=firing,pending` becomes a list and
    /// `KEEP_NOISE__IGNORE_DELETED=false` a boolean.
    fn environment(env: Environment) -> Environment {
        env.prefix_separator("_")
            .separator("__")
            .try_parsing(true)
            .list_separator(",")
            .with_list_parse_key("noise.noisy_statuses")
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        builder
            .add_source(Self::environment(env))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn isolated_env() -> Environment {
        Environment::with_prefix("KEEP_SETTINGS_TEST_UNUSED")
    }

    #[test]
    fn test_defaults_without_sources() {
        let settings = Settings::load_with_env(None, isolated_env()).unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "log_level = \"debug\"\n\n[noise]\nnoisy_statuses = [\"firing\", \"pending\"]"
        )
        .unwrap();

        let settings = Settings::load_with_env(Some(file.path()), isolated_env()).unwrap();
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.noise.noisy_statuses, vec!["firing", "pending"]);
        assert!(settings.noise.ignore_deleted);
    }

    #[test]
    fn test_env_overrides_list_and_bool() {
        let env = Environment::with_prefix("KEEP").source(Some(
            [
                ("KEEP_LOG_LEVEL", "warn"),
                ("KEEP_NOISE__NOISY_STATUSES", "firing,pending"),
                ("KEEP_NOISE__IGNORE_DELETED", "false"),
            ]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        ));

        let settings = Settings::load_with_env(None, env).unwrap();
        assert_eq!(settings.log_level, "warn");
        assert_eq!(settings.noise.noisy_statuses, vec!["firing", "pending"]);
        assert!(!settings.noise.ignore_deleted);
    }

    #[test]
    fn test_env_single_status_is_still_a_list() {
        let env = Environment::with_prefix("KEEP").source(Some(
            [("KEEP_NOISE__NOISY_STATUSES".to_string(), "pending".to_string())]
                .into_iter()
                .collect(),
        ));

        let settings = Settings::load_with_env(None, env).unwrap();
        assert_eq!(settings.noise.noisy_statuses, vec!["pending"]);
        assert!(settings.noise.ignore_deleted);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = Settings::load_with_env(
            Some(Path::new("/nonexistent/keep-settings.toml")),
            isolated_env(),
        );
        assert!(result.is_err());
    }
}

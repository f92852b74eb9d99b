//! Configuration model loaded from external sources.

use std::env;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Debug, Deserialize, PartialEq)]
/// Settings for talking to the backend and persisting the session.
pub struct ConsoleConfig {
    /// Base URL of the REST backend, e.g. `https://api.example.com/api/v1`.
    pub api_url: String,
    /// File holding the persisted token and selected professional.
    pub session_file: String,
    /// Default page size of list screens.
    pub per_page: usize,
    /// Per-request timeout.
    pub timeout_secs: u64,
    /// Name the backend registers issued tokens under.
    pub device_name: String,
}

impl ConsoleConfig {
    /// Loads `config/default.yaml`, the `APP_ENV` profile (defaults to `local`)
    /// and `APP_*` environment variables, in that order.
    pub fn load() -> Result<Self, ConfigError> {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());
        Self::load_from("config", &app_env)
    }

    pub fn load_from(dir: &str, profile: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("session_file", ".records-console/session.json")?
            .set_default("per_page", 10)?
            .set_default("timeout_secs", 30)?
            .set_default("device_name", "records-console")?
            .add_source(File::with_name(&format!("{dir}/default")).required(false))
            .add_source(File::with_name(&format!("{dir}/{profile}")).required(false))
            .add_source(Environment::with_prefix("APP"))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn profile_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.yaml"),
            "api_url: http://localhost:8000/api\nper_page: 5\n",
        )
        .unwrap();
        fs::write(dir.path().join("staging.yaml"), "per_page: 25\n").unwrap();

        let config =
            ConsoleConfig::load_from(dir.path().to_str().unwrap(), "staging").unwrap();

        assert_eq!(config.api_url, "http://localhost:8000/api");
        assert_eq!(config.per_page, 25);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.device_name, "records-console");
    }

    #[test]
    fn missing_api_url_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let result = ConsoleConfig::load_from(dir.path().to_str().unwrap(), "local");

        assert!(result.is_err());
    }
}

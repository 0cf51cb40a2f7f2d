//! Configuration loading from multiple sources.
//!
//! Generic over the target type so the same loader serves both
//! [`crate::RouterConfig`] (ambient settings) and
//! [`interhop_types::RegistryInput`] (the chain/channel registry).

use crate::{ConfigError, Result};
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::de::DeserializeOwned;
use std::path::Path;

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads from a file, dispatching on its extension.
    pub fn from_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| ConfigError::LoadError("no file extension found".to_string()))?;

        let content = std::fs::read_to_string(path)?;

        match extension {
            "toml" => Self::from_toml(&content),
            "yaml" | "yml" => Self::from_yaml(&content),
            "json" => Self::from_json(&content),
            other => Err(ConfigError::LoadError(format!(
                "unsupported file extension: {other}"
            ))),
        }
    }

    pub fn from_toml<T: DeserializeOwned>(content: &str) -> Result<T> {
        toml::from_str(content).map_err(ConfigError::from)
    }

    pub fn from_yaml<T: DeserializeOwned>(content: &str) -> Result<T> {
        serde_yaml::from_str(content).map_err(ConfigError::from)
    }

    pub fn from_json<T: DeserializeOwned>(content: &str) -> Result<T> {
        serde_json::from_str(content).map_err(ConfigError::from)
    }

    /// Loads from environment variables under `prefix` (e.g.
    /// `INTERHOP_NETWORK_LOG_LEVEL=debug`).
    pub fn from_env_with_prefix<T: DeserializeOwned>(prefix: &str) -> Result<T> {
        let config = Config::builder()
            .add_source(Environment::with_prefix(prefix).separator("_"))
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }

    /// Loads from file with environment variable overrides.
    pub fn from_file_with_env<T: DeserializeOwned>(path: &Path, env_prefix: &str) -> Result<T> {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        };

        let config = Config::builder()
            .add_source(File::from(path).format(format))
            .add_source(Environment::with_prefix(env_prefix).separator("_"))
            .build()?;

        config.try_deserialize().map_err(ConfigError::from)
    }

    pub fn builder() -> ConfigLoaderBuilder {
        ConfigLoaderBuilder {
            builder: Config::builder(),
        }
    }
}

pub struct ConfigLoaderBuilder {
    builder: ConfigBuilder<config::builder::DefaultState>,
}

impl ConfigLoaderBuilder {
    pub fn add_file(mut self, path: &Path, required: bool) -> Self {
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        };

        self.builder = self
            .builder
            .add_source(File::from(path).format(format).required(required));
        self
    }

    pub fn add_env(mut self, prefix: &str) -> Self {
        self.builder = self
            .builder
            .add_source(Environment::with_prefix(prefix).separator("_"));
        self
    }

    pub fn build<T: DeserializeOwned>(self) -> Result<T> {
        let config = self.builder.build()?;
        config.try_deserialize().map_err(ConfigError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouterConfig;

    #[test]
    fn loads_router_settings_from_toml() {
        let toml = r#"
            [network]
            environment = "testnet"
            log_level = "debug"

            [router]
            default_slippage_bps = 75
            max_hops = 4

            [broker]
            max_retries = 5
        "#;

        let cfg: RouterConfig = ConfigLoader::from_toml(toml).unwrap();
        assert_eq!(cfg.network.log_level, "debug");
        assert_eq!(cfg.router.default_slippage_bps, 75);
        assert_eq!(cfg.router.max_hops, 4);
        assert_eq!(cfg.broker.max_retries, 5);
    }

    #[test]
    fn defaults_fill_in_missing_fields() {
        let toml = r#"
            [network]
            environment = "local"
        "#;

        let cfg: RouterConfig = ConfigLoader::from_toml(toml).unwrap();
        assert_eq!(cfg.router.default_slippage_bps, 100);
        assert_eq!(cfg.router.max_hops, 5);
        assert_eq!(cfg.broker.initial_backoff_ms, 500);
        assert_eq!(cfg.validator.consensus_threshold, 60);
    }

    #[test]
    fn loads_from_yaml() {
        let yaml = r#"
network:
  environment: local
  log_level: debug
router:
  default_slippage_bps: 50
        "#;
        let cfg: RouterConfig = ConfigLoader::from_yaml(yaml).unwrap();
        assert_eq!(cfg.router.default_slippage_bps, 50);
    }
}

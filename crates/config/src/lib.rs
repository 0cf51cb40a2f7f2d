//! Configuration management for the cross-chain route planner.
//!
//! - [`RouterConfig`]: ambient runtime settings (logging, pathfinding
//!   tunables, broker retry, endpoint validator) — loaded via
//!   [`ConfigLoader`], hot-reloadable via [`watcher::ConfigWatcher`].
//! - [`enrichment`]: turns an operator-supplied chain/channel registry
//!   into the frozen, versioned [`interhop_types::RegistryConfig`] (C2).
//! - [`validator`]: the endpoint-validator sub-component (§5).

mod artifact;
mod config;
pub mod enrichment;
mod loader;
pub mod validation;
pub mod validator;
mod watcher;

pub use artifact::to_versioned_artifact;
pub use config::*;
pub use loader::*;
pub use watcher::ConfigWatcher;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load config: {0}")]
    LoadError(String),

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("config validation failed: {0}")]
    ValidationError(String),

    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("config library error: {0}")]
    ConfigLibError(#[from] ::config::ConfigError),

    #[error("toml parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("yaml parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("json parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("watch error: {0}")]
    WatchError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

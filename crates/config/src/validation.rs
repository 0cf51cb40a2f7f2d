//! Structural validation ahead of enrichment and at config load time.

use crate::{ConfigError, Result, RouterConfig};
use interhop_types::RegistryInput;
use std::collections::HashSet;

#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

fn collect(errors: Vec<ValidationError>) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; ");
    Err(ConfigError::ValidationError(joined))
}

/// Validates the ambient runtime settings.
pub fn validate_config(config: &RouterConfig) -> Result<()> {
    let mut errors = Vec::new();

    if !matches!(
        config.network.log_level.to_lowercase().as_str(),
        "trace" | "debug" | "info" | "warn" | "error"
    ) {
        errors.push(ValidationError::new(
            "network.log_level",
            format!("invalid log level '{}'", config.network.log_level),
        ));
    }

    if config.network.metrics_port == 0 {
        errors.push(ValidationError::new(
            "network.metrics_port",
            "must be greater than 0",
        ));
    }

    if config.router.default_slippage_bps > 10_000 {
        errors.push(ValidationError::new(
            "router.default_slippage_bps",
            "must be <= 10000",
        ));
    }

    if config.router.max_hops == 0 {
        errors.push(ValidationError::new("router.max_hops", "must be >= 1"));
    }

    if config.broker.max_retries == 0 {
        errors.push(ValidationError::new("broker.max_retries", "must be >= 1"));
    }

    if config.broker.initial_backoff_ms > config.broker.max_backoff_ms {
        errors.push(ValidationError::new(
            "broker.initial_backoff_ms",
            "must not exceed broker.max_backoff_ms",
        ));
    }

    if config.validator.consensus_threshold > 100 {
        errors.push(ValidationError::new(
            "validator.consensus_threshold",
            "must be <= 100",
        ));
    }

    collect(errors)
}

/// Structural checks on the registry input, ahead of enrichment (§4.2).
/// These are cheap, purely-structural checks; semantic checks (e.g. a
/// `via_chains` hop lacking a channel) surface as `RouterError` during
/// enrichment itself.
pub fn validate_registry(input: &RegistryInput) -> Result<()> {
    let mut errors = Vec::new();
    let known_names: HashSet<&str> = input
        .chains
        .iter()
        .map(|(chain_id, c)| c.registry_name.as_deref().unwrap_or(chain_id.as_str()))
        .collect();

    for (idx, entry) in input.channels.iter().enumerate() {
        if !known_names.contains(entry.chain_a.as_str()) {
            errors.push(ValidationError::new(
                format!("channels[{idx}].chain_a"),
                format!("unknown chain '{}'", entry.chain_a),
            ));
        }
        if !known_names.contains(entry.chain_b.as_str()) {
            errors.push(ValidationError::new(
                format!("channels[{idx}].chain_b"),
                format!("unknown chain '{}'", entry.chain_b),
            ));
        }
        if entry.channel_id_a.is_empty() || entry.channel_id_b.is_empty() {
            errors.push(ValidationError::new(
                format!("channels[{idx}]"),
                "both channel_id_a and channel_id_b are required",
            ));
        }
    }

    for (chain_id, chain) in &input.chains {
        for (ridx, rt) in chain.received_tokens.iter().enumerate() {
            if !input.chains.contains_key(&rt.origin_chain) {
                errors.push(ValidationError::new(
                    format!("chains.{chain_id}.received_tokens[{ridx}].origin_chain"),
                    format!("unknown chain '{}'", rt.origin_chain),
                ));
            }
            for via in &rt.via_chains {
                if !known_names.contains(via.as_str()) {
                    errors.push(ValidationError::new(
                        format!("chains.{chain_id}.received_tokens[{ridx}].via_chains"),
                        format!("unknown chain '{via}'"),
                    ));
                }
            }
        }
    }

    collect(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrokerSettings, NetworkConfig, RouterSettings, ValidatorSettings};

    #[test]
    fn rejects_bad_log_level() {
        let config = RouterConfig {
            network: NetworkConfig {
                log_level: "verbose".to_string(),
                ..NetworkConfig::default()
            },
            router: RouterSettings::default(),
            broker: BrokerSettings::default(),
            validator: ValidatorSettings::default(),
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn accepts_defaults() {
        let config = RouterConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn rejects_slippage_above_cap() {
        let mut config = RouterConfig::default();
        config.router.default_slippage_bps = 10_001;
        assert!(validate_config(&config).is_err());
    }
}

//! Ambient runtime settings for the route planner: logging/metrics,
//! pathfinding tunables, and broker retry/validator parameters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Top-level runtime configuration (distinct from the chain/channel
/// registry, which is loaded and enriched separately — see
/// [`crate::enrichment`]).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RouterConfig {
    pub network: NetworkConfig,
    #[serde(default)]
    pub router: RouterSettings,
    #[serde(default)]
    pub broker: BrokerSettings,
    #[serde(default)]
    pub validator: ValidatorSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub environment: Environment,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_true")]
    pub metrics_enabled: bool,
    #[serde(default = "default_metrics_port")]
    pub metrics_port: u16,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Local,
            log_level: default_log_level(),
            metrics_enabled: default_true(),
            metrics_port: default_metrics_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Mainnet,
    Testnet,
    Local,
}

/// Pathfinding tunables (§4.5, §9).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterSettings {
    /// Applied when a request omits `slippage_bps` (§3 "RouteRequest").
    #[serde(default = "default_slippage_bps")]
    pub default_slippage_bps: u32,
    /// BFS path-length cap for indirect routes.
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
    /// Tolerance for clock skew when judging a quote/registry artefact
    /// stale (§9 Open Question).
    #[serde(default = "default_clock_skew_secs")]
    pub clock_skew_tolerance_secs: u64,
}

impl Default for RouterSettings {
    fn default() -> Self {
        Self {
            default_slippage_bps: default_slippage_bps(),
            max_hops: default_max_hops(),
            clock_skew_tolerance_secs: default_clock_skew_secs(),
        }
    }
}

/// Broker RPC retry parameters (§4.8) — backs
/// `interhop_ratelimit::ExponentialBackoff`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSettings {
    #[serde(default = "default_broker_initial_backoff_ms")]
    pub initial_backoff_ms: u64,
    #[serde(default = "default_broker_max_backoff_ms")]
    pub max_backoff_ms: u64,
    #[serde(default = "default_broker_max_retries")]
    pub max_retries: u32,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            initial_backoff_ms: default_broker_initial_backoff_ms(),
            max_backoff_ms: default_broker_max_backoff_ms(),
            max_retries: default_broker_max_retries(),
        }
    }
}

/// Endpoint-validator sub-component settings (§5).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatorSettings {
    /// Minimum score (of 100) an endpoint must retain to stay trusted.
    #[serde(default = "default_validator_threshold")]
    pub consensus_threshold: u32,
    /// Points deducted per response that disagrees with the majority.
    #[serde(default = "default_validator_penalty")]
    pub mismatch_penalty: u32,
    /// `chain_id -> candidate RPC endpoints` fanned out to for consensus.
    #[serde(default)]
    pub endpoints: HashMap<String, Vec<String>>,
}

impl Default for ValidatorSettings {
    fn default() -> Self {
        Self {
            consensus_threshold: default_validator_threshold(),
            mismatch_penalty: default_validator_penalty(),
            endpoints: HashMap::new(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_metrics_port() -> u16 {
    9090
}

fn default_slippage_bps() -> u32 {
    100
}

fn default_max_hops() -> usize {
    5
}

fn default_clock_skew_secs() -> u64 {
    10
}

fn default_broker_initial_backoff_ms() -> u64 {
    500
}

fn default_broker_max_backoff_ms() -> u64 {
    2_000
}

fn default_broker_max_retries() -> u32 {
    3
}

fn default_validator_threshold() -> u32 {
    60
}

fn default_validator_penalty() -> u32 {
    10
}

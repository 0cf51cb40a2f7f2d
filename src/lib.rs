//! Cross-chain route planner facade: wires config loading, enrichment,
//! the route index, and the pathfinder into a single hot-reloadable
//! [`Router`].
//!
//! Crates:
//! - [`interhop_types`]: wire types and errors (C1).
//! - [`interhop_config`]: ambient settings, registry loading, enrichment (C2).
//! - [`interhop_routeindex`]: the frozen route graph (C5).
//! - [`interhop_denom`] / [`interhop_address`]: denom resolution and bech32
//!   re-encoding (C3, C4).
//! - [`interhop_broker`]: the broker client contract (C8).
//! - [`interhop_memo`]: PFM/IBC-Hooks/Skip memo construction (C7).
//! - [`interhop_pathfinder`]: direct/indirect/broker-swap search (C6).
//! - [`interhop_metrics`]: Prometheus metrics and tracing integration.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use interhop_broker::BrokerClient;
use interhop_config::{BrokerSettings, ConfigError, ConfigLoader, RouterConfig};
use interhop_pathfinder::Pathfinder;
use interhop_routeindex::RouteIndex;
use interhop_types::{RegistryInput, RouteRequest, RouteResponse, RouterError};
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum RouterBuildError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("failed to build route index: {0}")]
    Index(#[from] RouterError),

    #[error("failed to load config: {0}")]
    Config(#[from] ConfigError),
}

/// Builder for [`Router`] — mirrors the settlement orchestrator's
/// builder in spirit: every required input must be supplied once before
/// `build` assembles the frozen [`RouteIndex`] and wraps it for reload.
#[derive(Default)]
pub struct RouterBuilder {
    registry: Option<RegistryInput>,
    config: RouterConfig,
    brokers: HashMap<String, Arc<dyn BrokerClient>>,
    registry_path: Option<PathBuf>,
}

impl RouterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chain/channel registry directly (already parsed).
    pub fn with_registry(mut self, registry: RegistryInput) -> Self {
        self.registry = Some(registry);
        self
    }

    /// Load the chain/channel registry from a TOML/YAML/JSON file, and
    /// remember the path so [`Router::reload`] can re-read it later.
    pub fn with_registry_file(mut self, path: PathBuf) -> Result<Self, RouterBuildError> {
        let registry: RegistryInput = ConfigLoader::from_file(&path)?;
        self.registry = Some(registry);
        self.registry_path = Some(path);
        Ok(self)
    }

    /// Set the ambient runtime settings (network, pathfinding, broker
    /// retry, validator).
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config;
        self
    }

    /// Register a broker client under its broker id (§4.6, §4.8). The
    /// id must match a `broker_id` named by some chain in the registry
    /// for that broker to ever be dispatched to.
    pub fn with_broker(mut self, broker_id: impl Into<String>, client: Arc<dyn BrokerClient>) -> Self {
        self.brokers.insert(broker_id.into(), client);
        self
    }

    pub fn build(self) -> Result<Router, RouterBuildError> {
        let registry = self.registry.ok_or(RouterBuildError::MissingField {
            field: "registry",
        })?;

        let index = RouteIndex::build(&registry)?;
        info!(
            chains = index.chains().len(),
            brokers = self.brokers.len(),
            "route index built"
        );

        Ok(Router {
            index: RwLock::new(Arc::new(index)),
            registry_path: self.registry_path,
            brokers: self.brokers,
            broker_settings: self.config.broker,
            max_hops: self.config.router.max_hops,
        })
    }
}

/// Top-level entry point: holds the hot-reloadable [`RouteIndex`] plus
/// the broker clients and tunables it's paired with, and exposes
/// `find_path` (§4.6) without requiring callers to rebuild a
/// [`Pathfinder`] themselves on every request.
pub struct Router {
    index: RwLock<Arc<RouteIndex>>,
    registry_path: Option<PathBuf>,
    brokers: HashMap<String, Arc<dyn BrokerClient>>,
    broker_settings: BrokerSettings,
    max_hops: usize,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::new()
    }

    /// Resolve a route for `req` against the currently active index.
    #[instrument(skip(self, req), fields(from = %req.chain_from, to = %req.chain_to))]
    pub async fn find_path(&self, req: &RouteRequest) -> RouteResponse {
        let pathfinder = self.current_pathfinder();
        pathfinder.find_path(req).await
    }

    /// Re-read the registry file this `Router` was built from, rebuild
    /// the route index, and atomically swap it in. Requests already in
    /// flight keep using the `Pathfinder` snapshot they started with
    /// (§6 "Persisted state" — the index is rebuilt wholesale, never
    /// mutated in place).
    pub fn reload(&self) -> Result<(), RouterBuildError> {
        let Some(path) = &self.registry_path else {
            return Err(RouterBuildError::MissingField {
                field: "registry_path",
            });
        };

        let registry: RegistryInput = ConfigLoader::from_file(path)?;
        match RouteIndex::build(&registry) {
            Ok(index) => {
                let chains = index.chains().len();
                let mut guard = self.index.write().expect("route index lock poisoned");
                *guard = Arc::new(index);
                info!(chains, "route index reloaded");
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "route index reload failed, keeping previous index");
                Err(RouterBuildError::Index(e))
            }
        }
    }

    /// Number of chains in the currently active index.
    pub fn chain_count(&self) -> usize {
        self.current_index().chains().len()
    }

    fn current_index(&self) -> Arc<RouteIndex> {
        self.index.read().expect("route index lock poisoned").clone()
    }

    fn current_pathfinder(&self) -> Pathfinder {
        Pathfinder::new(
            self.current_index(),
            self.brokers.clone(),
            self.broker_settings.clone(),
            self.max_hops,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interhop_types::{ChainInput, ChannelOrdering, ChannelRegistryEntry, NativeToken};

    fn native(denom: &str) -> NativeToken {
        NativeToken {
            denom: denom.to_string(),
            symbol: denom.to_string(),
            name: denom.to_string(),
            decimals: 6,
            coingecko_id: None,
            allowed_destinations: vec![],
        }
    }

    fn chain(id: &str, tokens: Vec<NativeToken>) -> ChainInput {
        ChainInput {
            chain_id: id.to_string(),
            registry_name: None,
            display_name: id.to_string(),
            address_prefix: id.to_string(),
            slip44: 118,
            broker: None,
            pfm: true,
            ibc_hooks_contract: None,
            native_tokens: tokens,
            received_tokens: vec![],
        }
    }

    fn registry() -> RegistryInput {
        let mut chains = HashMap::new();
        chains.insert("cosmoshub-4".to_string(), chain("cosmoshub-4", vec![native("uatom")]));
        chains.insert("osmosis-1".to_string(), chain("osmosis-1", vec![native("uosmo")]));
        RegistryInput {
            chains,
            channels: vec![ChannelRegistryEntry {
                chain_a: "cosmoshub-4".to_string(),
                chain_b: "osmosis-1".to_string(),
                connection_id: "connection-0".to_string(),
                channel_id_a: "channel-0".to_string(),
                channel_id_b: "channel-141".to_string(),
                port_id: "transfer".to_string(),
                ordering: ChannelOrdering::Unordered,
                state: "ACTIVE".to_string(),
                preferred: true,
            }],
        }
    }

    fn request() -> RouteRequest {
        RouteRequest {
            chain_from: "cosmoshub-4".to_string(),
            chain_to: "osmosis-1".to_string(),
            token_from_denom: "uatom".to_string(),
            token_to_denom: None,
            amount_in: "1000000".to_string(),
            sender_address: "cosmos1sender".to_string(),
            receiver_address: "osmo1receiver".to_string(),
            smart_route: false,
            slippage_bps: None,
        }
    }

    #[test]
    fn builder_requires_a_registry() {
        let err = Router::builder().build().unwrap_err();
        assert!(matches!(err, RouterBuildError::MissingField { field: "registry" }));
    }

    #[tokio::test]
    async fn finds_direct_route_after_build() {
        let router = Router::builder().with_registry(registry()).build().unwrap();
        let response = router.find_path(&request()).await;
        assert_eq!(response.route_type, interhop_types::RouteType::Direct);
    }

    #[test]
    fn reload_without_a_registry_path_is_an_error() {
        let router = Router::builder().with_registry(registry()).build().unwrap();
        let err = router.reload().unwrap_err();
        assert!(matches!(
            err,
            RouterBuildError::MissingField { field: "registry_path" }
        ));
    }

    #[test]
    fn chain_count_reflects_the_active_index() {
        let router = Router::builder().with_registry(registry()).build().unwrap();
        assert_eq!(router.chain_count(), 2);
    }
}

//! Route search (C6): strict priority dispatch over direct, indirect-BFS,
//! and broker-swap candidates (§4.6).

mod broker_swap;
mod direct;
mod indirect;
mod retry;

use std::collections::HashMap;
use std::sync::Arc;

use interhop_broker::BrokerClient;
use interhop_config::BrokerSettings;
use interhop_routeindex::RouteIndex;
use interhop_types::{RouteRequest, RouteResponse, RouterError};
use tracing::{info, instrument};

pub use broker_swap::find_broker_swap_route;
pub use direct::find_direct_route;
pub use indirect::find_indirect_route;
pub use retry::query_swap_with_retry;

/// Ties a frozen [`RouteIndex`] to its broker clients and tunables, and
/// exposes the single public entry point, `find_path` (§4.6). The index
/// is held behind an `Arc` so a hot-reloaded index can be swapped in by
/// building a new `Pathfinder` without disturbing broker clients already
/// in flight (§6 "Persisted state").
pub struct Pathfinder {
    index: Arc<RouteIndex>,
    brokers: HashMap<String, Arc<dyn BrokerClient>>,
    broker_settings: BrokerSettings,
    max_hops: usize,
}

impl Pathfinder {
    pub fn new(
        index: Arc<RouteIndex>,
        brokers: HashMap<String, Arc<dyn BrokerClient>>,
        broker_settings: BrokerSettings,
        max_hops: usize,
    ) -> Self {
        Self {
            index,
            brokers,
            broker_settings,
            max_hops,
        }
    }

    pub fn index(&self) -> &RouteIndex {
        &self.index
    }

    /// §4.6 strict priority: direct, then indirect, then broker-swap,
    /// then impossible. Validation and resolution failures collapse into
    /// an `impossible` response rather than propagating as `Err`.
    #[instrument(skip(self), fields(from = %req.chain_from, to = %req.chain_to))]
    pub async fn find_path(&self, req: &RouteRequest) -> RouteResponse {
        if let Err(e) = req.validate() {
            return RouteResponse::impossible(e.to_string());
        }

        match self.try_find_path(req).await {
            Ok(response) => response,
            Err(e) => RouteResponse::impossible(e.to_string()),
        }
    }

    async fn try_find_path(&self, req: &RouteRequest) -> Result<RouteResponse, RouterError> {
        if let Some(route) = find_direct_route(&self.index, req)? {
            info!(route_type = "direct", "route found");
            return Ok(RouteResponse::direct(route));
        }

        if let Some(route) = find_indirect_route(&self.index, req, self.max_hops)? {
            info!(route_type = "indirect", hops = route.legs.len(), "route found");
            return Ok(RouteResponse::indirect(route));
        }

        match find_broker_swap_route(&self.index, &self.brokers, &self.broker_settings, req).await
        {
            Ok(Some(route)) => {
                info!(route_type = "broker_swap", broker = %route.swap.broker, "route found");
                Ok(RouteResponse::broker_swap(route))
            }
            Ok(None) => Ok(RouteResponse::impossible(format!(
                "no route from {} to {}",
                req.chain_from, req.chain_to
            ))),
            Err(e) => Ok(RouteResponse::impossible(e.to_string())),
        }
    }
}

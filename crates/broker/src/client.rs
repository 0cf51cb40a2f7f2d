use async_trait::async_trait;
use interhop_types::RouteData;

use crate::error::BrokerError;

/// Result of a swap quote query (§4.8 `SwapResult`).
#[derive(Debug, Clone)]
pub struct SwapResult {
    pub amount_in: u128,
    pub amount_out: u128,
    pub price_impact: String,
    pub effective_fee: String,
    pub route_data: RouteData,
}

/// The broker client contract consumed by the pathfinder (C6) and memo
/// builder (C7). Concrete DEX clients (Osmosis, Astroport, ...) are
/// external collaborators; only the interface lives here.
#[async_trait]
pub trait BrokerClient: Send + Sync {
    /// Stable identifier distinct from the broker's chain ID, e.g.
    /// `"osmosis-sqs"`.
    fn get_broker_type(&self) -> &str;

    /// Quotes a swap on this broker. `single_route_preferred` asks the
    /// broker to avoid split routes when it can.
    async fn query_swap(
        &self,
        token_in_denom: &str,
        amount_in: u128,
        token_out_denom: &str,
        single_route_preferred: bool,
    ) -> Result<SwapResult, BrokerError>;

    /// Releases any held connections. A no-op for brokers without pooled
    /// transport.
    async fn close(&self) {}
}

use serde::{Deserialize, Serialize};

use crate::channel::Route;
use crate::token::TokenInfo;

/// A resolved broker route, internal to the pathfinder (§3 "MultiHopInfo").
/// Created per-request and discarded after the `RouteResponse` is emitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MultiHopInfo {
    pub broker_id: String,
    pub broker_chain_id: String,
    pub inbound_routes: Vec<Route>,
    pub inbound_path: Vec<String>,
    pub inbound_intermediate_tokens: Vec<TokenInfo>,
    pub outbound_routes: Vec<Route>,
    pub outbound_intermediate_tokens: Vec<TokenInfo>,
    pub token_in: TokenInfo,
    pub token_out: TokenInfo,
    pub token_out_on_broker: TokenInfo,
    /// Destination equals the broker: no outbound IBC leg.
    pub swap_only: bool,
    /// Source equals the broker: direct contract call, no inbound IBC leg.
    pub source_is_broker: bool,
}

impl MultiHopInfo {
    pub fn case(&self) -> BrokerSwapCase {
        match (self.source_is_broker, self.swap_only) {
            (true, true) => BrokerSwapCase::SameChain,
            (false, true) => BrokerSwapCase::SwapOnly,
            (true, false) => BrokerSwapCase::SourceIsBroker,
            (false, false) => BrokerSwapCase::Full,
        }
    }
}

/// The four broker-swap cases of §4.6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrokerSwapCase {
    SameChain,
    SwapOnly,
    SourceIsBroker,
    Full,
}

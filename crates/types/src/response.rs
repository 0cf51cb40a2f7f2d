use serde::{Deserialize, Serialize};

/// §6 "Response" tag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RouteType {
    Direct,
    Indirect,
    BrokerSwap,
    Impossible,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenMapping {
    pub from_denom: String,
    pub to_denom: String,
}

/// One IBC hop in the final plan, carrying a concrete amount and token
/// mapping (GLOSSARY "Leg").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IbcLeg {
    pub from_chain: String,
    pub to_chain: String,
    pub channel: String,
    pub port: String,
    pub token: TokenMapping,
    pub amount: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectRoute {
    pub transfer: IbcLeg,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndirectRoute {
    pub path: Vec<String>,
    pub legs: Vec<IbcLeg>,
    pub supports_pfm: bool,
    pub pfm_start_chain: Option<String>,
    pub pfm_memo: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolHop {
    pub pool_id: String,
    pub denom_in: String,
    pub denom_out: String,
}

/// Opaque route data returned by the broker: an ordered pool list and the
/// venue (the broker's native DEX engine) — §4.8 `route_data`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteData {
    pub venue: String,
    pub pools: Vec<PoolHop>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SwapQuote {
    pub broker: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: String,
    pub amount_out: String,
    pub price_impact: String,
    pub effective_fee: String,
    pub route_data: RouteData,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerExecutionData {
    pub memo: Option<String>,
    pub ibc_receiver: Option<String>,
    pub recover_address: Option<String>,
    pub smart_contract_data: Option<serde_json::Value>,
    pub min_output_amount: String,
    pub uses_wasm: bool,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSwapRoute {
    pub path: Vec<String>,
    pub inbound_legs: Vec<IbcLeg>,
    pub swap: SwapQuote,
    pub outbound_legs: Vec<IbcLeg>,
    pub outbound_supports_pfm: bool,
    pub execution: Option<BrokerExecutionData>,
}

/// §6 "Response" — tagged union over four shapes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteResponse {
    pub success: bool,
    pub route_type: RouteType,
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direct: Option<DirectRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indirect: Option<IndirectRoute>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub broker_swap: Option<BrokerSwapRoute>,
}

impl RouteResponse {
    pub fn direct(route: DirectRoute) -> Self {
        Self {
            success: true,
            route_type: RouteType::Direct,
            error_message: None,
            direct: Some(route),
            indirect: None,
            broker_swap: None,
        }
    }

    pub fn indirect(route: IndirectRoute) -> Self {
        Self {
            success: true,
            route_type: RouteType::Indirect,
            error_message: None,
            direct: None,
            indirect: Some(route),
            broker_swap: None,
        }
    }

    pub fn broker_swap(route: BrokerSwapRoute) -> Self {
        Self {
            success: true,
            route_type: RouteType::BrokerSwap,
            error_message: None,
            direct: None,
            indirect: None,
            broker_swap: Some(route),
        }
    }

    pub fn impossible(message: impl Into<String>) -> Self {
        Self {
            success: false,
            route_type: RouteType::Impossible,
            error_message: Some(message.into()),
            direct: None,
            indirect: None,
            broker_swap: None,
        }
    }
}

use serde::{Deserialize, Serialize};

use crate::channel::ChannelRegistryEntry;
use crate::token::NativeToken;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BrokerInfo {
    pub broker_id: String,
}

/// An enriched, frozen chain record — output of config enrichment (C2),
/// consumed by the route index (C5). §3 "Chain".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainConfig {
    pub chain_id: String,
    pub display_name: String,
    pub address_prefix: String,
    pub slip44: u32,
    #[serde(default)]
    pub broker: Option<BrokerInfo>,
    #[serde(default)]
    pub pfm: bool,
    #[serde(default)]
    pub ibc_hooks_contract: Option<String>,
    pub native_tokens: Vec<NativeToken>,
    /// De-duplicated union of inbound IBC denoms plus explicitly configured
    /// multi-hop received tokens (§4.2 step 4).
    #[serde(default)]
    pub ibc_tokens: Vec<crate::token::IbcToken>,
}

impl ChainConfig {
    pub fn is_broker(&self) -> bool {
        self.broker.is_some()
    }

    pub fn broker_id(&self) -> Option<&str> {
        self.broker.as_ref().map(|b| b.broker_id.as_str())
    }
}

/// Input chain record supplied by the operator before enrichment, plus the
/// channel registry used to build `Route`s (§4.2).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainInput {
    pub chain_id: String,
    /// Name channel-registry entries reference this chain by. Defaults to
    /// `chain_id` when absent (§4.2 step 1's `registry_name -> chain_id`
    /// lookup).
    #[serde(default)]
    pub registry_name: Option<String>,
    pub display_name: String,
    pub address_prefix: String,
    pub slip44: u32,
    #[serde(default)]
    pub broker: Option<BrokerInfo>,
    #[serde(default)]
    pub pfm: bool,
    #[serde(default)]
    pub ibc_hooks_contract: Option<String>,
    pub native_tokens: Vec<NativeToken>,
    /// Explicitly configured multi-hop received tokens (§4.2 step 3).
    #[serde(default)]
    pub received_tokens: Vec<ReceivedToken>,
}

/// A token this chain receives via a known multi-hop path, whose nested
/// trace is computed by walking `via_chains` (§4.2 step 3).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedToken {
    pub origin_chain: String,
    pub origin_denom: String,
    pub via_chains: Vec<String>,
}

/// Top-level enrichment input: every chain plus the channel registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryInput {
    pub chains: std::collections::HashMap<String, ChainInput>,
    pub channels: Vec<ChannelRegistryEntry>,
}

/// Enrichment output — a versioned, frozen artefact (§6 "Persisted state").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryConfig {
    pub version: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    pub chains: std::collections::HashMap<String, ChainConfig>,
    pub routes: Vec<crate::channel::Route>,
}

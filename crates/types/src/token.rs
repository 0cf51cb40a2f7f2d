use serde::{Deserialize, Serialize};

/// Sentinel value for [`NativeToken::allowed_destinations`] meaning the
/// token never leaves its origin chain.
pub const DESTINATION_NONE: &str = "none";

/// A token owned by a chain (§3 "Native").
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NativeToken {
    /// On-chain symbol, e.g. `"uatom"`.
    pub denom: String,
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub coingecko_id: Option<String>,
    /// Empty = everywhere. `["none"]` = locked to origin, never travels.
    #[serde(default)]
    pub allowed_destinations: Vec<String>,
}

impl NativeToken {
    pub fn permits_destination(&self, dest_chain_id: &str) -> bool {
        if self
            .allowed_destinations
            .iter()
            .any(|d| d == DESTINATION_NONE)
        {
            return false;
        }
        self.allowed_destinations.is_empty()
            || self.allowed_destinations.iter().any(|d| d == dest_chain_id)
    }
}

/// A token received via IBC transfer (§3 "IBC"). Computed, never user-written.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IbcToken {
    pub ibc_denom: String,
    pub base_denom: String,
    pub origin_chain: String,
    pub decimals: u8,
    pub ibc_path: String,
    pub source_channel: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind")]
pub enum Token {
    Native(NativeToken),
    Ibc(IbcToken),
}

/// The projection of a token onto a particular edge of the route graph:
/// its chain-local denom, what it becomes after one more hop, and its
/// canonical identity `(base_denom, origin_chain)`.
///
/// Two `TokenInfo`s with the same `(base_denom, origin_chain)` are the same
/// token even if `chain_denom` differs — §9 "Token identity".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct TokenInfo {
    pub chain_denom: String,
    pub ibc_denom: String,
    pub base_denom: String,
    pub origin_chain: String,
    pub decimals: u8,
}

impl TokenInfo {
    /// The canonical cross-chain identity used as a BFS/index key.
    pub fn identity(&self) -> (String, String) {
        (self.base_denom.clone(), self.origin_chain.clone())
    }

    pub fn is_native(&self, chain_id: &str) -> bool {
        self.origin_chain == chain_id
    }
}

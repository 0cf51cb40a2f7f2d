use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::token::TokenInfo;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChannelOrdering {
    Ordered,
    Unordered,
}

/// An input channel-registry entry, prior to decomposition into two
/// directed [`Route`]s (§3 "Channel"). Only entries tagged `preferred` and
/// whose `state` is ACTIVE/LIVE (case-insensitive) are indexed — §3, §4.2.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRegistryEntry {
    pub chain_a: String,
    pub chain_b: String,
    pub connection_id: String,
    pub channel_id_a: String,
    pub channel_id_b: String,
    pub port_id: String,
    pub ordering: ChannelOrdering,
    pub state: String,
    #[serde(default)]
    pub preferred: bool,
}

impl ChannelRegistryEntry {
    pub fn is_indexable(&self) -> bool {
        self.preferred && is_active_state(&self.state)
    }
}

pub fn is_active_state(state: &str) -> bool {
    matches!(state.to_ascii_uppercase().as_str(), "ACTIVE" | "LIVE")
}

/// A directed adjacency between two chains with a specific channel and its
/// set of permitted tokens (§3 "Channel", GLOSSARY "Route").
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Route {
    pub from_chain_id: String,
    pub to_chain_id: String,
    pub connection_id: String,
    pub channel_id: String,
    pub counterparty_channel_id: String,
    pub port_id: String,
    pub ordering: ChannelOrdering,
    pub state: String,
    /// Keyed by the source-chain-local denom.
    pub allowed_tokens: HashMap<String, TokenInfo>,
}

impl Route {
    pub fn is_active(&self) -> bool {
        is_active_state(&self.state)
    }
}

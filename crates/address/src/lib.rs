//! C4 — re-encodes a bech32-style address under a different chain's
//! human-readable prefix (§4.4). Used by the memo builder to derive
//! sender/receiver addresses on intermediate chains inside nested forward
//! memos.

use std::collections::HashMap;

use bech32::{decode, encode, Bech32, Hrp};
use interhop_types::RouterError;

/// Holds `chain_id -> address prefix`.
pub struct AddressConverter<'a> {
    prefixes: &'a HashMap<String, String>,
}

impl<'a> AddressConverter<'a> {
    pub fn new(prefixes: &'a HashMap<String, String>) -> Self {
        Self { prefixes }
    }

    /// Bech32-decodes `address`, discards its prefix while keeping the
    /// payload, and re-encodes under `target_chain_id`'s prefix.
    pub fn convert(&self, address: &str, target_chain_id: &str) -> Result<String, RouterError> {
        let (_hrp, data) =
            decode(address).map_err(|e| RouterError::InvalidAddress(e.to_string()))?;

        let target_prefix = self
            .prefixes
            .get(target_chain_id)
            .ok_or_else(|| RouterError::UnknownChain(target_chain_id.to_string()))?;

        let hrp = Hrp::parse(target_prefix)
            .map_err(|e| RouterError::InvalidAddress(e.to_string()))?;

        encode::<Bech32>(hrp, &data).map_err(|e| RouterError::InvalidAddress(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prefixes() -> HashMap<String, String> {
        let mut m = HashMap::new();
        m.insert("cosmoshub-4".to_string(), "cosmos".to_string());
        m.insert("osmosis-1".to_string(), "osmo".to_string());
        m.insert("juno-1".to_string(), "juno".to_string());
        m
    }

    #[test]
    fn converts_prefix_preserving_payload() {
        let p = prefixes();
        let converter = AddressConverter::new(&p);
        let cosmos_addr = "cosmos1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqlvrlaj";
        let converted = converter.convert(cosmos_addr, "osmosis-1").unwrap();
        assert!(converted.starts_with("osmo1"));
    }

    #[test]
    fn conversion_is_involutive() {
        let p = prefixes();
        let converter = AddressConverter::new(&p);
        let cosmos_addr = "cosmos1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqlvrlaj";
        let to_osmo = converter.convert(cosmos_addr, "osmosis-1").unwrap();
        let back = converter.convert(&to_osmo, "cosmoshub-4").unwrap();
        assert_eq!(back, cosmos_addr);
    }

    #[test]
    fn malformed_address_fails() {
        let p = prefixes();
        let converter = AddressConverter::new(&p);
        assert!(converter.convert("not-a-bech32-address!!", "osmosis-1").is_err());
    }

    #[test]
    fn unknown_target_chain_fails() {
        let p = prefixes();
        let converter = AddressConverter::new(&p);
        let cosmos_addr = "cosmos1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqlvrlaj";
        assert!(converter.convert(cosmos_addr, "no-such-chain").is_err());
    }
}

use interhop_routeindex::RouteIndex;
use interhop_types::{DirectRoute, IbcLeg, RouteRequest, RouterError, TokenMapping};

/// §4.5 `find_direct`, §8 invariant #3: a route exists iff the source's
/// local denom is a key of the route's `allowed_tokens` and, when the
/// caller named a destination denom, it matches that entry's `ibc_denom`.
pub fn find_direct_route(
    index: &RouteIndex,
    req: &RouteRequest,
) -> Result<Option<DirectRoute>, RouterError> {
    let Some(route) = index.find_direct(&req.chain_from, &req.chain_to) else {
        return Ok(None);
    };

    let token_from = index.resolve_token(&req.chain_from, &req.token_from_denom)?;
    let Some(entry) = route.allowed_tokens.get(&token_from.chain_denom) else {
        return Ok(None);
    };

    if let Some(expected) = &req.token_to_denom {
        if expected != &entry.ibc_denom {
            return Ok(None);
        }
    }

    Ok(Some(DirectRoute {
        transfer: IbcLeg {
            from_chain: req.chain_from.clone(),
            to_chain: req.chain_to.clone(),
            channel: route.channel_id.clone(),
            port: route.port_id.clone(),
            token: TokenMapping {
                from_denom: token_from.chain_denom.clone(),
                to_denom: entry.ibc_denom.clone(),
            },
            amount: req.amount_in.clone(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use interhop_types::{ChainInput, ChannelOrdering, ChannelRegistryEntry, NativeToken, RegistryInput};
    use std::collections::HashMap;

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

    fn request(token_to: Option<&str>) -> RouteRequest {
        RouteRequest {
            chain_from: "cosmoshub-4".to_string(),
            chain_to: "osmosis-1".to_string(),
            token_from_denom: "uatom".to_string(),
            token_to_denom: token_to.map(str::to_string),
            amount_in: "1000000".to_string(),
            sender_address: "cosmos1sender".to_string(),
            receiver_address: "osmo1receiver".to_string(),
            smart_route: false,
            slippage_bps: None,
        }
    }

    fn index() -> RouteIndex {
        let mut chains = HashMap::new();
        chains.insert("cosmoshub-4".to_string(), chain("cosmoshub-4", vec![native("uatom")]));
        chains.insert("osmosis-1".to_string(), chain("osmosis-1", vec![native("uosmo")]));
        let input = RegistryInput {
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
        };
        RouteIndex::build(&input).unwrap()
    }

    #[test]
    fn s1_direct_uatom_to_osmosis() {
        let idx = index();
        let req = request(Some(
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2",
        ));
        let route = find_direct_route(&idx, &req).unwrap().unwrap();
        assert_eq!(route.transfer.channel, "channel-0");
        assert_eq!(route.transfer.amount, "1000000");
        assert_eq!(route.transfer.token.from_denom, "uatom");
    }

    #[test]
    fn mismatched_requested_destination_denom_yields_no_route() {
        let idx = index();
        let req = request(Some("ibc/wrong"));
        assert!(find_direct_route(&idx, &req).unwrap().is_none());
    }

    #[test]
    fn absent_destination_denom_is_inferred_from_the_route() {
        let idx = index();
        let req = request(None);
        let route = find_direct_route(&idx, &req).unwrap().unwrap();
        assert_eq!(
            route.transfer.token.to_denom,
            "ibc/27394FB092D2ECCD56123C74F36E4C1F926001CEADA9CA97EA622B25F41E5EB2"
        );
    }
}

use std::collections::{HashMap, HashSet, VecDeque};

use interhop_address::AddressConverter;
use interhop_memo::{build_forward, default_timeout_ns, ForwardHop};
use interhop_routeindex::RouteIndex;
use interhop_types::{IbcLeg, IndirectRoute, Route, RouteRequest, RouterError, TokenMapping};

struct BfsNode {
    chain: String,
    local_denom: String,
    path: Vec<String>,
    denoms: Vec<String>,
    legs: Vec<Route>,
}

/// §4.5 `find_indirect`, §8 invariant #4: shortest token-preserving path.
/// The travelling identity is threaded hop by hop rather than matched on
/// raw denom strings — each edge's `allowed_tokens` entry must carry the
/// same `(base_denom, origin_chain)` as the token the caller started with.
pub fn find_indirect_route(
    index: &RouteIndex,
    req: &RouteRequest,
    max_hops: usize,
) -> Result<Option<IndirectRoute>, RouterError> {
    let token_from = index.resolve_token(&req.chain_from, &req.token_from_denom)?;
    let identity = token_from.identity();

    let mut visited = HashSet::new();
    visited.insert(req.chain_from.clone());
    let mut queue = VecDeque::new();
    queue.push_back(BfsNode {
        chain: req.chain_from.clone(),
        local_denom: token_from.chain_denom.clone(),
        path: vec![req.chain_from.clone()],
        denoms: vec![token_from.chain_denom.clone()],
        legs: vec![],
    });

    while let Some(node) = queue.pop_front() {
        if node.legs.len() >= max_hops {
            continue;
        }
        for route in index.routes_from(&node.chain) {
            if !route.is_active() || visited.contains(&route.to_chain_id) {
                continue;
            }
            let Some(entry) = route.allowed_tokens.get(&node.local_denom) else {
                continue;
            };
            if entry.identity() != identity {
                continue;
            }

            if route.to_chain_id == req.chain_to {
                let dest_ok = req
                    .token_to_denom
                    .as_deref()
                    .map_or(true, |expected| expected == entry.ibc_denom);
                if !dest_ok {
                    continue;
                }
                let mut path = node.path.clone();
                path.push(route.to_chain_id.clone());
                let mut denoms = node.denoms.clone();
                denoms.push(entry.ibc_denom.clone());
                let mut legs = node.legs.clone();
                legs.push(route.clone());
                return Ok(Some(assemble(index, req, &path, &denoms, &legs)?));
            }

            visited.insert(route.to_chain_id.clone());
            let mut path = node.path.clone();
            path.push(route.to_chain_id.clone());
            let mut denoms = node.denoms.clone();
            denoms.push(entry.ibc_denom.clone());
            let mut legs = node.legs.clone();
            legs.push(route.clone());
            queue.push_back(BfsNode {
                chain: route.to_chain_id.clone(),
                local_denom: entry.ibc_denom.clone(),
                path,
                denoms,
                legs,
            });
        }
    }

    Ok(None)
}

fn assemble(
    index: &RouteIndex,
    req: &RouteRequest,
    path: &[String],
    denoms: &[String],
    legs: &[Route],
) -> Result<IndirectRoute, RouterError> {
    let mut ibc_legs = Vec::with_capacity(legs.len());
    for (i, leg) in legs.iter().enumerate() {
        ibc_legs.push(IbcLeg {
            from_chain: path[i].clone(),
            to_chain: path[i + 1].clone(),
            channel: leg.channel_id.clone(),
            port: leg.port_id.clone(),
            token: TokenMapping {
                from_denom: denoms[i].clone(),
                to_denom: denoms[i + 1].clone(),
            },
            amount: req.amount_in.clone(),
        });
    }

    let intermediate_chains = &path[1..path.len() - 1];
    let supports_pfm =
        path.len() > 2 && intermediate_chains.iter().all(|c| index.is_pfm_chain(c));

    let (pfm_start_chain, pfm_memo) = if supports_pfm {
        let prefixes: HashMap<String, String> = index
            .chains()
            .iter()
            .map(|(id, c)| (id.clone(), c.address_prefix.clone()))
            .collect();
        let converter = AddressConverter::new(&prefixes);

        let mut hops = Vec::with_capacity(legs.len() - 1);
        for (i, leg) in legs.iter().enumerate().skip(1) {
            let is_last = i == legs.len() - 1;
            let receiver = if is_last {
                req.receiver_address.clone()
            } else {
                converter.convert(&req.receiver_address, &path[i + 1])?
            };
            hops.push(ForwardHop {
                channel: leg.channel_id.clone(),
                port: leg.port_id.clone(),
                receiver,
                timeout_ns: default_timeout_ns(),
            });
        }
        (Some(path[1].clone()), Some(build_forward(&hops)))
    } else {
        (None, None)
    };

    Ok(IndirectRoute {
        path: path.to_vec(),
        legs: ibc_legs,
        supports_pfm,
        pfm_start_chain,
        pfm_memo,
    })
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

    fn chain(id: &str, tokens: Vec<NativeToken>, pfm: bool) -> ChainInput {
        ChainInput {
            chain_id: id.to_string(),
            registry_name: None,
            display_name: id.to_string(),
            address_prefix: id.to_string(),
            slip44: 118,
            broker: None,
            pfm,
            ibc_hooks_contract: None,
            native_tokens: tokens,
            received_tokens: vec![],
        }
    }

    fn channel(a: &str, b: &str, chan_a: &str, chan_b: &str) -> ChannelRegistryEntry {
        ChannelRegistryEntry {
            chain_a: a.to_string(),
            chain_b: b.to_string(),
            connection_id: "connection-0".to_string(),
            channel_id_a: chan_a.to_string(),
            channel_id_b: chan_b.to_string(),
            port_id: "transfer".to_string(),
            ordering: ChannelOrdering::Unordered,
            state: "ACTIVE".to_string(),
            preferred: true,
        }
    }

    fn three_chain_index(hub_pfm: bool) -> RouteIndex {
        let mut chains = HashMap::new();
        chains.insert("juno-1".to_string(), chain("juno-1", vec![native("ujuno")], true));
        chains.insert("noble-1".to_string(), chain("noble-1", vec![native("uusdc")], hub_pfm));
        chains.insert("osmosis-1".to_string(), chain("osmosis-1", vec![native("uosmo")], true));
        let input = RegistryInput {
            chains,
            channels: vec![
                channel("juno-1", "noble-1", "channel-0", "channel-1"),
                channel("noble-1", "osmosis-1", "channel-2", "channel-3"),
            ],
        };
        RouteIndex::build(&input).unwrap()
    }

    fn request() -> RouteRequest {
        RouteRequest {
            chain_from: "juno-1".to_string(),
            chain_to: "osmosis-1".to_string(),
            token_from_denom: "uusdc@noble-1".to_string(),
            token_to_denom: None,
            amount_in: "500000".to_string(),
            sender_address: "juno1sender".to_string(),
            receiver_address: "osmo1receiver".to_string(),
            smart_route: false,
            slippage_bps: None,
        }
    }

    #[test]
    fn finds_two_hop_path_and_supports_pfm() {
        let idx = three_chain_index(true);
        let req = request();
        let route = find_indirect_route(&idx, &req, 5).unwrap().unwrap();
        assert_eq!(route.path, vec!["juno-1", "noble-1", "osmosis-1"]);
        assert_eq!(route.legs.len(), 2);
        assert!(route.supports_pfm);
        assert_eq!(route.pfm_start_chain.as_deref(), Some("noble-1"));
        assert!(route.pfm_memo.is_some());
    }

    #[test]
    fn non_pfm_intermediate_disables_pfm_support() {
        let idx = three_chain_index(false);
        let req = request();
        let route = find_indirect_route(&idx, &req, 5).unwrap().unwrap();
        assert!(!route.supports_pfm);
        assert!(route.pfm_memo.is_none());
    }

    #[test]
    fn amount_is_preserved_on_every_leg() {
        let idx = three_chain_index(true);
        let req = request();
        let route = find_indirect_route(&idx, &req, 5).unwrap().unwrap();
        assert!(route.legs.iter().all(|l| l.amount == "500000"));
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use interhop_address::AddressConverter;
use interhop_broker::{BrokerClient, SwapResult};
use interhop_config::BrokerSettings;
use interhop_memo::{
    build_forward_swap, build_swap, build_swap_forward, build_swap_forward_value,
    build_swap_multihop_forward, build_swap_value, default_timeout_ns, ForwardHop, IbcInfo,
    MinAsset, SwapOperation, SwapParams,
};
use interhop_routeindex::RouteIndex;
use interhop_types::{
    min_output, parse_amount, BrokerExecutionData, BrokerSwapCase, BrokerSwapRoute, IbcLeg,
    MultiHopInfo, PoolHop, Route, RouteRequest, RouterError, SwapQuote, TokenInfo, TokenMapping,
};
use tracing::warn;

use crate::retry;

/// A `MultiHopInfo` candidate plus the broker-local denoms discovered while
/// building it — not part of the public record, so kept alongside rather
/// than stuffed into it.
struct Candidate {
    info: MultiHopInfo,
    inbound_denoms: Vec<String>,
    outbound_denoms: Vec<String>,
}

/// §4.6 step 3: iterate broker candidates, querying each with retry until
/// one succeeds. Brokers are tried in `chain_id` order for determinism.
pub async fn find_broker_swap_route(
    index: &RouteIndex,
    brokers: &HashMap<String, Arc<dyn BrokerClient>>,
    settings: &BrokerSettings,
    req: &RouteRequest,
) -> Result<Option<BrokerSwapRoute>, RouterError> {
    let Some(token_to_denom) = req.token_to_denom.clone() else {
        return Ok(None);
    };

    let mut broker_chains: Vec<&str> = index.broker_chains().collect();
    broker_chains.sort_unstable();

    let mut last_error: Option<RouterError> = None;

    for broker_chain in broker_chains {
        let candidate = match build_candidate(index, req, &token_to_denom, broker_chain) {
            Ok(Some(c)) => c,
            Ok(None) => continue,
            Err(e) => {
                last_error = Some(e);
                continue;
            }
        };

        let Some(broker_id) = index.chain(broker_chain).and_then(|c| c.broker_id()) else {
            continue;
        };
        let Some(client) = brokers.get(broker_id) else {
            continue;
        };

        let token_in_on_broker = candidate
            .inbound_denoms
            .last()
            .expect("inbound_denoms always has at least one entry")
            .clone();
        let amount_in = parse_amount(&req.amount_in)?;
        let single_route_preferred = !req.smart_route;

        match retry::query_swap_with_retry(
            client.as_ref(),
            &token_in_on_broker,
            amount_in,
            &candidate.info.token_out_on_broker.chain_denom,
            single_route_preferred,
            settings,
        )
        .await
        {
            Ok(swap) => {
                let route = assemble_route(index, req, client.as_ref(), &candidate, &swap)?;
                return Ok(Some(route));
            }
            Err(e) => {
                warn!(broker = broker_id, error = %e, "broker candidate failed, trying next");
                last_error = Some(RouterError::BrokerNoRoute(e.to_string()));
            }
        }
    }

    if let Some(e) = last_error {
        return Err(e);
    }
    Ok(None)
}

/// Builds the structural `MultiHopInfo` for one broker, per the four cases
/// of §4.6. Returns `Ok(None)` when this broker has no viable inbound or
/// outbound path for the request.
fn build_candidate(
    index: &RouteIndex,
    req: &RouteRequest,
    token_to_denom: &str,
    broker_chain: &str,
) -> Result<Option<Candidate>, RouterError> {
    let token_in = index.resolve_token(&req.chain_from, &req.token_from_denom)?;
    let source_is_broker = req.chain_from == broker_chain;
    let swap_only = req.chain_to == broker_chain;

    let (inbound_routes, inbound_path, inbound_intermediate_tokens, inbound_denoms) =
        if source_is_broker {
            (vec![], vec![broker_chain.to_string()], vec![], vec![token_in.chain_denom.clone()])
        } else {
            match discover_inbound(index, &req.chain_from, broker_chain, &token_in) {
                Some(found) => found,
                None => return Ok(None),
            }
        };

    let token_out = if swap_only {
        index.resolve_token(broker_chain, token_to_denom)?
    } else {
        index.resolve_token(&req.chain_to, token_to_denom)?
    };

    let token_out_on_broker = if swap_only {
        token_out.clone()
    } else {
        match index
            .resolver()
            .infer_token_to_denom(&req.chain_to, token_to_denom, broker_chain)
        {
            Ok(t) => t,
            Err(_) => return Ok(None),
        }
    };

    let (outbound_routes, outbound_intermediate_tokens, outbound_denoms) = if swap_only {
        (vec![], vec![], vec![token_out_on_broker.chain_denom.clone()])
    } else {
        match discover_outbound(index, broker_chain, &req.chain_to, &token_out_on_broker, &token_out) {
            Some(found) => found,
            None => return Ok(None),
        }
    };

    let info = MultiHopInfo {
        broker_id: index
            .chain(broker_chain)
            .and_then(|c| c.broker_id())
            .unwrap_or_default()
            .to_string(),
        broker_chain_id: broker_chain.to_string(),
        inbound_routes,
        inbound_path,
        inbound_intermediate_tokens,
        outbound_routes,
        outbound_intermediate_tokens,
        token_in,
        token_out,
        token_out_on_broker,
        swap_only,
        source_is_broker,
    };

    Ok(Some(Candidate {
        info,
        inbound_denoms,
        outbound_denoms,
    }))
}

type InboundFound = (Vec<Route>, Vec<String>, Vec<TokenInfo>, Vec<String>);

/// Direct source→broker route, or (§4.6 "Multi-hop inbound discovery") a
/// single intermediate chain X such that source→X→broker both carry the
/// token. Only 2-hop inbound is attempted.
fn discover_inbound(
    index: &RouteIndex,
    from_chain: &str,
    broker_chain: &str,
    token_in: &TokenInfo,
) -> Option<InboundFound> {
    if let Some(route) = index.find_direct(from_chain, broker_chain) {
        if let Some(entry) = route.allowed_tokens.get(&token_in.chain_denom) {
            if entry.identity() == token_in.identity() {
                return Some((
                    vec![route.clone()],
                    vec![from_chain.to_string(), broker_chain.to_string()],
                    vec![],
                    vec![token_in.chain_denom.clone(), entry.ibc_denom.clone()],
                ));
            }
        }
    }

    for route1 in index.routes_from(from_chain) {
        if !route1.is_active() || route1.to_chain_id == broker_chain {
            continue;
        }
        let Some(entry1) = route1.allowed_tokens.get(&token_in.chain_denom) else {
            continue;
        };
        if entry1.identity() != token_in.identity() {
            continue;
        }

        let Some(route2) = index.find_direct(&route1.to_chain_id, broker_chain) else {
            continue;
        };
        let Some(entry2) = route2.allowed_tokens.get(&entry1.ibc_denom) else {
            continue;
        };
        if entry2.identity() != token_in.identity() {
            continue;
        }

        let intermediate = TokenInfo {
            chain_denom: entry1.ibc_denom.clone(),
            ibc_denom: entry2.ibc_denom.clone(),
            base_denom: token_in.base_denom.clone(),
            origin_chain: token_in.origin_chain.clone(),
            decimals: token_in.decimals,
        };

        return Some((
            vec![route1.clone(), route2.clone()],
            vec![from_chain.to_string(), route1.to_chain_id.clone(), broker_chain.to_string()],
            vec![intermediate],
            vec![
                token_in.chain_denom.clone(),
                entry1.ibc_denom.clone(),
                entry2.ibc_denom.clone(),
            ],
        ));
    }

    None
}

type OutboundFound = (Vec<Route>, Vec<TokenInfo>, Vec<String>);

/// Direct broker→destination route, or (§4.6 "4-chain outbound") when the
/// output token's origin is neither the broker nor the destination, a
/// broker→origin (unwind) → origin→destination (forward) path.
fn discover_outbound(
    index: &RouteIndex,
    broker_chain: &str,
    to_chain: &str,
    token_out_on_broker: &TokenInfo,
    token_out: &TokenInfo,
) -> Option<OutboundFound> {
    if let Some(route) = index.find_direct(broker_chain, to_chain) {
        if let Some(entry) = route.allowed_tokens.get(&token_out_on_broker.chain_denom) {
            if entry.identity() == token_out.identity() {
                return Some((
                    vec![route.clone()],
                    vec![],
                    vec![token_out_on_broker.chain_denom.clone(), entry.ibc_denom.clone()],
                ));
            }
        }
    }

    if token_out.origin_chain == broker_chain || token_out.origin_chain == to_chain {
        return None;
    }

    let origin_chain = token_out.origin_chain.clone();
    let route1 = index.find_direct(broker_chain, &origin_chain)?;
    let entry1 = route1.allowed_tokens.get(&token_out_on_broker.chain_denom)?;
    if entry1.ibc_denom != token_out.base_denom {
        return None;
    }

    let route2 = index.find_direct(&origin_chain, to_chain)?;
    let entry2 = route2.allowed_tokens.get(&token_out.base_denom)?;
    if entry2.identity() != token_out.identity() {
        return None;
    }

    let intermediate = TokenInfo {
        chain_denom: token_out.base_denom.clone(),
        ibc_denom: entry2.ibc_denom.clone(),
        base_denom: token_out.base_denom.clone(),
        origin_chain: token_out.origin_chain.clone(),
        decimals: token_out.decimals,
    };

    Some((
        vec![route1.clone(), route2.clone()],
        vec![intermediate],
        vec![
            token_out_on_broker.chain_denom.clone(),
            entry1.ibc_denom.clone(),
            entry2.ibc_denom.clone(),
        ],
    ))
}

fn assemble_route(
    index: &RouteIndex,
    req: &RouteRequest,
    client: &dyn BrokerClient,
    candidate: &Candidate,
    swap: &SwapResult,
) -> Result<BrokerSwapRoute, RouterError> {
    let info = &candidate.info;

    let inbound_legs = legs_from(&info.inbound_path, &candidate.inbound_denoms, &info.inbound_routes, &req.amount_in);

    let outbound_amount = swap.amount_out.to_string();
    let outbound_path = outbound_path_ids(info);
    let outbound_legs = legs_from(&outbound_path, &candidate.outbound_denoms, &info.outbound_routes, &outbound_amount);

    let outbound_supports_pfm = if info.outbound_routes.len() <= 1 {
        true
    } else {
        info.outbound_routes[..info.outbound_routes.len() - 1]
            .iter()
            .all(|r| index.is_pfm_chain(&r.to_chain_id))
    };

    let mut path = info.inbound_path.clone();
    path.extend(outbound_path.into_iter().skip(1));

    let min_out = min_output(swap.amount_out, req.slippage_bps());

    let swap_quote = SwapQuote {
        broker: client.get_broker_type().to_string(),
        token_in: candidate
            .inbound_denoms
            .last()
            .cloned()
            .unwrap_or_default(),
        token_out: info.token_out_on_broker.chain_denom.clone(),
        amount_in: swap.amount_in.to_string(),
        amount_out: swap.amount_out.to_string(),
        price_impact: swap.price_impact.clone(),
        effective_fee: swap.effective_fee.clone(),
        route_data: swap.route_data.clone(),
    };

    let execution = if req.smart_route {
        Some(build_execution(index, req, info, swap, min_out)?)
    } else {
        None
    };

    Ok(BrokerSwapRoute {
        path,
        inbound_legs,
        swap: swap_quote,
        outbound_legs,
        outbound_supports_pfm,
        execution,
    })
}

fn outbound_path_ids(info: &MultiHopInfo) -> Vec<String> {
    if info.outbound_routes.is_empty() {
        return vec![info.broker_chain_id.clone()];
    }
    let mut ids = vec![info.outbound_routes[0].from_chain_id.clone()];
    ids.extend(info.outbound_routes.iter().map(|r| r.to_chain_id.clone()));
    ids
}

fn legs_from(path: &[String], denoms: &[String], routes: &[Route], amount: &str) -> Vec<IbcLeg> {
    routes
        .iter()
        .enumerate()
        .map(|(i, route)| IbcLeg {
            from_chain: path[i].clone(),
            to_chain: path[i + 1].clone(),
            channel: route.channel_id.clone(),
            port: route.port_id.clone(),
            token: TokenMapping {
                from_denom: denoms[i].clone(),
                to_denom: denoms[i + 1].clone(),
            },
            amount: amount.to_string(),
        })
        .collect()
}

fn operations_from_pools(pools: &[PoolHop]) -> Vec<SwapOperation> {
    pools
        .iter()
        .map(|p| SwapOperation {
            pool: p.pool_id.clone(),
            denom_in: p.denom_in.clone(),
            denom_out: p.denom_out.clone(),
        })
        .collect()
}

fn build_execution(
    index: &RouteIndex,
    req: &RouteRequest,
    info: &MultiHopInfo,
    swap: &SwapResult,
    min_out: u128,
) -> Result<BrokerExecutionData, RouterError> {
    let hook_contract = index
        .chain(&info.broker_chain_id)
        .and_then(|c| c.ibc_hooks_contract.clone())
        .ok_or_else(|| {
            RouterError::Internal(format!("broker {} has no ibc-hooks contract", info.broker_chain_id))
        })?;

    let prefixes: HashMap<String, String> = index
        .chains()
        .iter()
        .map(|(id, c)| (id.clone(), c.address_prefix.clone()))
        .collect();
    let converter = AddressConverter::new(&prefixes);

    let params = SwapParams {
        hook_contract: hook_contract.clone(),
        venue: swap.route_data.venue.clone(),
        operations: operations_from_pools(&swap.route_data.pools),
        min_asset: MinAsset {
            denom: info.token_out_on_broker.chain_denom.clone(),
            amount: min_out.to_string(),
        },
        timeout_ns: default_timeout_ns(),
    };

    let recover_address = converter.convert(&req.sender_address, &info.broker_chain_id)?;
    let min_output_amount = min_out.to_string();

    match info.case() {
        BrokerSwapCase::SameChain => {
            let value = build_swap_value(&params, &req.receiver_address);
            Ok(BrokerExecutionData {
                memo: None,
                ibc_receiver: None,
                recover_address: None,
                smart_contract_data: Some(value),
                min_output_amount,
                uses_wasm: true,
                description: "direct swap executed on the broker chain".to_string(),
            })
        }
        BrokerSwapCase::SwapOnly => {
            let inner = build_swap(&params, &req.receiver_address);
            let memo = if info.inbound_routes.len() <= 1 {
                inner
            } else {
                let second_leg = &info.inbound_routes[1];
                let hop = ForwardHop {
                    channel: second_leg.channel_id.clone(),
                    port: second_leg.port_id.clone(),
                    receiver: hook_contract.clone(),
                    timeout_ns: default_timeout_ns(),
                };
                build_forward_swap(std::slice::from_ref(&hop), &inner)
            };
            Ok(BrokerExecutionData {
                memo: Some(memo),
                ibc_receiver: Some(hook_contract),
                recover_address: None,
                smart_contract_data: None,
                min_output_amount,
                uses_wasm: true,
                description: "inbound ibc transfer carrying a swap-and-transfer memo".to_string(),
            })
        }
        BrokerSwapCase::SourceIsBroker => {
            let value = if info.outbound_routes.len() <= 1 {
                let ibc_info = IbcInfo {
                    source_channel: outbound_channel(info, 0),
                    receiver: req.receiver_address.clone(),
                    memo: None,
                    recover_address: recover_address.clone(),
                };
                build_swap_forward_value(&params, &ibc_info)
            } else {
                let remaining = vec![ForwardHop {
                    channel: outbound_channel(info, 1),
                    port: outbound_port(info, 1),
                    receiver: req.receiver_address.clone(),
                    timeout_ns: default_timeout_ns(),
                }];
                let json = build_swap_multihop_forward(
                    &params,
                    &recover_address,
                    &outbound_channel(info, 0),
                    &remaining,
                );
                serde_json::from_str(&json)
                    .map_err(|e| RouterError::Internal(format!("invalid memo json: {e}")))?
            };
            Ok(BrokerExecutionData {
                memo: None,
                ibc_receiver: Some(req.receiver_address.clone()),
                recover_address: Some(recover_address),
                smart_contract_data: Some(value),
                min_output_amount,
                uses_wasm: true,
                description: "direct contract swap with a post-swap ibc transfer".to_string(),
            })
        }
        BrokerSwapCase::Full => {
            let inner = if info.outbound_routes.len() <= 1 {
                let ibc_info = IbcInfo {
                    source_channel: outbound_channel(info, 0),
                    receiver: req.receiver_address.clone(),
                    memo: None,
                    recover_address: recover_address.clone(),
                };
                build_swap_forward(&params, &ibc_info)
            } else {
                let remaining = vec![ForwardHop {
                    channel: outbound_channel(info, 1),
                    port: outbound_port(info, 1),
                    receiver: req.receiver_address.clone(),
                    timeout_ns: default_timeout_ns(),
                }];
                build_swap_multihop_forward(&params, &recover_address, &outbound_channel(info, 0), &remaining)
            };

            let memo = if info.inbound_routes.len() <= 1 {
                inner
            } else {
                let second_leg = &info.inbound_routes[1];
                let hop = ForwardHop {
                    channel: second_leg.channel_id.clone(),
                    port: second_leg.port_id.clone(),
                    receiver: hook_contract.clone(),
                    timeout_ns: default_timeout_ns(),
                };
                build_forward_swap(std::slice::from_ref(&hop), &inner)
            };

            Ok(BrokerExecutionData {
                memo: Some(memo),
                ibc_receiver: Some(hook_contract),
                recover_address: Some(recover_address),
                smart_contract_data: None,
                min_output_amount,
                uses_wasm: true,
                description: "inbound ibc transfer with a swap and a post-swap ibc transfer".to_string(),
            })
        }
    }
}

fn outbound_channel(info: &MultiHopInfo, leg: usize) -> String {
    info.outbound_routes
        .get(leg)
        .map(|r| r.channel_id.clone())
        .unwrap_or_default()
}

fn outbound_port(info: &MultiHopInfo, leg: usize) -> String {
    info.outbound_routes
        .get(leg)
        .map(|r| r.port_id.clone())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use interhop_broker::{BrokerError, MockBrokerClient};
    use interhop_config::BrokerSettings;
    use interhop_types::{
        BrokerInfo, ChainInput, ChannelOrdering, ChannelRegistryEntry, NativeToken, RegistryInput,
    };

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

    fn chain(id: &str, tokens: Vec<NativeToken>, broker: bool) -> ChainInput {
        ChainInput {
            chain_id: id.to_string(),
            registry_name: None,
            display_name: id.to_string(),
            address_prefix: id.to_string(),
            slip44: 118,
            broker: broker.then(|| BrokerInfo {
                broker_id: "osmosis-sqs".to_string(),
            }),
            pfm: true,
            ibc_hooks_contract: broker.then(|| "osmo1hook".to_string()),
            native_tokens: tokens,
            received_tokens: vec![],
        }
    }

    fn two_chain_index() -> RouteIndex {
        let mut chains = HashMap::new();
        chains.insert("cosmoshub-4".to_string(), chain("cosmoshub-4", vec![native("uatom")], false));
        chains.insert("osmosis-1".to_string(), chain("osmosis-1", vec![native("uosmo")], true));
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

    fn request(smart_route: bool) -> RouteRequest {
        RouteRequest {
            chain_from: "cosmoshub-4".to_string(),
            chain_to: "osmosis-1".to_string(),
            token_from_denom: "uatom".to_string(),
            token_to_denom: Some("uosmo".to_string()),
            amount_in: "1000000".to_string(),
            sender_address: "cosmos1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqlvrlaj".to_string(),
            receiver_address: "osmo1receiver".to_string(),
            smart_route,
            slippage_bps: None,
        }
    }

    fn brokers(client: MockBrokerClient) -> HashMap<String, Arc<dyn BrokerClient>> {
        let mut m: HashMap<String, Arc<dyn BrokerClient>> = HashMap::new();
        m.insert("osmosis-sqs".to_string(), Arc::new(client));
        m
    }

    #[tokio::test]
    async fn swap_only_case_produces_wasm_hook_memo() {
        let idx = two_chain_index();
        let req = request(true);
        let clients = brokers(MockBrokerClient::new("osmosis-sqs", 10_000_000_000, 0.003));
        let route = find_broker_swap_route(&idx, &clients, &BrokerSettings::default(), &req)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(route.path, vec!["cosmoshub-4", "osmosis-1"]);
        assert_eq!(route.inbound_legs.len(), 1);
        assert!(route.outbound_legs.is_empty());
        assert_eq!(route.swap.token_out, "uosmo");

        let execution = route.execution.unwrap();
        assert_eq!(execution.ibc_receiver.as_deref(), Some("osmo1hook"));
        assert!(execution.memo.unwrap().contains("swap_and_action"));
    }

    #[tokio::test]
    async fn missing_destination_denom_skips_broker_swap() {
        let idx = two_chain_index();
        let mut req = request(false);
        req.token_to_denom = None;
        let clients = brokers(MockBrokerClient::new("osmosis-sqs", 10_000_000_000, 0.003));
        let route = find_broker_swap_route(&idx, &clients, &BrokerSettings::default(), &req)
            .await
            .unwrap();
        assert!(route.is_none());
    }

    #[tokio::test]
    async fn broker_no_route_is_surfaced_as_an_error() {
        let idx = two_chain_index();
        let req = request(false);
        let clients = brokers(MockBrokerClient::failing(
            "osmosis-sqs",
            BrokerError::NoRoute {
                token_in: "uatom".to_string(),
                token_out: "uosmo".to_string(),
            },
        ));
        let err = find_broker_swap_route(&idx, &clients, &BrokerSettings::default(), &req)
            .await
            .unwrap_err();
        assert!(matches!(err, RouterError::BrokerNoRoute(_)));
    }
}

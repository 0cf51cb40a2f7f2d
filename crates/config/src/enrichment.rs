//! C2 — config enrichment (§4.2): turns an operator-supplied
//! [`RegistryInput`] into a frozen [`RegistryConfig`] with computed IBC
//! denoms and per-route allowed-token maps.

use std::collections::{HashMap, HashSet};

use interhop_denom::hash_trace;
use interhop_types::{
    ChainConfig, IbcToken, RegistryConfig, RegistryInput, Route, RouterError, TokenInfo,
};

/// Runs the full enrichment algorithm (§4.2 steps 1-4).
pub fn enrich(input: &RegistryInput) -> Result<HashMap<String, ChainConfig>, RouterError> {
    enrich_with_routes(input).map(|(chains, _)| chains)
}

/// Also returns the built routes, for callers (route index build) that
/// need both the enriched chains and the graph edges.
pub fn enrich_with_routes(
    input: &RegistryInput,
) -> Result<(HashMap<String, ChainConfig>, Vec<Route>), RouterError> {
    let name_to_chain = build_name_lookup(input);
    let mut routes = build_route_stubs(input, &name_to_chain)?;
    populate_forward_and_unwind(input, &mut routes)?;
    let explicit = apply_received_tokens(input, &mut routes)?;
    let ibc_tokens = compute_ibc_tokens(&routes, explicit);

    let mut chains = HashMap::new();
    for (chain_id, c) in &input.chains {
        chains.insert(
            chain_id.clone(),
            ChainConfig {
                chain_id: chain_id.clone(),
                display_name: c.display_name.clone(),
                address_prefix: c.address_prefix.clone(),
                slip44: c.slip44,
                broker: c.broker.clone(),
                pfm: c.pfm,
                ibc_hooks_contract: c.ibc_hooks_contract.clone(),
                native_tokens: c.native_tokens.clone(),
                ibc_tokens: ibc_tokens.get(chain_id).cloned().unwrap_or_default(),
            },
        );
    }

    Ok((chains, routes))
}

fn build_name_lookup(input: &RegistryInput) -> HashMap<String, String> {
    input
        .chains
        .iter()
        .map(|(chain_id, c)| {
            let name = c.registry_name.clone().unwrap_or_else(|| chain_id.clone());
            (name, chain_id.clone())
        })
        .collect()
}

fn build_route_stubs(
    input: &RegistryInput,
    name_to_chain: &HashMap<String, String>,
) -> Result<Vec<Route>, RouterError> {
    let mut routes = Vec::new();

    for entry in &input.channels {
        if !entry.is_indexable() {
            continue;
        }
        let chain_a = name_to_chain
            .get(&entry.chain_a)
            .ok_or_else(|| RouterError::UnknownChain(entry.chain_a.clone()))?
            .clone();
        let chain_b = name_to_chain
            .get(&entry.chain_b)
            .ok_or_else(|| RouterError::UnknownChain(entry.chain_b.clone()))?
            .clone();

        routes.push(Route {
            from_chain_id: chain_a.clone(),
            to_chain_id: chain_b.clone(),
            connection_id: entry.connection_id.clone(),
            channel_id: entry.channel_id_a.clone(),
            counterparty_channel_id: entry.channel_id_b.clone(),
            port_id: entry.port_id.clone(),
            ordering: entry.ordering,
            state: entry.state.clone(),
            allowed_tokens: HashMap::new(),
        });
        routes.push(Route {
            from_chain_id: chain_b,
            to_chain_id: chain_a,
            connection_id: entry.connection_id.clone(),
            channel_id: entry.channel_id_b.clone(),
            counterparty_channel_id: entry.channel_id_a.clone(),
            port_id: entry.port_id.clone(),
            ordering: entry.ordering,
            state: entry.state.clone(),
            allowed_tokens: HashMap::new(),
        });
    }

    Ok(routes)
}

/// Forward tokens (source's natives heading out) and unwind tokens
/// (destination's natives, already held on source in IBC form, heading
/// home) — §4.2 step 3.
fn populate_forward_and_unwind(
    input: &RegistryInput,
    routes: &mut [Route],
) -> Result<(), RouterError> {
    for route in routes.iter_mut() {
        let src = input
            .chains
            .get(&route.from_chain_id)
            .ok_or_else(|| RouterError::UnknownChain(route.from_chain_id.clone()))?;
        let dst = input
            .chains
            .get(&route.to_chain_id)
            .ok_or_else(|| RouterError::UnknownChain(route.to_chain_id.clone()))?;

        // Forward: src's native heading to dst. The trace uses dst's own
        // receiving channel — the same physical channel appears as
        // `counterparty_channel_id` from this route's (src -> dst) side.
        for nt in &src.native_tokens {
            if !nt.permits_destination(&route.to_chain_id) {
                continue;
            }
            let trace = format!(
                "{}/{}/{}",
                route.port_id, route.counterparty_channel_id, nt.denom
            );
            route.allowed_tokens.insert(
                nt.denom.clone(),
                TokenInfo {
                    chain_denom: nt.denom.clone(),
                    ibc_denom: hash_trace(&trace),
                    base_denom: nt.denom.clone(),
                    origin_chain: route.from_chain_id.clone(),
                    decimals: nt.decimals,
                },
            );
        }

        // Unwind: dst's native, already held on src via this same
        // (bidirectional) channel, heading home.
        for nt in &dst.native_tokens {
            let trace = format!("{}/{}/{}", route.port_id, route.channel_id, nt.denom);
            let local_denom = hash_trace(&trace);
            route.allowed_tokens.insert(
                local_denom.clone(),
                TokenInfo {
                    chain_denom: local_denom,
                    ibc_denom: nt.denom.clone(),
                    base_denom: nt.denom.clone(),
                    origin_chain: route.to_chain_id.clone(),
                    decimals: nt.decimals,
                },
            );
        }
    }

    Ok(())
}

/// Explicit multi-hop received tokens (§4.2 step 3, third bullet): walks
/// each `ReceivedToken`'s `via_chains`, computing the nested trace hop by
/// hop, and registers the result on the route that steps one hop back
/// toward the origin. Returns `(holder_chain, IbcToken)` pairs, since the
/// resulting token lives on the *holder*, not on the route's `to_chain_id`
/// (the route here points backward, toward origin).
fn apply_received_tokens(
    input: &RegistryInput,
    routes: &mut [Route],
) -> Result<Vec<(String, IbcToken)>, RouterError> {
    let mut produced = Vec::new();

    for (holder, chain_input) in &input.chains {
        for rt in &chain_input.received_tokens {
            let mut path = Vec::with_capacity(rt.via_chains.len() + 2);
            path.push(rt.origin_chain.clone());
            path.extend(rt.via_chains.iter().cloned());
            path.push(holder.clone());

            if path.len() < 2 {
                continue;
            }

            let mut trace = rt.origin_denom.clone();
            let mut denom_at = vec![rt.origin_denom.clone()];
            for i in 1..path.len() {
                let (port, channel) = receiving_channel(routes, &path[i - 1], &path[i])
                    .ok_or_else(|| {
                        RouterError::Internal(format!(
                            "no channel from {} to {} for received token {}",
                            path[i - 1],
                            path[i],
                            rt.origin_denom
                        ))
                    })?;
                trace = format!("{port}/{channel}/{trace}");
                denom_at.push(hash_trace(&trace));
            }

            let last = path.len() - 1;
            let prev_chain = path[last - 1].clone();
            let decimals = origin_decimals(input, &rt.origin_chain, &rt.origin_denom);

            let dest_repr = if last - 1 == 0 {
                rt.origin_denom.clone()
            } else {
                denom_at[last - 1].clone()
            };

            let token_info = TokenInfo {
                chain_denom: denom_at[last].clone(),
                ibc_denom: dest_repr,
                base_denom: rt.origin_denom.clone(),
                origin_chain: rt.origin_chain.clone(),
                decimals,
            };

            if let Some(route) = routes
                .iter_mut()
                .find(|r| &r.from_chain_id == holder && r.to_chain_id == prev_chain)
            {
                route
                    .allowed_tokens
                    .insert(denom_at[last].clone(), token_info.clone());
            }

            produced.push((
                holder.clone(),
                IbcToken {
                    ibc_denom: denom_at[last].clone(),
                    base_denom: rt.origin_denom.clone(),
                    origin_chain: rt.origin_chain.clone(),
                    decimals,
                    ibc_path: trace,
                    source_channel: receiving_channel(routes, &prev_chain, holder)
                        .map(|(_, c)| c)
                        .unwrap_or_default(),
                },
            ));
        }
    }

    Ok(produced)
}

fn origin_decimals(input: &RegistryInput, origin_chain: &str, origin_denom: &str) -> u8 {
    input
        .chains
        .get(origin_chain)
        .and_then(|c| c.native_tokens.iter().find(|n| n.denom == origin_denom))
        .map(|n| n.decimals)
        .unwrap_or(6)
}

/// `(port_id, receiving_chain's own channel_id)` for the hop `from -> to`.
fn receiving_channel(routes: &[Route], from: &str, to: &str) -> Option<(String, String)> {
    routes
        .iter()
        .find(|r| r.from_chain_id == from && r.to_chain_id == to)
        .map(|r| (r.port_id.clone(), r.counterparty_channel_id.clone()))
}

/// §4.2 step 4: de-duplicated union of all inbound IBC denoms, per chain,
/// plus the explicit multi-hop tokens produced above.
fn compute_ibc_tokens(
    routes: &[Route],
    explicit: Vec<(String, IbcToken)>,
) -> HashMap<String, Vec<IbcToken>> {
    let mut seen: HashMap<String, HashSet<String>> = HashMap::new();
    let mut out: HashMap<String, Vec<IbcToken>> = HashMap::new();

    let mut push = |chain: String, token: IbcToken| {
        if seen.entry(chain.clone()).or_default().insert(token.ibc_denom.clone()) {
            out.entry(chain).or_default().push(token);
        }
    };

    for route in routes {
        for v in route.allowed_tokens.values() {
            if v.origin_chain == route.to_chain_id {
                continue;
            }
            push(
                route.to_chain_id.clone(),
                IbcToken {
                    ibc_denom: v.ibc_denom.clone(),
                    base_denom: v.base_denom.clone(),
                    origin_chain: v.origin_chain.clone(),
                    decimals: v.decimals,
                    ibc_path: format!("{}/{}", route.port_id, route.counterparty_channel_id),
                    source_channel: route.counterparty_channel_id.clone(),
                },
            );
        }
    }

    for (chain, token) in explicit {
        push(chain, token);
    }

    out
}

//! C5 — builds the in-memory route graph from enriched config and
//! answers the graph queries the pathfinder (C6) composes into full
//! routes (§4.5).

use std::collections::{HashMap, HashSet, VecDeque};

use interhop_config::enrichment::enrich_with_routes;
use interhop_denom::DenomResolver;
use interhop_types::{ChainConfig, RegistryInput, Route, RouterError, TokenInfo};

/// The frozen route graph: chains, directed edges, and the lookup
/// indices built over them. Rebuilt wholesale on every config reload
/// (§6) — never mutated in place.
pub struct RouteIndex {
    chains: HashMap<String, ChainConfig>,
    /// `(from_chain_id, to_chain_id) -> Route`, one entry per directed pair.
    direct_routes: HashMap<(String, String), Route>,
    /// All routes leaving a chain, for BFS expansion.
    chain_routes: HashMap<String, Vec<Route>>,
    /// chain_ids that host a broker.
    broker_chains: HashSet<String>,
    /// broker_id -> chain_id hosting it.
    brokers: HashMap<String, String>,
    /// chain_ids with PFM support.
    pfm_chains: HashSet<String>,
}

impl RouteIndex {
    /// Runs enrichment (C2) and builds the graph over its output.
    pub fn build(input: &RegistryInput) -> Result<Self, RouterError> {
        let (chains, routes) = enrich_with_routes(input)?;
        Ok(Self::from_enriched(chains, routes))
    }

    /// Builds directly from an already-enriched chain/route set — used
    /// by callers that cache the enrichment artefact (§6) separately.
    pub fn from_enriched(chains: HashMap<String, ChainConfig>, routes: Vec<Route>) -> Self {
        // Phase 1: per-chain facts, independent of the route graph.
        let mut broker_chains = HashSet::new();
        let mut brokers = HashMap::new();
        let mut pfm_chains = HashSet::new();

        for (chain_id, chain) in &chains {
            if let Some(broker_id) = chain.broker_id() {
                broker_chains.insert(chain_id.clone());
                brokers.insert(broker_id.to_string(), chain_id.clone());
            }
            if chain.pfm {
                pfm_chains.insert(chain_id.clone());
            }
        }

        // Phase 2: index the graph edges.
        let mut direct_routes = HashMap::new();
        let mut chain_routes: HashMap<String, Vec<Route>> = HashMap::new();

        for route in routes {
            chain_routes
                .entry(route.from_chain_id.clone())
                .or_default()
                .push(route.clone());
            direct_routes.insert(
                (route.from_chain_id.clone(), route.to_chain_id.clone()),
                route,
            );
        }

        Self {
            chains,
            direct_routes,
            chain_routes,
            broker_chains,
            brokers,
            pfm_chains,
        }
    }

    pub fn chains(&self) -> &HashMap<String, ChainConfig> {
        &self.chains
    }

    pub fn chain(&self, chain_id: &str) -> Option<&ChainConfig> {
        self.chains.get(chain_id)
    }

    pub fn resolver(&self) -> DenomResolver<'_> {
        DenomResolver::new(&self.chains)
    }

    /// The single preferred, active channel directly connecting `from`
    /// and `to`, if one exists (§4.5 "Direct route").
    pub fn find_direct(&self, from: &str, to: &str) -> Option<&Route> {
        self.direct_routes
            .get(&(from.to_string(), to.to_string()))
            .filter(|r| r.is_active())
    }

    pub fn routes_from(&self, chain_id: &str) -> &[Route] {
        self.chain_routes
            .get(chain_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_broker_chain(&self, chain_id: &str) -> bool {
        self.broker_chains.contains(chain_id)
    }

    pub fn broker_chains(&self) -> impl Iterator<Item = &str> {
        self.broker_chains.iter().map(String::as_str)
    }

    pub fn broker_chain_for(&self, broker_id: &str) -> Option<&str> {
        self.brokers.get(broker_id).map(String::as_str)
    }

    pub fn is_pfm_chain(&self, chain_id: &str) -> bool {
        self.pfm_chains.contains(chain_id)
    }

    pub fn resolve_token(&self, chain_id: &str, denom: &str) -> Result<TokenInfo, RouterError> {
        self.resolver().resolve(chain_id, denom)
    }

    /// BFS over active routes, capped at `max_hops` edges, returning the
    /// ordered legs of the shortest path (§4.5 "Indirect route", §9).
    pub fn find_indirect_path(&self, from: &str, to: &str, max_hops: usize) -> Option<Vec<Route>> {
        if from == to {
            return None;
        }

        let mut visited = HashSet::new();
        visited.insert(from.to_string());
        // parent[chain] = (previous_chain, route taken to reach `chain`)
        let mut parent: HashMap<String, (String, Route)> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back((from.to_string(), 0usize));

        while let Some((current, depth)) = queue.pop_front() {
            if depth >= max_hops {
                continue;
            }
            for route in self.routes_from(&current) {
                if !route.is_active() {
                    continue;
                }
                let next = route.to_chain_id.clone();
                if visited.contains(&next) {
                    continue;
                }
                visited.insert(next.clone());
                parent.insert(next.clone(), (current.clone(), route.clone()));
                if next == to {
                    return Some(reconstruct_path(&parent, to));
                }
                queue.push_back((next, depth + 1));
            }
        }

        None
    }
}

fn reconstruct_path(parent: &HashMap<String, (String, Route)>, target: &str) -> Vec<Route> {
    let mut legs = Vec::new();
    let mut current = target.to_string();
    while let Some((prev, route)) = parent.get(&current) {
        legs.push(route.clone());
        current = prev.clone();
    }
    legs.reverse();
    legs
}

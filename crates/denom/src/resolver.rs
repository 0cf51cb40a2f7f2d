use std::collections::HashMap;

use interhop_types::{ChainConfig, RouterError, TokenInfo};

/// C3 — resolves human-readable or IBC denoms on a chain to a canonical
/// [`TokenInfo`]; disambiguates via `denom@origin` (§4.3).
pub struct DenomResolver<'a> {
    chains: &'a HashMap<String, ChainConfig>,
}

impl<'a> DenomResolver<'a> {
    pub fn new(chains: &'a HashMap<String, ChainConfig>) -> Self {
        Self { chains }
    }

    /// All token projections known on `chain_id`: natives (zero-hop, where
    /// `chain_denom == ibc_denom == base_denom`) plus received IBC tokens.
    pub fn tokens_on_chain(&self, chain_id: &str) -> Result<Vec<TokenInfo>, RouterError> {
        let chain = self
            .chains
            .get(chain_id)
            .ok_or_else(|| RouterError::UnknownChain(chain_id.to_string()))?;

        let mut tokens: Vec<TokenInfo> = chain
            .native_tokens
            .iter()
            .map(|t| TokenInfo {
                chain_denom: t.denom.clone(),
                ibc_denom: t.denom.clone(),
                base_denom: t.denom.clone(),
                origin_chain: chain_id.to_string(),
                decimals: t.decimals,
            })
            .collect();

        tokens.extend(chain.ibc_tokens.iter().map(|t| TokenInfo {
            chain_denom: t.ibc_denom.clone(),
            ibc_denom: t.ibc_denom.clone(),
            base_denom: t.base_denom.clone(),
            origin_chain: t.origin_chain.clone(),
            decimals: t.decimals,
        }));

        Ok(tokens)
    }

    /// `input` is either the exact chain denom (native or `ibc/...`) or a
    /// human-readable `"symbol"` / `"symbol@origin_chain"` form.
    pub fn resolve(&self, chain_id: &str, input: &str) -> Result<TokenInfo, RouterError> {
        let tokens = self.tokens_on_chain(chain_id)?;

        if input.starts_with("ibc/") {
            return tokens
                .into_iter()
                .find(|t| t.chain_denom == input)
                .ok_or_else(|| RouterError::DenomNotFound {
                    chain: chain_id.to_string(),
                    denom: input.to_string(),
                });
        }

        // Exact chain-local denom match (e.g. a native symbol used verbatim).
        if let Some((symbol, origin)) = split_symbol_origin(input) {
            let matches: Vec<TokenInfo> = tokens
                .iter()
                .filter(|t| {
                    t.base_denom == symbol && origin.map_or(true, |o| t.origin_chain == o)
                })
                .cloned()
                .collect();

            return match matches.len() {
                0 => Err(RouterError::DenomNotFound {
                    chain: chain_id.to_string(),
                    denom: input.to_string(),
                }),
                1 => Ok(matches.into_iter().next().unwrap()),
                _ => Err(RouterError::AmbiguousDenom {
                    chain: chain_id.to_string(),
                    symbol: symbol.to_string(),
                    origins: matches.into_iter().map(|t| t.origin_chain).collect(),
                }),
            };
        }

        Err(RouterError::DenomNotFound {
            chain: chain_id.to_string(),
            denom: input.to_string(),
        })
    }

    /// Used when the request omits the destination denom: resolve
    /// `src_denom` on `src_chain`, then look up the same
    /// `(base_denom, origin_chain)` identity on `dst_chain`.
    pub fn infer_token_to_denom(
        &self,
        src_chain: &str,
        src_denom: &str,
        dst_chain: &str,
    ) -> Result<TokenInfo, RouterError> {
        let src_token = self.resolve(src_chain, src_denom)?;
        let identity = src_token.identity();

        self.tokens_on_chain(dst_chain)?
            .into_iter()
            .find(|t| t.identity() == identity)
            .ok_or_else(|| RouterError::DenomNotFound {
                chain: dst_chain.to_string(),
                denom: format!("{}@{}", identity.0, identity.1),
            })
    }
}

/// Splits `"symbol"` or `"symbol@origin_chain"` into its parts.
fn split_symbol_origin(input: &str) -> Option<(&str, Option<&str>)> {
    if input.is_empty() {
        return None;
    }
    match input.split_once('@') {
        Some((symbol, origin)) => Some((symbol, Some(origin))),
        None => Some((input, None)),
    }
}

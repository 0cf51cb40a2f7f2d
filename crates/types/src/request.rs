use serde::{Deserialize, Serialize};

use crate::error::RouterError;

/// Default slippage tolerance, in basis points (§4.6).
pub const DEFAULT_SLIPPAGE_BPS: u32 = 100;
pub const MAX_SLIPPAGE_BPS: u32 = 10_000;

/// §6 "Request".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouteRequest {
    pub chain_from: String,
    pub chain_to: String,
    pub token_from_denom: String,
    /// Inferred via C3 when absent.
    #[serde(default)]
    pub token_to_denom: Option<String>,
    /// Decimal string, smallest unit.
    pub amount_in: String,
    pub sender_address: String,
    pub receiver_address: String,
    #[serde(default)]
    pub smart_route: bool,
    #[serde(default)]
    pub slippage_bps: Option<u32>,
}

impl RouteRequest {
    pub fn slippage_bps(&self) -> u32 {
        self.slippage_bps.unwrap_or(DEFAULT_SLIPPAGE_BPS)
    }

    /// Structural validation only (§7 "Validation"). Denom resolution and
    /// routing failures are reported by later stages.
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.chain_from.is_empty() {
            return Err(RouterError::MissingField("chain_from"));
        }
        if self.chain_to.is_empty() {
            return Err(RouterError::MissingField("chain_to"));
        }
        if self.token_from_denom.is_empty() {
            return Err(RouterError::MissingField("token_from_denom"));
        }
        if self.amount_in.is_empty() {
            return Err(RouterError::MissingField("amount_in"));
        }
        parse_amount(&self.amount_in)?;
        if self.sender_address.is_empty() {
            return Err(RouterError::MissingField("sender_address"));
        }
        if self.receiver_address.is_empty() {
            return Err(RouterError::MissingField("receiver_address"));
        }
        let slippage = self.slippage_bps();
        if slippage > MAX_SLIPPAGE_BPS {
            return Err(RouterError::SlippageOutOfRange(slippage));
        }
        Ok(())
    }
}

/// Parses a decimal smallest-unit amount string into a `u128`.
pub fn parse_amount(amount: &str) -> Result<u128, RouterError> {
    amount
        .parse::<u128>()
        .map_err(|_| RouterError::InvalidAmount(amount.to_string()))
}

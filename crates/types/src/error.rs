use thiserror::Error;

/// Error categories surfaced by the route planner (see spec §7).
///
/// Validation and resolution errors collapse into a failed `RouteResponse`
/// rather than propagating as a `Result::Err` across the public API;
/// `find_path` never returns `Err` for these. `RouterError` exists so each
/// crate that *can* fail before a `RouteResponse` is assembled (denom
/// resolution, address conversion, config enrichment) has one place to
/// report it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouterError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("slippage_bps out of range: {0} (expected 0..=10000)")]
    SlippageOutOfRange(u32),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("denom not found on {chain}: {denom}")]
    DenomNotFound { chain: String, denom: String },

    #[error("denom {symbol} is ambiguous on {chain}; possible origins: {origins:?}")]
    AmbiguousDenom {
        chain: String,
        symbol: String,
        origins: Vec<String>,
    },

    #[error("unknown chain: {0}")]
    UnknownChain(String),

    #[error("no route found from {from} to {to}")]
    NoRoute { from: String, to: String },

    #[error("broker transport failed after {attempts} attempts: {message}")]
    BrokerTransport { attempts: u32, message: String },

    #[error("broker reported no route: {0}")]
    BrokerNoRoute(String),

    #[error("internal invariant violated: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, RouterError>;

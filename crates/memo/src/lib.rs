//! Memo / payload builder (C7): the five canonical transfer shapes of
//! §4.7, each a pure function over a parameter struct emitting a JSON
//! string (or, for shape 5's splice point, a `serde_json::Value`).

mod compose;
mod forward;
mod swap;

pub use compose::build_forward_swap;
pub use forward::{build_forward, build_forward_chain, ForwardHop};
pub use swap::{
    build_swap, build_swap_forward, build_swap_forward_value, build_swap_multihop_forward,
    build_swap_value, IbcInfo, MinAsset, SwapOperation, SwapParams,
};

/// Default memo timeout: now + 10 minutes, in nanoseconds (§4.7).
pub fn default_timeout_ns() -> u64 {
    let now_ns = chrono::Utc::now().timestamp_nanos_opt().unwrap_or(0);
    now_ns as u64 + 10 * 60 * 1_000_000_000
}

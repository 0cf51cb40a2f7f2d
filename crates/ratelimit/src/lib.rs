//! Retry/backoff primitives for the broker RPC client (§4.8).

pub mod backoff;

pub use backoff::ExponentialBackoff;

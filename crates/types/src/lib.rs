//! Core data model for the cross-chain route planner: chains, tokens,
//! channels/routes, the internal broker-route record, and the public
//! request/response surface.

mod chain;
mod channel;
mod error;
mod multihop;
mod request;
mod response;
mod slippage;
mod token;

pub use chain::*;
pub use channel::*;
pub use error::*;
pub use multihop::*;
pub use request::*;
pub use response::*;
pub use slippage::*;
pub use token::*;

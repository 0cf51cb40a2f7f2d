//! Broker client contract (C8): the interface the pathfinder and memo
//! builder consume for swap quotes, a test double, and a reference HTTP
//! implementation against an Osmosis-SQS-shaped router API.

mod client;
mod error;
mod mock;
mod osmosis_sqs;

pub use client::{BrokerClient, SwapResult};
pub use error::BrokerError;
pub use mock::MockBrokerClient;
pub use osmosis_sqs::OsmosisSqsClient;

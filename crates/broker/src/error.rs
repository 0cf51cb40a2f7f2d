use thiserror::Error;

/// Broker-side failures as seen by the pathfinder's retry loop (§4.8, §7
/// "Broker transport"). `Transport` is retried with backoff; `NoRoute` is
/// terminal and moves on to the next broker candidate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BrokerError {
    #[error("broker transport error: {0}")]
    Transport(String),

    #[error("broker reported no route for {token_in} -> {token_out}")]
    NoRoute { token_in: String, token_out: String },

    #[error("broker returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl BrokerError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, BrokerError::Transport(_))
    }
}

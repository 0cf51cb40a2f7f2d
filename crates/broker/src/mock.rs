use async_trait::async_trait;
use interhop_types::{PoolHop, RouteData};

use crate::client::{BrokerClient, SwapResult};
use crate::error::BrokerError;

/// Fixed-quote broker client for pathfinder/memo tests. Applies a constant
/// fee rate and a mocked price, constant-product style (mirrors the
/// teacher's `MockDexClient`).
pub struct MockBrokerClient {
    broker_type: String,
    liquidity: u128,
    fee_rate: f64,
    mock_price: f64,
    venue: String,
    fail_with: Option<BrokerError>,
}

impl MockBrokerClient {
    pub fn new(broker_type: impl Into<String>, liquidity: u128, fee_rate: f64) -> Self {
        Self {
            broker_type: broker_type.into(),
            liquidity,
            fee_rate,
            mock_price: 10.5,
            venue: "mock-amm".to_string(),
            fail_with: None,
        }
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.mock_price = price;
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = venue.into();
        self
    }

    /// Makes every `query_swap` call fail with the given error, for
    /// exercising the pathfinder's retry and fallback-broker logic.
    pub fn failing(broker_type: impl Into<String>, error: BrokerError) -> Self {
        Self {
            broker_type: broker_type.into(),
            liquidity: 0,
            fee_rate: 0.0,
            mock_price: 0.0,
            venue: "mock-amm".to_string(),
            fail_with: Some(error),
        }
    }
}

#[async_trait]
impl BrokerClient for MockBrokerClient {
    fn get_broker_type(&self) -> &str {
        &self.broker_type
    }

    async fn query_swap(
        &self,
        token_in_denom: &str,
        amount_in: u128,
        token_out_denom: &str,
        _single_route_preferred: bool,
    ) -> Result<SwapResult, BrokerError> {
        if let Some(err) = &self.fail_with {
            return Err(err.clone());
        }

        if amount_in > self.liquidity {
            return Err(BrokerError::NoRoute {
                token_in: token_in_denom.to_string(),
                token_out: token_out_denom.to_string(),
            });
        }

        let amount_out = (amount_in as f64 * (1.0 - self.fee_rate) * self.mock_price) as u128;
        let price_impact = amount_in as f64 / self.liquidity.max(1) as f64;

        Ok(SwapResult {
            amount_in,
            amount_out,
            price_impact: format!("{:.4}", price_impact),
            effective_fee: format!("{:.4}", self.fee_rate),
            route_data: RouteData {
                venue: self.venue.clone(),
                pools: vec![PoolHop {
                    pool_id: "1".to_string(),
                    denom_in: token_in_denom.to_string(),
                    denom_out: token_out_denom.to_string(),
                }],
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn quotes_within_liquidity() {
        let client = MockBrokerClient::new("osmosis-sqs", 1_000_000_000, 0.003);
        let result = client.query_swap("uatom", 1_000_000, "uosmo", false).await.unwrap();
        assert!(result.amount_out > 0);
        assert_eq!(result.route_data.pools.len(), 1);
    }

    #[tokio::test]
    async fn rejects_amount_beyond_liquidity() {
        let client = MockBrokerClient::new("osmosis-sqs", 100, 0.003);
        let err = client.query_swap("uatom", 1_000_000, "uosmo", false).await.unwrap_err();
        assert!(matches!(err, BrokerError::NoRoute { .. }));
    }

    #[tokio::test]
    async fn failing_client_always_errors() {
        let client = MockBrokerClient::failing(
            "osmosis-sqs",
            BrokerError::Transport("connection reset".to_string()),
        );
        let err = client.query_swap("uatom", 1, "uosmo", false).await.unwrap_err();
        assert!(err.is_retryable());
    }
}

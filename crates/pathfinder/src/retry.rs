use std::time::Duration;

use interhop_broker::{BrokerClient, BrokerError, SwapResult};
use interhop_config::BrokerSettings;
use interhop_ratelimit::ExponentialBackoff;
use tracing::warn;

/// Calls `query_swap` with exponential-backoff retry on transport failures
/// (§4.6, §4.8, §5 "Retries"). `NoRoute`/`InvalidResponse` are terminal —
/// the caller should move on to the next broker candidate.
pub async fn query_swap_with_retry(
    client: &dyn BrokerClient,
    token_in_denom: &str,
    amount_in: u128,
    token_out_denom: &str,
    single_route_preferred: bool,
    settings: &BrokerSettings,
) -> Result<SwapResult, BrokerError> {
    let mut backoff = ExponentialBackoff::new(
        Duration::from_millis(settings.initial_backoff_ms),
        Duration::from_millis(settings.max_backoff_ms),
    );

    let mut attempt = 0;
    loop {
        let result = client
            .query_swap(token_in_denom, amount_in, token_out_denom, single_route_preferred)
            .await;

        match result {
            Ok(swap) => return Ok(swap),
            Err(e) if e.is_retryable() && attempt < settings.max_retries => {
                attempt += 1;
                let delay = backoff.next_delay();
                warn!(
                    broker = client.get_broker_type(),
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "retrying broker swap query"
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use interhop_broker::MockBrokerClient;

    fn settings() -> BrokerSettings {
        BrokerSettings {
            initial_backoff_ms: 1,
            max_backoff_ms: 2,
            max_retries: 2,
        }
    }

    #[tokio::test]
    async fn succeeds_without_retry_when_broker_is_healthy() {
        let client = MockBrokerClient::new("osmosis-sqs", 10_000_000, 0.003);
        let result = query_swap_with_retry(&client, "uatom", 1_000_000, "uosmo", false, &settings())
            .await
            .unwrap();
        assert!(result.amount_out > 0);
    }

    #[tokio::test]
    async fn no_route_is_terminal_not_retried() {
        let client = MockBrokerClient::failing(
            "osmosis-sqs",
            BrokerError::NoRoute {
                token_in: "uatom".to_string(),
                token_out: "uosmo".to_string(),
            },
        );
        let err = query_swap_with_retry(&client, "uatom", 1_000_000, "uosmo", false, &settings())
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::NoRoute { .. }));
    }

    #[tokio::test]
    async fn transport_error_exhausts_retries_then_fails() {
        let client = MockBrokerClient::failing("osmosis-sqs", BrokerError::Transport("down".to_string()));
        let err = query_swap_with_retry(&client, "uatom", 1_000_000, "uosmo", false, &settings())
            .await
            .unwrap_err();
        assert!(matches!(err, BrokerError::Transport(_)));
    }
}

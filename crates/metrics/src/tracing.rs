use std::sync::Arc;
use tracing::{field::Visit, span, Event, Level, Subscriber};
use tracing_subscriber::{
    fmt,
    layer::{Context, SubscriberExt},
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

use crate::collector::MetricsCollector;

/// Initialize tracing with metrics integration
pub fn init_tracing_with_metrics(collector: Arc<MetricsCollector>) -> Result<(), TracingError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,interhop=debug"));

    let fmt_layer = fmt::layer()
        .with_target(true)
        .with_thread_ids(true)
        .with_level(true)
        .json();

    let metrics_layer = MetricsLayer::new(collector);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .with(metrics_layer)
        .try_init()
        .map_err(|e| TracingError::InitError(e.to_string()))?;

    Ok(())
}

/// Tracing layer that records metrics from span events
pub struct MetricsLayer {
    collector: Arc<MetricsCollector>,
}

impl MetricsLayer {
    pub fn new(collector: Arc<MetricsCollector>) -> Self {
        Self { collector }
    }
}

impl<S> Layer<S> for MetricsLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let mut visitor = MetricsVisitor::new(&self.collector);
        event.record(&mut visitor);

        if *metadata.level() == Level::ERROR {
            if let Some(error_type) = visitor.error_type.as_ref() {
                self.collector.record_router_error(error_type);
            }
        }
    }

    fn on_enter(&self, _id: &span::Id, _ctx: Context<'_, S>) {}

    fn on_exit(&self, _id: &span::Id, _ctx: Context<'_, S>) {}
}

/// Visitor to extract metrics-relevant fields from events
struct MetricsVisitor<'a> {
    #[allow(dead_code)]
    collector: &'a MetricsCollector,
    error_type: Option<String>,
}

impl<'a> MetricsVisitor<'a> {
    fn new(collector: &'a MetricsCollector) -> Self {
        Self {
            collector,
            error_type: None,
        }
    }
}

impl<'a> Visit for MetricsVisitor<'a> {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "error_type" {
            self.error_type = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "error_type" {
            self.error_type = Some(value.to_string());
        }
    }
}

/// Correlation ID for tracking a route request across components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CorrelationId(uuid::Uuid);

impl CorrelationId {
    /// Generate a new correlation ID
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }

    /// Get the correlation ID as a string
    pub fn as_str(&self) -> String {
        self.0.to_string()
    }
}

impl Default for CorrelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Span context for a single route-search request (§4.6)
#[derive(Debug, Clone)]
pub struct RouteRequestSpan {
    pub correlation_id: CorrelationId,
    pub chain_from: String,
    pub chain_to: String,
}

impl RouteRequestSpan {
    pub fn new(chain_from: String, chain_to: String) -> Self {
        Self {
            correlation_id: CorrelationId::new(),
            chain_from,
            chain_to,
        }
    }

    /// Enter a tracing span for this route request
    pub fn enter(&self) -> tracing::span::EnteredSpan {
        tracing::info_span!(
            "route_request",
            correlation_id = %self.correlation_id,
            chain_from = %self.chain_from,
            chain_to = %self.chain_to,
        )
        .entered()
    }
}

/// Error enrichment for adding context to errors
pub trait ErrorContext {
    /// Add correlation ID context to an error
    fn with_correlation_id(self, correlation_id: CorrelationId) -> Self;

    /// Add chain-pair context to an error
    fn with_chain_context(self, chain_from: &str, chain_to: &str) -> Self;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: std::fmt::Display,
{
    fn with_correlation_id(self, correlation_id: CorrelationId) -> Self {
        self.map_err(|e| {
            tracing::error!(
                correlation_id = %correlation_id,
                error = %e,
                "error occurred"
            );
            e
        })
    }

    fn with_chain_context(self, chain_from: &str, chain_to: &str) -> Self {
        self.map_err(|e| {
            tracing::error!(
                chain_from = %chain_from,
                chain_to = %chain_to,
                error = %e,
                "error occurred"
            );
            e
        })
    }
}

/// Tracing error types
#[derive(Debug, thiserror::Error)]
pub enum TracingError {
    #[error("tracing initialization error: {0}")]
    InitError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correlation_id_generation() {
        let id1 = CorrelationId::new();
        let id2 = CorrelationId::new();

        assert_ne!(id1, id2);
        assert!(id1.as_str().len() == 36);
    }

    #[test]
    fn test_route_request_span_creation() {
        let span = RouteRequestSpan::new("cosmoshub-4".to_string(), "osmosis-1".to_string());

        assert_eq!(span.chain_from, "cosmoshub-4");
        assert_eq!(span.chain_to, "osmosis-1");
    }
}

use std::time::Duration;

use interhop_types::RouteType;
use prometheus::{Encoder, Registry, TextEncoder};

use crate::metrics::*;

/// Metrics collector for the cross-chain route planner.
pub struct MetricsCollector {
    registry: Registry,
}

impl MetricsCollector {
    /// Create a new metrics collector with default registry
    pub fn new() -> Self {
        let registry = Registry::new();
        Self { registry }
    }

    /// Create a new metrics collector with custom registry
    pub fn with_registry(registry: Registry) -> Self {
        Self { registry }
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUTE REQUEST METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record a route request entering the pipeline
    pub fn record_route_request_received(&self) {
        ROUTE_REQUESTS_RECEIVED.inc();
        ACTIVE_ROUTE_REQUESTS.inc();
    }

    fn route_type_label(route_type: RouteType) -> &'static str {
        match route_type {
            RouteType::Direct => "direct",
            RouteType::Indirect => "indirect",
            RouteType::BrokerSwap => "broker_swap",
            RouteType::Impossible => "impossible",
        }
    }

    /// Record a route having been found, with the search latency that found it
    pub fn record_route_found(&self, route_type: RouteType, latency: Duration) {
        let label = Self::route_type_label(route_type);
        ROUTES_FOUND.with_label_values(&[label]).inc();
        ROUTE_SEARCH_LATENCY.observe(latency.as_millis() as f64);
        ROUTE_SEARCH_LATENCY_PER_TYPE
            .with_label_values(&[label])
            .observe(latency.as_millis() as f64);
        ACTIVE_ROUTE_REQUESTS.dec();
    }

    /// Record a request that resolved to no route
    pub fn record_route_impossible(&self, latency: Duration) {
        ROUTES_IMPOSSIBLE.inc();
        ROUTE_SEARCH_LATENCY.observe(latency.as_millis() as f64);
        ACTIVE_ROUTE_REQUESTS.dec();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // DENOM RESOLUTION METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record a denom resolution failure for a chain
    pub fn record_denom_resolution_failure(&self, chain_id: &str) {
        DENOM_RESOLUTION_FAILURES.with_label_values(&[chain_id]).inc();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // BROKER METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record a broker swap quote request
    pub fn record_broker_quote_requested(&self) {
        BROKER_QUOTES_REQUESTED.inc();
    }

    /// Record a successful broker swap quote
    pub fn record_broker_quote(&self, broker_id: &str, latency: Duration) {
        BROKER_QUOTE_LATENCY.observe(latency.as_millis() as f64);
        BROKER_QUOTE_LATENCY_PER_BROKER
            .with_label_values(&[broker_id])
            .observe(latency.as_millis() as f64);
        BROKER_QUOTE_SUCCESS.with_label_values(&[broker_id]).inc();
    }

    /// Record a broker swap quote failure
    pub fn record_broker_quote_failure(&self, broker_id: &str, reason: &str) {
        BROKER_QUOTE_FAILURES
            .with_label_values(&[broker_id, reason])
            .inc();
    }

    /// Record a retry attempt issued against a broker
    pub fn record_broker_retry(&self, broker_id: &str) {
        BROKER_RETRY_ATTEMPTS.with_label_values(&[broker_id]).inc();
    }

    /// Set broker health status
    pub fn set_broker_health(&self, broker_id: &str, healthy: bool) {
        BROKER_HEALTH
            .with_label_values(&[broker_id])
            .set(if healthy { 1 } else { 0 });
    }

    /// Update the count of configured broker clients
    pub fn set_active_brokers(&self, count: i64) {
        ACTIVE_BROKERS.set(count);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIG METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record a route index reload attempt and its outcome
    pub fn record_config_reload(&self, success: bool) {
        CONFIG_RELOADS.inc();
        if !success {
            CONFIG_RELOAD_FAILURES.inc();
        }
    }

    /// Update the count of chains loaded in the route index
    pub fn set_active_chains(&self, count: i64) {
        ACTIVE_CHAINS.set(count);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ERROR METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Record a router error by type
    pub fn record_router_error(&self, error_type: &str) {
        ROUTER_ERRORS.with_label_values(&[error_type]).inc();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // EXPORT
    // ═══════════════════════════════════════════════════════════════════════════

    /// Export metrics in Prometheus text format
    pub fn export_metrics(&self) -> Result<String, MetricsError> {
        let encoder = TextEncoder::new();
        let metric_families = prometheus::gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|e| MetricsError::EncodingError(e.to_string()))?;

        String::from_utf8(buffer).map_err(|e| MetricsError::EncodingError(e.to_string()))
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Metrics error types
#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("encoding error: {0}")]
    EncodingError(String),
    #[error("registry error: {0}")]
    RegistryError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_collector_creation() {
        let collector = MetricsCollector::new();
        assert!(collector.export_metrics().is_ok());
    }

    #[test]
    fn test_record_route_request_metrics() {
        let collector = MetricsCollector::new();

        collector.record_route_request_received();
        collector.record_route_found(RouteType::Direct, Duration::from_millis(5));

        let metrics = collector.export_metrics().unwrap();
        assert!(metrics.contains("interhop_route_requests_received_total"));
        assert!(metrics.contains("interhop_routes_found_total"));
        assert!(metrics.contains(r#"route_type="direct""#));
    }

    #[test]
    fn test_record_impossible_route() {
        let collector = MetricsCollector::new();

        collector.record_route_request_received();
        collector.record_route_impossible(Duration::from_millis(12));

        let metrics = collector.export_metrics().unwrap();
        assert!(metrics.contains("interhop_routes_impossible_total"));
    }

    #[test]
    fn test_record_broker_metrics() {
        let collector = MetricsCollector::new();

        let latency = Duration::from_millis(150);
        collector.record_broker_quote_requested();
        collector.record_broker_quote("osmosis-sqs", latency);
        collector.record_broker_quote_failure("osmosis-sqs", "timeout");
        collector.record_broker_retry("osmosis-sqs");
        collector.set_broker_health("osmosis-sqs", true);

        let metrics = collector.export_metrics().unwrap();
        assert!(metrics.contains("interhop_broker_quote_latency_ms"));
        assert!(metrics.contains("interhop_broker_quote_failures_total"));
        assert!(metrics.contains("interhop_broker_retry_attempts_total"));
        assert!(metrics.contains("interhop_broker_health"));
    }

    #[test]
    fn test_record_denom_and_config_metrics() {
        let collector = MetricsCollector::new();

        collector.record_denom_resolution_failure("cosmoshub-4");
        collector.record_config_reload(true);
        collector.record_config_reload(false);
        collector.set_active_chains(5);
        collector.set_active_brokers(1);

        let metrics = collector.export_metrics().unwrap();
        assert!(metrics.contains("interhop_denom_resolution_failures_total"));
        assert!(metrics.contains("interhop_config_reloads_total"));
        assert!(metrics.contains("interhop_config_reload_failures_total"));
        assert!(metrics.contains("interhop_chains_active"));
    }

    #[test]
    fn test_record_router_error() {
        let collector = MetricsCollector::new();
        collector.record_router_error("no_route");
        let metrics = collector.export_metrics().unwrap();
        assert!(metrics.contains("interhop_router_errors_total"));
    }
}

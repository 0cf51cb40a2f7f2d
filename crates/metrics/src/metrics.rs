use lazy_static::lazy_static;
use prometheus::{
    register_histogram, register_histogram_vec, register_int_counter, register_int_counter_vec,
    register_int_gauge, register_int_gauge_vec, Histogram, HistogramVec, IntCounter, IntCounterVec,
    IntGauge, IntGaugeVec,
};

lazy_static! {
    // ═══════════════════════════════════════════════════════════════════════════
    // ROUTE REQUEST METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Total number of route requests received
    pub static ref ROUTE_REQUESTS_RECEIVED: IntCounter = register_int_counter!(
        "interhop_route_requests_received_total",
        "Total number of route requests received"
    )
    .unwrap();

    /// Number of route requests currently in flight
    pub static ref ACTIVE_ROUTE_REQUESTS: IntGauge = register_int_gauge!(
        "interhop_route_requests_active",
        "Number of route requests currently being resolved"
    )
    .unwrap();

    /// Routes found, by route type (direct, indirect, broker_swap)
    pub static ref ROUTES_FOUND: IntCounterVec = register_int_counter_vec!(
        "interhop_routes_found_total",
        "Total routes found by route type",
        &["route_type"]
    )
    .unwrap();

    /// Requests that resolved to no route
    pub static ref ROUTES_IMPOSSIBLE: IntCounter = register_int_counter!(
        "interhop_routes_impossible_total",
        "Total requests for which no route could be found"
    )
    .unwrap();

    /// End-to-end route search latency
    pub static ref ROUTE_SEARCH_LATENCY: Histogram = register_histogram!(
        "interhop_route_search_latency_ms",
        "Route search latency in milliseconds",
        vec![1.0, 5.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 5000.0]
    )
    .unwrap();

    /// Route search latency broken down by the dispatch stage that resolved it
    pub static ref ROUTE_SEARCH_LATENCY_PER_TYPE: HistogramVec = register_histogram_vec!(
        "interhop_route_search_latency_per_type_ms",
        "Route search latency per route type in milliseconds",
        &["route_type"],
        vec![1.0, 5.0, 10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 5000.0]
    )
    .unwrap();

    // ═══════════════════════════════════════════════════════════════════════════
    // DENOM RESOLUTION METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Denom resolution failures, by chain
    pub static ref DENOM_RESOLUTION_FAILURES: IntCounterVec = register_int_counter_vec!(
        "interhop_denom_resolution_failures_total",
        "Total denom resolution failures by chain",
        &["chain_id"]
    )
    .unwrap();

    // ═══════════════════════════════════════════════════════════════════════════
    // BROKER METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Total number of broker swap quotes requested
    pub static ref BROKER_QUOTES_REQUESTED: IntCounter = register_int_counter!(
        "interhop_broker_quotes_requested_total",
        "Total number of broker swap quotes requested"
    )
    .unwrap();

    /// Broker swap quote latency histogram (in milliseconds)
    pub static ref BROKER_QUOTE_LATENCY: Histogram = register_histogram!(
        "interhop_broker_quote_latency_ms",
        "Broker swap quote latency in milliseconds",
        vec![10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2000.0, 5000.0]
    )
    .unwrap();

    /// Broker swap quote latency per broker
    pub static ref BROKER_QUOTE_LATENCY_PER_BROKER: HistogramVec = register_histogram_vec!(
        "interhop_broker_quote_latency_per_broker_ms",
        "Broker swap quote latency per broker in milliseconds",
        &["broker_id"],
        vec![10.0, 50.0, 100.0, 250.0, 500.0, 1000.0, 2000.0, 5000.0]
    )
    .unwrap();

    /// Broker swap quote successes, by broker
    pub static ref BROKER_QUOTE_SUCCESS: IntCounterVec = register_int_counter_vec!(
        "interhop_broker_quote_success_total",
        "Total successful broker swap quotes",
        &["broker_id"]
    )
    .unwrap();

    /// Broker swap quote failures, by broker and reason
    pub static ref BROKER_QUOTE_FAILURES: IntCounterVec = register_int_counter_vec!(
        "interhop_broker_quote_failures_total",
        "Total broker swap quote failures",
        &["broker_id", "reason"]
    )
    .unwrap();

    /// Retry attempts issued against a broker during quote resolution
    pub static ref BROKER_RETRY_ATTEMPTS: IntCounterVec = register_int_counter_vec!(
        "interhop_broker_retry_attempts_total",
        "Total retry attempts issued against a broker",
        &["broker_id"]
    )
    .unwrap();

    /// Broker health status
    pub static ref BROKER_HEALTH: IntGaugeVec = register_int_gauge_vec!(
        "interhop_broker_health",
        "Broker health status (1=healthy, 0=unhealthy)",
        &["broker_id"]
    )
    .unwrap();

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIG METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Total number of config reloads attempted
    pub static ref CONFIG_RELOADS: IntCounter = register_int_counter!(
        "interhop_config_reloads_total",
        "Total number of route index reloads attempted"
    )
    .unwrap();

    /// Total number of config reloads that failed validation or enrichment
    pub static ref CONFIG_RELOAD_FAILURES: IntCounter = register_int_counter!(
        "interhop_config_reload_failures_total",
        "Total number of route index reloads that failed"
    )
    .unwrap();

    /// Number of chains currently loaded in the route index
    pub static ref ACTIVE_CHAINS: IntGauge = register_int_gauge!(
        "interhop_chains_active",
        "Number of chains currently loaded in the route index"
    )
    .unwrap();

    /// Number of broker clients currently configured
    pub static ref ACTIVE_BROKERS: IntGauge = register_int_gauge!(
        "interhop_brokers_active",
        "Number of broker clients currently configured"
    )
    .unwrap();

    // ═══════════════════════════════════════════════════════════════════════════
    // ERROR METRICS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Router errors by type
    pub static ref ROUTER_ERRORS: IntCounterVec = register_int_counter_vec!(
        "interhop_router_errors_total",
        "Total router errors by type",
        &["error_type"]
    )
    .unwrap();
}

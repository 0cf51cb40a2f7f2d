//! Metrics and monitoring for the cross-chain route planner.
//!
//! This crate provides Prometheus metrics collection and HTTP exposition
//! for route search, broker quoting, denom resolution, and route index
//! reloads, plus a tracing-subscriber integration that feeds error events
//! back into the metrics registry.
//!
//! # Features
//!
//! - Prometheus metrics exposition
//! - HTTP endpoint for metrics scraping
//! - Tracing integration with correlation IDs
//! - Span tracking for route-search requests
//! - Error context enrichment
//!
//! # Example
//!
//! ```no_run
//! use interhop_metrics::{MetricsCollector, MetricsServer};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() {
//!     let collector = Arc::new(MetricsCollector::new());
//!
//!     collector.record_route_request_received();
//!
//!     let server = MetricsServer::new(collector.clone(), "0.0.0.0:9090".to_string());
//!     server.serve().await.unwrap();
//! }
//! ```

pub mod collector;
pub mod http;
pub mod metrics;
pub mod tracing;

pub use collector::{MetricsCollector, MetricsError};
pub use http::{MetricsServer, MetricsServerError};
pub use tracing::{
    init_tracing_with_metrics, CorrelationId, ErrorContext, RouteRequestSpan, TracingError,
};

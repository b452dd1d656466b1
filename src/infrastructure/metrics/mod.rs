//! Metrics exporters.
//!
//! - [`PrometheusMetrics`] - engine counters rendered in the Prometheus text format

pub mod prometheus_metrics;

pub use prometheus_metrics::PrometheusMetrics;

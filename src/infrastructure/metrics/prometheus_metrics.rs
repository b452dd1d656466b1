//! Prometheus adapter for engine outcome counters.
//!
//! Counters are registered with a registry owned by the adapter, so every
//! instance starts from zero and tests never share state. The `/metrics`
//! endpoint renders it through [`PrometheusMetrics::export`].

use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

use crate::domain::metrics::{CreateOutcome, ResolveOutcome, ShortenerMetrics};

/// Content type of the Prometheus text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Prometheus-backed recorder for [`ShortenerMetrics`].
///
/// # Metric Specification
///
/// - `shortly_creates_total{outcome}`: `created`, `existing`, `invalid_url`,
///   `conflict` or `error`
/// - `shortly_resolves_total{outcome}`: `found`, `not_found` or `error`
/// - `shortly_code_collisions_total`: generated codes that were already taken
pub struct PrometheusMetrics {
    registry: Registry,
    creates_total: IntCounterVec,
    resolves_total: IntCounterVec,
    collisions_total: IntCounter,
}

impl PrometheusMetrics {
    /// Creates the counters and registers them with a fresh registry.
    ///
    /// # Errors
    ///
    /// Returns an error if a metric descriptor is invalid or registered twice.
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let creates_total = IntCounterVec::new(
            Opts::new("shortly_creates_total", "Create calls by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(creates_total.clone()))?;

        let resolves_total = IntCounterVec::new(
            Opts::new("shortly_resolves_total", "Resolve calls by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(resolves_total.clone()))?;

        let collisions_total = IntCounter::with_opts(Opts::new(
            "shortly_code_collisions_total",
            "Generated codes rejected because they were already taken",
        ))?;
        registry.register(Box::new(collisions_total.clone()))?;

        Ok(Self {
            registry,
            creates_total,
            resolves_total,
            collisions_total,
        })
    }

    /// Renders every registered metric in the text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn export(&self) -> Result<String, prometheus::Error> {
        let mut buffer = Vec::new();
        TextEncoder::new().encode(&self.registry.gather(), &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

impl ShortenerMetrics for PrometheusMetrics {
    fn record_create(&self, outcome: CreateOutcome) {
        self.creates_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    fn record_resolve(&self, outcome: ResolveOutcome) {
        self.resolves_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    fn record_collision(&self) {
        self.collisions_total.inc();
    }
}

//! Outcome counters recorded by the shortening engine.
//!
//! The engine reports what happened to each call through [`ShortenerMetrics`];
//! the Prometheus adapter lives in
//! [`crate::infrastructure::metrics::PrometheusMetrics`].

/// How a create call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    /// A new mapping was stored.
    Created,
    /// The URL was already mapped, either before the call or by a concurrent
    /// writer that won the race.
    Existing,
    InvalidUrl,
    /// The retry budget ran out.
    Conflict,
    /// Store or random source failure.
    Error,
}

impl CreateOutcome {
    /// Label value used in exported metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Existing => "existing",
            Self::InvalidUrl => "invalid_url",
            Self::Conflict => "conflict",
            Self::Error => "error",
        }
    }
}

/// How a resolve call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Found,
    NotFound,
    Error,
}

impl ResolveOutcome {
    /// Label value used in exported metrics.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Found => "found",
            Self::NotFound => "not_found",
            Self::Error => "error",
        }
    }
}

/// Recorder for engine outcomes.
///
/// Implementations must be cheap and must not fail: a metrics backend
/// problem never affects the result of a create or resolve.
#[cfg_attr(test, mockall::automock)]
pub trait ShortenerMetrics: Send + Sync {
    fn record_create(&self, outcome: CreateOutcome);

    fn record_resolve(&self, outcome: ResolveOutcome);

    /// A freshly generated code was already taken.
    fn record_collision(&self);
}

/// Recorder that discards everything. Used when no registry is wired in.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpMetrics;

impl ShortenerMetrics for NoOpMetrics {
    fn record_create(&self, _outcome: CreateOutcome) {}

    fn record_resolve(&self, _outcome: ResolveOutcome) {}

    fn record_collision(&self) {}
}

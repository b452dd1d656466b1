//! Shared application state for HTTP handlers.

use std::sync::Arc;

use crate::application::services::DynShortenerService;
use crate::infrastructure::metrics::PrometheusMetrics;

/// State injected into every handler.
///
/// Cheap to clone: the service and the metrics registry sit behind an [`Arc`].
#[derive(Clone)]
pub struct AppState {
    pub shortener: Arc<DynShortenerService>,
    /// Public prefix for short URLs; derived from the `Host` header when `None`.
    pub base_url: Option<String>,
    /// Registry rendered by `GET /metrics`. The shortener records into it.
    pub metrics: Arc<PrometheusMetrics>,
}

impl AppState {
    pub fn new(
        shortener: Arc<DynShortenerService>,
        base_url: Option<String>,
        metrics: Arc<PrometheusMetrics>,
    ) -> Self {
        Self {
            shortener,
            base_url,
            metrics,
        }
    }
}

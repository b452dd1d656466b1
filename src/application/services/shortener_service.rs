//! Short link creation and resolution service.

use std::num::NonZeroUsize;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::metrics::{CreateOutcome, NoOpMetrics, ResolveOutcome, ShortenerMetrics};
use crate::domain::repositories::MappingRepository;
use crate::error::{ShortenError, StoreError};
use crate::utils::code_generator::{CODE_LENGTH, CodeGenerator, OsCodeGenerator, is_valid_code};
use crate::utils::url_validator::validate_url;

/// Default number of create attempts before giving up with a conflict.
pub const DEFAULT_MAX_ATTEMPTS: usize = 6;

/// Shortener service used by the HTTP layer: dynamic store, OS generator.
pub type DynShortenerService = ShortenerService<dyn MappingRepository>;

/// Service for creating and resolving short links.
///
/// Stateless between calls apart from its configuration; all consistency is
/// delegated to the [`MappingRepository`]. Safe to share behind an [`Arc`]
/// and call concurrently.
pub struct ShortenerService<R: ?Sized, G = OsCodeGenerator> {
    repository: Arc<R>,
    generator: G,
    max_attempts: usize,
    metrics: Arc<dyn ShortenerMetrics>,
}

impl<R, G> ShortenerService<R, G>
where
    R: MappingRepository + ?Sized,
    G: CodeGenerator,
{
    /// Creates a new service with the default retry budget and no metrics.
    pub fn new(repository: Arc<R>, generator: G) -> Self {
        Self {
            repository,
            generator,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            metrics: Arc::new(NoOpMetrics),
        }
    }

    /// Overrides the number of create attempts.
    pub fn with_max_attempts(mut self, max_attempts: NonZeroUsize) -> Self {
        self.max_attempts = max_attempts.get();
        self
    }

    /// Records call outcomes and code collisions in `metrics`.
    pub fn with_metrics(mut self, metrics: Arc<dyn ShortenerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Returns the short code for `raw_url`, creating a mapping if needed.
    ///
    /// # Idempotency
    ///
    /// Repeated calls with URLs that normalize to the same string return the
    /// same code. A concurrent writer that inserts the same URL first wins;
    /// its code is returned instead of an error.
    ///
    /// # Retries
    ///
    /// Each attempt generates a fresh candidate. A code collision consumes an
    /// attempt, as does a candidate that fails [`is_valid_code`]. After
    /// `max_attempts` failed attempts the call fails with a conflict.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::InvalidUrl`] if the URL is rejected (never retried)
    /// - [`ShortenError::Conflict`] if the retry budget is exhausted
    /// - [`ShortenError::RandomSource`] if the generator fails
    /// - [`ShortenError::Store`] on any other store failure (never retried)
    pub async fn create(&self, raw_url: &str) -> Result<String, ShortenError> {
        let result = self.create_mapping(raw_url).await;

        let outcome = match &result {
            Ok((_, outcome)) => *outcome,
            Err(ShortenError::InvalidUrl(_)) => CreateOutcome::InvalidUrl,
            Err(ShortenError::Conflict { .. }) => CreateOutcome::Conflict,
            Err(_) => CreateOutcome::Error,
        };
        self.metrics.record_create(outcome);

        result.map(|(code, _)| code)
    }

    async fn create_mapping(&self, raw_url: &str) -> Result<(String, CreateOutcome), ShortenError> {
        let normalized = validate_url(raw_url)?;

        if let Some(code) = self.repository.find_by_original(&normalized).await? {
            debug!(%code, "URL already shortened");
            return Ok((code, CreateOutcome::Existing));
        }

        for attempt in 1..=self.max_attempts {
            let code = self.generator.generate(CODE_LENGTH)?;
            if !is_valid_code(&code) {
                warn!(attempt, "Generator produced a malformed code, discarding");
                continue;
            }

            match self.repository.create(&code, &normalized).await {
                Ok(()) => {
                    info!(%code, attempt, "Short link created");
                    return Ok((code, CreateOutcome::Created));
                }
                Err(StoreError::DuplicateCode) => {
                    self.metrics.record_collision();
                    debug!(%code, attempt, "Code collision, retrying");
                }
                Err(StoreError::DuplicateOriginal) => {
                    if let Some(winner) = self.repository.find_by_original(&normalized).await? {
                        debug!(code = %winner, attempt, "Concurrent create won the race");
                        return Ok((winner, CreateOutcome::Existing));
                    }
                    debug!(attempt, "Duplicate original reported but not found, retrying");
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(attempts = self.max_attempts, "Retry budget exhausted");
        Err(ShortenError::Conflict {
            attempts: self.max_attempts,
        })
    }

    /// Returns the original URL for `code`.
    ///
    /// Malformed codes are rejected without a store round trip.
    ///
    /// # Errors
    ///
    /// - [`ShortenError::NotFound`] if the code is malformed or unknown
    /// - [`ShortenError::Store`] on store failures
    pub async fn resolve(&self, code: &str) -> Result<String, ShortenError> {
        let result = self.lookup(code).await;

        self.metrics.record_resolve(match &result {
            Ok(_) => ResolveOutcome::Found,
            Err(ShortenError::NotFound) => ResolveOutcome::NotFound,
            Err(_) => ResolveOutcome::Error,
        });

        result
    }

    async fn lookup(&self, code: &str) -> Result<String, ShortenError> {
        if !is_valid_code(code) {
            return Err(ShortenError::NotFound);
        }

        self.repository
            .find_by_code(code)
            .await?
            .ok_or(ShortenError::NotFound)
    }

    /// Checks that the underlying store is reachable.
    pub async fn check_storage(&self) -> Result<(), StoreError> {
        self.repository.ping().await
    }
}

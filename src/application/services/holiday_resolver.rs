use crate::domain::entities::{CountryCode, HolidayRecord, Year};
use crate::domain::errors::SourceError;
use crate::domain::fallback;
use crate::domain::ports::HolidaySource;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const DEFAULT_SOURCE_TIMEOUT: Duration = Duration::from_millis(3000);

/// Resolves holidays for a country/year.
///
/// External sources are tried one after another in priority order, each bounded
/// by `source_timeout`. The first source yielding a non-empty list wins. When
/// none does, the static table is consulted; if it has no entry the result is
/// empty. Source failures never reach the caller.
#[derive(Clone)]
pub struct HolidayResolver {
    sources: Vec<Arc<dyn HolidaySource>>,
    source_timeout: Duration,
}

impl HolidayResolver {
    pub fn new(sources: Vec<Arc<dyn HolidaySource>>, source_timeout: Duration) -> Self {
        Self {
            sources,
            source_timeout,
        }
    }

    /// Resolver that only consults the static table
    pub fn static_only() -> Self {
        Self::new(Vec::new(), DEFAULT_SOURCE_TIMEOUT)
    }

    pub fn source_names(&self) -> Vec<&'static str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// `region` only labels the output; lookups are keyed by country and year.
    #[tracing::instrument(skip(self, country, year), fields(country = %country, year = %year))]
    pub async fn fetch(
        &self,
        country: &CountryCode,
        year: Year,
        region: Option<&str>,
    ) -> Vec<HolidayRecord> {
        for source in &self.sources {
            match self.attempt(source.as_ref(), country, year).await {
                Ok(records) if !records.is_empty() => {
                    info!(
                        source = source.name(),
                        count = records.len(),
                        "Resolved holidays from external source"
                    );
                    metrics::counter!("holiday_source_hits_total", "source" => source.name())
                        .increment(1);
                    return records;
                }
                Ok(_) => {
                    warn!(source = source.name(), "Holiday source returned no holidays");
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "Holiday source failed");
                }
            }
            metrics::counter!("holiday_source_failures_total", "source" => source.name())
                .increment(1);
        }

        match fallback::lookup(country, year) {
            Some(records) => {
                debug!(count = records.len(), "Using static holiday table");
                metrics::counter!("holiday_fallback_total", "outcome" => "hit").increment(1);
                records.to_vec()
            }
            None => {
                info!("No holiday data available");
                metrics::counter!("holiday_fallback_total", "outcome" => "miss").increment(1);
                Vec::new()
            }
        }
    }

    async fn attempt(
        &self,
        source: &dyn HolidaySource,
        country: &CountryCode,
        year: Year,
    ) -> Result<Vec<HolidayRecord>, SourceError> {
        // Dropping the future on timeout abandons the in-flight request
        tokio::time::timeout(self.source_timeout, source.attempt(country, year))
            .await
            .map_err(|_| SourceError::Timeout(self.source_timeout))?
    }
}

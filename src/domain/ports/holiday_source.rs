use crate::domain::entities::{CountryCode, HolidayRecord, Year};
use crate::domain::errors::SourceResult;
use async_trait::async_trait;

/// An external provider of holiday data.
///
/// Implementations normalize their own response schema into [`HolidayRecord`]s.
/// Any error returned here is treated by the resolver as "skip to the next source".
#[async_trait]
pub trait HolidaySource: Send + Sync {
    /// Short identifier used in logs and metric labels
    fn name(&self) -> &'static str;

    async fn attempt(&self, country: &CountryCode, year: Year) -> SourceResult<Vec<HolidayRecord>>;
}

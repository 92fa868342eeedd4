use super::{ensure_success, request_error};
use crate::domain::entities::{distinct_alternate_name, CountryCode, HolidayRecord, Year};
use crate::domain::errors::{SourceError, SourceResult};
use crate::domain::ports::HolidaySource;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://date.nager.at";

/// Nager.Date public holiday API (`/api/v3/PublicHolidays/{year}/{country}`)
#[derive(Clone)]
pub struct NagerDateSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NagerHoliday {
    date: NaiveDate,
    name: String,
    local_name: Option<String>,
    #[serde(default)]
    types: Vec<String>,
}

impl NagerDateSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn to_record(holiday: NagerHoliday) -> Option<HolidayRecord> {
        if holiday.name.trim().is_empty() {
            return None;
        }
        // "Public", "Bank", "School", "Authorities", "Optional", "Observance"
        let kind = holiday
            .types
            .first()
            .map(|t| t.to_lowercase())
            .unwrap_or_else(|| "public".to_string());
        let description = distinct_alternate_name(&holiday.name, holiday.local_name.as_deref());

        let mut record = HolidayRecord::new(holiday.date, holiday.name, kind);
        record.description = description;
        Some(record)
    }
}

#[async_trait]
impl HolidaySource for NagerDateSource {
    fn name(&self) -> &'static str {
        "nager"
    }

    async fn attempt(&self, country: &CountryCode, year: Year) -> SourceResult<Vec<HolidayRecord>> {
        let url = format!(
            "{}/api/v3/PublicHolidays/{}/{}",
            self.base_url, year, country
        );
        let response = self.client.get(&url).send().await.map_err(request_error)?;

        // Unsupported country
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        let response = ensure_success(response)?;

        let body = response.text().await.map_err(request_error)?;
        let holidays: Vec<NagerHoliday> =
            serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(holidays.into_iter().filter_map(Self::to_record).collect())
    }
}

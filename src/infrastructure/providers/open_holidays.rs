use super::{ensure_success, request_error};
use crate::domain::entities::{distinct_alternate_name, CountryCode, HolidayRecord, Year};
use crate::domain::errors::{SourceError, SourceResult};
use crate::domain::ports::HolidaySource;
use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::Deserialize;

pub const DEFAULT_BASE_URL: &str = "https://openholidaysapi.org";

/// OpenHolidays API (`/PublicHolidays?countryIsoCode=..&validFrom=..&validTo=..`)
#[derive(Clone)]
pub struct OpenHolidaysSource {
    client: Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OpenHoliday {
    start_date: NaiveDate,
    #[serde(rename = "type")]
    kind: String,
    name: Vec<LocalizedText>,
    #[serde(default = "nationwide_default")]
    nationwide: bool,
}

#[derive(Debug, Deserialize)]
struct LocalizedText {
    language: String,
    text: String,
}

fn nationwide_default() -> bool {
    true
}

impl OpenHolidaysSource {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn to_record(holiday: OpenHoliday) -> Option<HolidayRecord> {
        // Lookups are not region-partitioned, so subdivision-only days are skipped
        if !holiday.nationwide {
            return None;
        }

        let english = holiday
            .name
            .iter()
            .find(|n| n.language.eq_ignore_ascii_case("EN"));
        let name = english.or_else(|| holiday.name.first())?.text.trim().to_string();
        if name.is_empty() {
            return None;
        }
        let localized = holiday
            .name
            .iter()
            .find(|n| !n.language.eq_ignore_ascii_case("EN"))
            .map(|n| n.text.as_str());

        let kind = match holiday.kind.as_str() {
            "Public" => "public".to_string(),
            "Bank" => "bank".to_string(),
            other => other.to_lowercase(),
        };

        let mut record = HolidayRecord::new(holiday.start_date, name.clone(), kind);
        record.description = distinct_alternate_name(&name, localized);
        Some(record)
    }
}

#[async_trait]
impl HolidaySource for OpenHolidaysSource {
    fn name(&self) -> &'static str {
        "openholidays"
    }

    async fn attempt(&self, country: &CountryCode, year: Year) -> SourceResult<Vec<HolidayRecord>> {
        let url = format!("{}/PublicHolidays", self.base_url);
        let valid_from = format!("{}-01-01", year);
        let valid_to = format!("{}-12-31", year);

        let response = self
            .client
            .get(&url)
            .header("accept", "application/json")
            .query(&[
                ("countryIsoCode", country.as_str()),
                ("validFrom", valid_from.as_str()),
                ("validTo", valid_to.as_str()),
            ])
            .send()
            .await
            .map_err(request_error)?;
        let response = ensure_success(response)?;

        let body = response.text().await.map_err(request_error)?;
        let holidays: Vec<OpenHoliday> =
            serde_json::from_str(&body).map_err(|e| SourceError::Malformed(e.to_string()))?;

        Ok(holidays.into_iter().filter_map(Self::to_record).collect())
    }
}

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single holiday occurrence, normalized across all data sources
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolidayRecord {
    pub date: NaiveDate,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Free-form category tag such as "public" or "bank"
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed: Option<NaiveDate>,
}

impl HolidayRecord {
    pub fn new(date: NaiveDate, name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            description: None,
            kind: kind.into(),
            observed: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_observed(mut self, observed: NaiveDate) -> Self {
        self.observed = Some(observed);
        self
    }

    /// The observed date, but only when it actually differs from `date`
    pub fn observed_shift(&self) -> Option<NaiveDate> {
        self.observed.filter(|observed| *observed != self.date)
    }
}

/// Returns the alternate name only when it says something `name` doesn't.
///
/// Used by source adapters so a localized name identical to the display name
/// is not duplicated into the event description.
pub fn distinct_alternate_name(name: &str, alternate: Option<&str>) -> Option<String> {
    let alternate = alternate?.trim();
    if alternate.is_empty() || alternate.eq_ignore_ascii_case(name.trim()) {
        return None;
    }
    Some(alternate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_observed_shift_hidden_when_same_as_date() {
        let record = HolidayRecord::new(date(2026, 7, 4), "Independence Day", "public")
            .with_observed(date(2026, 7, 4));
        assert_eq!(record.observed_shift(), None);
    }

    #[test]
    fn test_observed_shift_present_when_different() {
        let record = HolidayRecord::new(date(2026, 7, 4), "Independence Day", "public")
            .with_observed(date(2026, 7, 3));
        assert_eq!(record.observed_shift(), Some(date(2026, 7, 3)));
    }

    #[test]
    fn test_distinct_alternate_name() {
        assert_eq!(distinct_alternate_name("Christmas Day", Some("Christmas Day")), None);
        assert_eq!(distinct_alternate_name("Christmas Day", Some("christmas day ")), None);
        assert_eq!(distinct_alternate_name("Christmas Day", Some("")), None);
        assert_eq!(distinct_alternate_name("Christmas Day", None), None);
        assert_eq!(
            distinct_alternate_name("Christmas Day", Some("Weihnachtstag")),
            Some("Weihnachtstag".to_string())
        );
    }

    #[test]
    fn test_serializes_kind_as_type() {
        let record = HolidayRecord::new(date(2025, 1, 1), "New Year's Day", "public");
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["type"], "public");
        assert_eq!(json["date"], "2025-01-01");
        assert!(json.get("description").is_none());
    }
}

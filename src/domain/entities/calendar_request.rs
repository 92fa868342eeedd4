use crate::domain::errors::{DomainError, DomainResult};
use serde::Serialize;
use std::fmt;

pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2030;

/// ISO 3166-1 alpha-2 codes accepted by the API
pub const SUPPORTED_COUNTRIES: &[&str] = &[
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX", "AZ",
    "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ", "BR", "BS",
    "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK", "CL", "CM", "CN",
    "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM", "DO", "DZ", "EC", "EE",
    "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR", "GA", "GB", "GD", "GE", "GF",
    "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS", "GT", "GU", "GW", "GY", "HK", "HM",
    "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN", "IO", "IQ", "IR", "IS", "IT", "JE", "JM",
    "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN", "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC",
    "LI", "LK", "LR", "LS", "LT", "LU", "LV", "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK",
    "ML", "MM", "MN", "MO", "MP", "MQ", "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA",
    "NC", "NE", "NF", "NG", "NI", "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG",
    "PH", "PK", "PL", "PM", "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW",
    "SA", "SB", "SC", "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS",
    "ST", "SV", "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO",
    "TR", "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Validated, upper-case two-letter country code
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CountryCode(String);

impl CountryCode {
    /// Case-insensitive match against [`SUPPORTED_COUNTRIES`]
    pub fn parse(raw: &str) -> DomainResult<Self> {
        let code = raw.trim().to_ascii_uppercase();
        if code.is_empty() {
            return Err(DomainError::MissingCountry);
        }
        if SUPPORTED_COUNTRIES.binary_search(&code.as_str()).is_err() {
            return Err(DomainError::InvalidCountry(raw.trim().to_string()));
        }
        Ok(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CountryCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Calendar year within the supported range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Year(i32);

impl Year {
    pub fn new(value: i32) -> DomainResult<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&value) {
            return Err(DomainError::InvalidYear(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn parse(raw: &str) -> DomainResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::MissingYear);
        }
        let value: i32 = trimmed
            .parse()
            .map_err(|_| DomainError::InvalidYear(trimmed.to_string()))?;
        Self::new(value)
    }

    pub fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated calendar request, built once per HTTP call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarRequest {
    pub country: CountryCode,
    pub year: Year,
    pub region: Option<String>,
}

impl CalendarRequest {
    pub fn new(country: CountryCode, year: Year, region: Option<&str>) -> Self {
        Self {
            country,
            year,
            region: normalize_region(region),
        }
    }

    /// Validates raw query values. Country is checked before year.
    pub fn from_query(
        country: Option<&str>,
        year: Option<&str>,
        region: Option<&str>,
    ) -> DomainResult<Self> {
        let country = CountryCode::parse(country.ok_or(DomainError::MissingCountry)?)?;
        let year = Year::parse(year.ok_or(DomainError::MissingYear)?)?;
        Ok(Self::new(country, year, region))
    }

    /// "US" or "US-CA"
    pub fn label(&self) -> String {
        match &self.region {
            Some(region) => format!("{}-{}", self.country, region),
            None => self.country.to_string(),
        }
    }

    pub fn calendar_name(&self) -> String {
        format!("{} Public Holidays {}", self.label(), self.year)
    }

    /// Download filename. Only ASCII alphanumerics and `-` survive from the label.
    pub fn filename(&self) -> String {
        let label: String = self
            .label()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        format!("holidays-{}-{}.ics", label, self.year)
    }
}

/// Control characters are dropped so the region can always be echoed in headers.
fn normalize_region(region: Option<&str>) -> Option<String> {
    region
        .map(|r| {
            r.chars()
                .filter(|c| !c.is_control())
                .collect::<String>()
                .trim()
                .to_uppercase()
        })
        .filter(|r| !r.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supported_countries_sorted_for_binary_search() {
        let mut sorted = SUPPORTED_COUNTRIES.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, SUPPORTED_COUNTRIES);
    }

    #[test]
    fn test_country_is_case_insensitive() {
        assert_eq!(CountryCode::parse("us").unwrap().as_str(), "US");
        assert_eq!(CountryCode::parse(" gB ").unwrap().as_str(), "GB");
    }

    #[test]
    fn test_unknown_country_rejected() {
        assert_eq!(
            CountryCode::parse("ZZ"),
            Err(DomainError::InvalidCountry("ZZ".to_string()))
        );
        assert!(CountryCode::parse("USA").is_err());
    }

    #[test]
    fn test_year_boundaries() {
        assert!(Year::parse("1999").is_err());
        assert!(Year::parse("2031").is_err());
        assert_eq!(Year::parse("2000").unwrap().value(), 2000);
        assert_eq!(Year::parse("2030").unwrap().value(), 2030);
    }

    #[test]
    fn test_year_not_a_number() {
        assert_eq!(
            Year::parse("twenty"),
            Err(DomainError::InvalidYear("twenty".to_string()))
        );
        assert_eq!(Year::parse(""), Err(DomainError::MissingYear));
    }

    #[test]
    fn test_from_query_missing_fields() {
        assert_eq!(
            CalendarRequest::from_query(None, Some("2025"), None),
            Err(DomainError::MissingCountry)
        );
        assert_eq!(
            CalendarRequest::from_query(Some("US"), None, None),
            Err(DomainError::MissingYear)
        );
    }

    #[test]
    fn test_country_validated_before_year() {
        assert_eq!(
            CalendarRequest::from_query(Some("ZZ"), Some("1999"), None),
            Err(DomainError::InvalidCountry("ZZ".to_string()))
        );
    }

    #[test]
    fn test_region_uppercased_and_labels() {
        let request = CalendarRequest::from_query(Some("us"), Some("2025"), Some("ca")).unwrap();
        assert_eq!(request.region.as_deref(), Some("CA"));
        assert_eq!(request.calendar_name(), "US-CA Public Holidays 2025");
        assert_eq!(request.filename(), "holidays-US-CA-2025.ics");
    }

    #[test]
    fn test_blank_region_treated_as_absent() {
        let request = CalendarRequest::from_query(Some("US"), Some("2025"), Some("  ")).unwrap();
        assert_eq!(request.region, None);
        assert_eq!(request.calendar_name(), "US Public Holidays 2025");
        assert_eq!(request.filename(), "holidays-US-2025.ics");
    }

    #[test]
    fn test_region_control_characters_dropped() {
        let request =
            CalendarRequest::from_query(Some("US"), Some("2025"), Some("a\r\nEND:VCALENDAR"))
                .unwrap();
        assert_eq!(request.region.as_deref(), Some("AEND:VCALENDAR"));

        let request = CalendarRequest::from_query(Some("US"), Some("2025"), Some("\n\t")).unwrap();
        assert_eq!(request.region, None);
    }

    #[test]
    fn test_filename_keeps_only_safe_characters() {
        let request = CalendarRequest::from_query(
            Some("US"),
            Some("2025"),
            Some("x\"; filename=\"evil.exe"),
        )
        .unwrap();
        assert_eq!(
            request.filename(),
            "holidays-US-X___FILENAME__EVIL_EXE-2025.ics"
        );
    }
}

use std::time::Duration;
use thiserror::Error;

/// Request-level failures surfaced to API callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Country parameter is required")]
    MissingCountry,
    #[error("Invalid country code '{0}'. Use a two-letter ISO 3166-1 alpha-2 code")]
    InvalidCountry(String),
    #[error("Year parameter is required")]
    MissingYear,
    #[error("Invalid year '{0}'. Year must be between 2000 and 2030")]
    InvalidYear(String),
    #[error("No holidays found for {0}")]
    NoHolidaysFound(String),
}

impl DomainError {
    /// Stable machine-readable code for the error response body
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::MissingCountry => "MISSING_COUNTRY",
            DomainError::InvalidCountry(_) => "INVALID_COUNTRY",
            DomainError::MissingYear => "MISSING_YEAR",
            DomainError::InvalidYear(_) => "INVALID_YEAR",
            DomainError::NoHolidaysFound(_) => "NO_HOLIDAYS_FOUND",
        }
    }
}

pub type DomainResult<T> = Result<T, DomainError>;

/// Failure of a single external holiday source. Always recoverable.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request timed out after {0:?}")]
    Timeout(Duration),
    #[error("request failed: {0}")]
    Http(String),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

pub type SourceResult<T> = Result<T, SourceError>;

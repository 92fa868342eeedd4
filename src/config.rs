use crate::application::services::RateLimitPolicies;
use crate::infrastructure::providers::{nager_date, open_holidays};
use std::env;
use std::time::Duration;

/// External holiday sources, in the order they are tried
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceKind {
    NagerDate,
    OpenHolidays,
}

impl SourceKind {
    fn parse(name: &str) -> Result<Self, ConfigError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "nager" | "nager-date" => Ok(SourceKind::NagerDate),
            "openholidays" | "open-holidays" => Ok(SourceKind::OpenHolidays),
            other => Err(ConfigError::UnknownSource(other.to_string())),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub source_timeout: Duration,
    pub request_timeout: Duration,
    pub sources: Vec<SourceKind>,
    pub nager_date_url: String,
    pub open_holidays_url: String,
    pub rate_limits: RateLimitPolicies,
    pub otel_exporter_endpoint: Option<String>,
    pub service_name: String,
    pub metrics_port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let server_host = lookup("SERVER_HOST").unwrap_or_else(|| "127.0.0.1".to_string());

        let server_port = lookup("SERVER_PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidPort)?;

        let source_timeout_ms: u64 = parse_number(&lookup, "SOURCE_TIMEOUT_MS", 3000)?;
        let request_timeout_secs: u64 = parse_number(&lookup, "REQUEST_TIMEOUT_SECS", 15)?;

        let sources = lookup("HOLIDAY_SOURCES")
            .unwrap_or_else(|| "nager,openholidays".to_string())
            .split(',')
            .filter(|s| !s.trim().is_empty())
            .map(SourceKind::parse)
            .collect::<Result<Vec<_>, _>>()?;

        let nager_date_url =
            lookup("NAGER_DATE_URL").unwrap_or_else(|| nager_date::DEFAULT_BASE_URL.to_string());
        let open_holidays_url = lookup("OPENHOLIDAYS_URL")
            .unwrap_or_else(|| open_holidays::DEFAULT_BASE_URL.to_string());

        let defaults = RateLimitPolicies::default();
        let rate_limits = RateLimitPolicies {
            free_per_minute: parse_number(
                &lookup,
                "RATE_LIMIT_FREE_PER_MINUTE",
                defaults.free_per_minute,
            )?,
            pro_per_minute: parse_number(
                &lookup,
                "RATE_LIMIT_PRO_PER_MINUTE",
                defaults.pro_per_minute,
            )?,
            enterprise_per_minute: parse_number(
                &lookup,
                "RATE_LIMIT_ENTERPRISE_PER_MINUTE",
                defaults.enterprise_per_minute,
            )?,
        };

        let otel_exporter_endpoint = lookup("OTEL_EXPORTER_OTLP_ENDPOINT");

        let service_name = lookup("SERVICE_NAME").unwrap_or_else(|| "holical".to_string());

        let metrics_port = lookup("METRICS_PORT")
            .unwrap_or_else(|| "9000".to_string())
            .parse()
            .unwrap_or(9000);

        Ok(Config {
            server_host,
            server_port,
            source_timeout: Duration::from_millis(source_timeout_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
            sources,
            nager_date_url,
            open_holidays_url,
            rate_limits,
            otel_exporter_endpoint,
            service_name,
            metrics_port,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidNumber(key)),
        None => Ok(default),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid port number")]
    InvalidPort,

    #[error("{0} must be a non-negative integer")]
    InvalidNumber(&'static str),

    #[error("Unknown holiday source '{0}' in HOLIDAY_SOURCES")]
    UnknownSource(String),
}

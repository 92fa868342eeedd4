use crate::application::services::{HolidayResolver, TierRateLimiter};
use crate::config::{Config, SourceKind};
use crate::domain::ports::HolidaySource;
use crate::infrastructure::http::middleware::AppState;
use crate::infrastructure::providers::{NagerDateSource, OpenHolidaysSource};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;

const USER_AGENT: &str = concat!("holical/", env!("CARGO_PKG_VERSION"));
const RATE_LIMIT_CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

pub fn build_app_state(config: &Config) -> anyhow::Result<AppState> {
    // The resolver enforces the per-source deadline; the client timeout is a backstop
    let http_client = Client::builder()
        .timeout(config.source_timeout)
        .user_agent(USER_AGENT)
        .build()?;

    let sources = build_sources(config, &http_client);
    let resolver = HolidayResolver::new(sources, config.source_timeout);
    tracing::info!(
        sources = ?resolver.source_names(),
        timeout_ms = config.source_timeout.as_millis() as u64,
        "Holiday resolver initialized"
    );

    let rate_limiter = TierRateLimiter::new(config.rate_limits);
    tracing::info!(policies = ?config.rate_limits, "Rate limiter initialized");

    Ok(AppState::new(resolver, rate_limiter))
}

/// Instantiate the configured sources in priority order
pub fn build_sources(config: &Config, client: &Client) -> Vec<Arc<dyn HolidaySource>> {
    config
        .sources
        .iter()
        .map(|kind| -> Arc<dyn HolidaySource> {
            match kind {
                SourceKind::NagerDate => {
                    Arc::new(NagerDateSource::new(client.clone(), &config.nager_date_url))
                }
                SourceKind::OpenHolidays => Arc::new(OpenHolidaysSource::new(
                    client.clone(),
                    &config.open_holidays_url,
                )),
            }
        })
        .collect()
}

/// Periodically drop rate-limit state for idle clients
pub fn start_rate_limit_cleanup(rate_limiter: TierRateLimiter) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(RATE_LIMIT_CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            rate_limiter.cleanup();
            tracing::debug!(
                tracked_clients = rate_limiter.tracked_clients(),
                "Rate limiter state pruned"
            );
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sources_follow_config_order() {
        let config = Config::from_lookup(|key| match key {
            "HOLIDAY_SOURCES" => Some("openholidays,nager".to_string()),
            _ => None,
        })
        .unwrap();

        let sources = build_sources(&config, &Client::new());
        let names: Vec<_> = sources.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec!["openholidays", "nager"]);
    }

    #[test]
    fn test_build_app_state_static_only() {
        let config = Config::from_lookup(|key| match key {
            "HOLIDAY_SOURCES" => Some(String::new()),
            _ => None,
        })
        .unwrap();

        let state = build_app_state(&config).unwrap();
        assert!(state.resolver.source_names().is_empty());
    }
}

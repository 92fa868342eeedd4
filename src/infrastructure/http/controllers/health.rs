use crate::{
    domain::entities::{MAX_YEAR, MIN_YEAR, SUPPORTED_COUNTRIES},
    domain::fallback,
    infrastructure::http::middleware::AppState,
};
use axum::{extract::State, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub sources: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct CountriesResponse {
    pub countries: &'static [&'static str],
    pub min_year: i32,
    pub max_year: i32,
    /// Country/year pairs served even when every external source is down
    pub offline_coverage: Vec<&'static str>,
}

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sources: state.resolver.source_names(),
    })
}

/// GET /countries - Supported country codes and year range
pub async fn list_countries() -> Json<CountriesResponse> {
    Json(CountriesResponse {
        countries: SUPPORTED_COUNTRIES,
        min_year: MIN_YEAR,
        max_year: MAX_YEAR,
        offline_coverage: fallback::covered_keys(),
    })
}

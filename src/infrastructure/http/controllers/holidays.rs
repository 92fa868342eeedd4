use crate::{
    application::services::ics_encoder,
    domain::entities::CalendarRequest,
    domain::errors::DomainError,
    infrastructure::http::middleware::{ApiError, ApiResult, AppState},
};
use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

pub const CALENDAR_CONTENT_TYPE: &str = "text/calendar; charset=utf-8";
const CACHE_CONTROL_VALUE: &str = "public, max-age=86400";

#[derive(Debug, Deserialize)]
pub struct HolidayQuery {
    pub country: Option<String>,
    pub year: Option<String>,
    pub region: Option<String>,
}

/// GET /holidays?country=US&year=2025&region=CA - Download an ICS calendar
pub async fn get_holidays(
    State(state): State<AppState>,
    Query(query): Query<HolidayQuery>,
) -> ApiResult<Response> {
    let request = CalendarRequest::from_query(
        query.country.as_deref(),
        query.year.as_deref(),
        query.region.as_deref(),
    )?;

    let records = state
        .resolver
        .fetch(&request.country, request.year, request.region.as_deref())
        .await;

    if records.is_empty() {
        return Err(DomainError::NoHolidaysFound(format!(
            "{} in {}",
            request.label(),
            request.year
        ))
        .into());
    }

    let body = ics_encoder::render(&records, &request);
    metrics::counter!("calendars_rendered_total").increment(1);
    tracing::info!(
        country = %request.country,
        year = %request.year,
        region = request.region.as_deref().unwrap_or(""),
        count = records.len(),
        "Calendar generated"
    );

    let headers = calendar_headers(&request, records.len())?;
    Ok((StatusCode::OK, headers, body).into_response())
}

fn calendar_headers(request: &CalendarRequest, count: usize) -> ApiResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(CALENDAR_CONTENT_TYPE),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        header_value(format!("attachment; filename=\"{}\"", request.filename()))?,
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(CACHE_CONTROL_VALUE),
    );
    headers.insert(
        HeaderName::from_static("x-holiday-count"),
        HeaderValue::from(count),
    );
    headers.insert(
        HeaderName::from_static("x-country"),
        header_value(request.country.to_string())?,
    );
    headers.insert(
        HeaderName::from_static("x-year"),
        header_value(request.year.to_string())?,
    );
    if let Some(region) = &request.region {
        headers.insert(
            HeaderName::from_static("x-region"),
            header_value(region.clone())?,
        );
    }
    Ok(headers)
}

fn header_value(value: String) -> ApiResult<HeaderValue> {
    HeaderValue::try_from(value)
        .map_err(|e| ApiError::Internal(format!("Invalid response header value: {}", e)))
}

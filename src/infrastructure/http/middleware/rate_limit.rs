use crate::application::services::SubscriptionTier;
use crate::infrastructure::http::middleware::{ApiError, AppState};
use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};

pub const TIER_HEADER: &str = "x-subscription-tier";
pub const CLIENT_ID_HEADER: &str = "x-client-id";

/// Middleware applying the subscription tier's request quota per client
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let headers = request.headers();
    let tier = SubscriptionTier::from_header(header_value(headers, TIER_HEADER));
    let client = client_key(headers);

    if let Err(wait) = state.rate_limiter.check(tier, &client) {
        tracing::warn!(
            tier = tier.as_str(),
            client = %client,
            retry_after_secs = wait.as_secs(),
            "Rate limit exceeded"
        );
        return ApiError::TooManyRequests(wait).into_response();
    }

    next.run(request).await
}

/// Client identity: explicit client id, else first forwarded address, else shared bucket
fn client_key(headers: &HeaderMap) -> String {
    header_value(headers, CLIENT_ID_HEADER)
        .or_else(|| {
            header_value(headers, "x-forwarded-for")
                .and_then(|v| v.split(',').next())
                .map(str::trim)
        })
        .unwrap_or("anonymous")
        .to_string()
}

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

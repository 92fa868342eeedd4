use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use holical::application::services::{HolidayResolver, RateLimitPolicies, TierRateLimiter};
use holical::domain::ports::HolidaySource;
use holical::infrastructure::http::middleware::AppState;
use holical::infrastructure::http::router::{build_router, build_router_with_timeout};
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub fn build_test_app(sources: Vec<Arc<dyn HolidaySource>>) -> Router {
    build_test_app_with_limits(sources, RateLimitPolicies::default())
}

pub fn build_test_app_with_limits(
    sources: Vec<Arc<dyn HolidaySource>>,
    policies: RateLimitPolicies,
) -> Router {
    let resolver = HolidayResolver::new(sources, Duration::from_millis(500));
    let state = AppState::new(resolver, TierRateLimiter::new(policies));
    build_router(state)
}

/// Sources get a generous per-attempt budget so the request deadline expires first
pub fn build_test_app_with_deadline(
    sources: Vec<Arc<dyn HolidaySource>>,
    request_timeout: Duration,
) -> Router {
    let resolver = HolidayResolver::new(sources, Duration::from_secs(5));
    let state = AppState::new(resolver, TierRateLimiter::default());
    build_router_with_timeout(state, request_timeout)
}

pub async fn send(app: &Router, uri: &str, headers: &[(&str, &str)]) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    for (name, value) in headers {
        builder = builder.header(*name, *value);
    }
    let request = builder.body(Body::empty()).expect("valid request");
    app.clone().oneshot(request).await.expect("router is infallible")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, uri, &[]).await
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("readable body");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let text = body_text(response).await;
    serde_json::from_str(&text).expect("json body")
}

/// Count `BEGIN:VEVENT` blocks in an ICS document
pub fn event_count(ics: &str) -> usize {
    ics.matches("BEGIN:VEVENT\r\n").count()
}

/// Values of every line starting with `name:`
pub fn property_values<'a>(ics: &'a str, name: &str) -> Vec<&'a str> {
    let prefix = format!("{}:", name);
    ics.split("\r\n")
        .filter_map(|line| line.strip_prefix(prefix.as_str()))
        .collect()
}

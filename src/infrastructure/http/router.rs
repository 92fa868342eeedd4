use crate::infrastructure::http::controllers::{health, holidays};
use crate::infrastructure::http::middleware::{rate_limit_middleware, ApiError, AppState};
use axum::{
    error_handling::HandleErrorLayer, response::IntoResponse, response::Response, routing::get,
    BoxError, Router,
};
use std::any::Any;
use std::time::Duration;
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

pub fn build_router(state: AppState) -> Router {
    build_router_with_timeout(state, DEFAULT_REQUEST_TIMEOUT)
}

pub fn build_router_with_timeout(state: AppState, request_timeout: Duration) -> Router {
    // Rate limited routes
    let limited = Router::new()
        .route("/holidays", get(holidays::get_holidays))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ));

    // Build public routes
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health::health))
        .route("/countries", get(health::list_countries))
        .merge(limited)
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(request_timeout),
        )
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root_handler() -> &'static str {
    "Holiday Calendar API"
}

async fn handle_timeout(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        ApiError::RequestTimeout.into_response()
    } else {
        ApiError::Internal(format!("unhandled middleware error: {}", err)).into_response()
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(format!("handler panicked: {}", detail)).into_response()
}

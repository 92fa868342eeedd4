use crate::domain::errors::DomainError;
use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;
use std::time::Duration;

#[derive(Debug)]
pub enum ApiError {
    /// Client input error: (code, message)
    BadRequest(&'static str, String),
    /// Requested data does not exist: (code, message)
    NotFound(&'static str, String),
    TooManyRequests(Duration),
    /// Overall request deadline expired
    RequestTimeout,
    /// Detail is logged, never returned to the caller
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(code, msg) => write!(f, "Bad request ({}): {}", code, msg),
            ApiError::NotFound(code, msg) => write!(f, "Not found ({}): {}", code, msg),
            ApiError::TooManyRequests(wait) => {
                write!(f, "Too many requests, retry after {}s", wait.as_secs())
            }
            ApiError::RequestTimeout => write!(f, "Request timed out"),
            ApiError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::BadRequest(code, _) | ApiError::NotFound(code, _) => *code,
            ApiError::TooManyRequests(_) => "RATE_LIMIT_EXCEEDED",
            ApiError::RequestTimeout => "REQUEST_TIMEOUT",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(..) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(..) => StatusCode::NOT_FOUND,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::RequestTimeout => StatusCode::REQUEST_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let title = status.canonical_reason().unwrap_or("Error");

        let body = match &self {
            ApiError::BadRequest(_, msg) | ApiError::NotFound(_, msg) => json!({
                "error": title,
                "message": msg,
                "code": code,
            }),
            ApiError::TooManyRequests(wait) => json!({
                "error": title,
                "message": "Rate limit exceeded for your subscription tier. Please try again later.",
                "code": code,
                "retry_after_seconds": wait.as_secs().max(1),
            }),
            ApiError::RequestTimeout => json!({
                "error": title,
                "message": "The request took too long to complete",
                "code": code,
            }),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Request failed with internal error");
                json!({
                    "error": title,
                    "message": "An unexpected error occurred",
                    "code": code,
                })
            }
        };

        let mut response = (status, Json(body)).into_response();
        if let ApiError::TooManyRequests(wait) = self {
            response.headers_mut().insert(
                header::RETRY_AFTER,
                HeaderValue::from(wait.as_secs().max(1)),
            );
        }
        response
    }
}

// Convert from domain errors
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        let code = err.code();
        match err {
            DomainError::NoHolidaysFound(_) => ApiError::NotFound(code, err.to_string()),
            _ => ApiError::BadRequest(code, err.to_string()),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

const RETRY_NOTICE: &str = "Failed to fetch market data. Please try again later.";

// Failures coming back from the market data provider
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UpstreamError {
    #[error("Rate limit exceeded. Please wait a minute and try again.")]
    RateLimited,

    #[error("Market data API key is invalid or missing.")]
    Unauthorized,

    #[error("Market data request timed out.")]
    Timeout,

    #[error("{}", .message.as_deref().unwrap_or(RETRY_NOTICE))]
    Upstream { message: Option<String> },
}

impl UpstreamError {
    pub fn upstream(message: impl Into<String>) -> Self {
        UpstreamError::Upstream {
            message: Some(message.into()),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            UpstreamError::RateLimited => "rate_limited",
            UpstreamError::Unauthorized => "unauthorized",
            UpstreamError::Timeout => "timeout",
            UpstreamError::Upstream { .. } => "upstream_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            UpstreamError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Text shown to the chat user; the provider's message when we have one.
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

// Errors returned by the HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "validation_error",
            ApiError::Upstream(e) => e.kind(),
            ApiError::Internal(_) => "internal_error",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(e) => e.status(),
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        });
        (self.status(), body).into_response()
    }
}

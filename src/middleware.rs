use axum::{
    Json,
    body::{Body, to_bytes},
    extract::Request,
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;

use crate::error::ErrorBody;

const MAX_LOGGED_BODY: usize = 4096;

// Log every 5xx with a prefix of its body, then hand the full response back
pub async fn log_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(%method, %path, status = %parts.status, "server error, body unreadable: {}", e);
            parts.headers.remove(header::CONTENT_LENGTH);
            let body = Json(ErrorBody {
                error: "internal_error",
                message: "Internal server error".to_string(),
            });
            return (parts, body).into_response();
        }
    };

    // only the log line is truncated, the client gets the whole body
    let logged = &bytes[..bytes.len().min(MAX_LOGGED_BODY)];
    tracing::error!(
        %method,
        %path,
        status = %parts.status,
        body = %String::from_utf8_lossy(logged),
        truncated = bytes.len() > MAX_LOGGED_BODY,
        "server error"
    );

    parts.headers.remove(header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

fn panic_message(err: &(dyn Any + Send)) -> String {
    if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    }
}

/// Last resort for handler panics. Detail is only exposed in dev mode.
pub fn panic_response(dev_mode: bool) -> impl Fn(Box<dyn Any + Send + 'static>) -> Response + Clone {
    move |err: Box<dyn Any + Send + 'static>| {
        let detail = panic_message(err.as_ref());
        tracing::error!(panic = %detail, "handler panicked");

        let message = if dev_mode {
            format!("Internal server error: {}", detail)
        } else {
            "Internal server error".to_string()
        };
        let body = Json(ErrorBody {
            error: "internal_error",
            message,
        });
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

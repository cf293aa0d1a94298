use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use std::time::Instant;

use crate::error::ApiError;
use crate::intent::IntentRouter;
use crate::metrics::CHAT_LATENCY;
use crate::models::ChatRequest;
use crate::state::AppState;

pub async fn chat_handler(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let message = match payload {
        Ok(Json(ChatRequest { message: Some(m) })) if !m.trim().is_empty() => m,
        Ok(_) => return ApiError::Validation("Message is required".to_string()).into_response(),
        Err(rejection) => {
            return ApiError::Validation(format!("Invalid chat request: {}", rejection.body_text()))
                .into_response();
        }
    };

    let start_time = Instant::now();
    let reply = IntentRouter::new(&state.market).classify(&message).await;
    CHAT_LATENCY.observe(start_time.elapsed().as_secs_f64());

    match reply {
        Ok(result) => Json(result).into_response(),
        Err(failure) => failure.into_response(),
    }
}

//! Route handlers

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiResult};
use super::AppState;

pub const STATUS_MESSAGE: &str = "Health Chatbot API is running";

/// Body of `GET /`
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub message: String,
}

/// Body of `POST /predict`
#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub response: String,
}

/// Liveness check: static payload, no side effects.
pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse { message: STATUS_MESSAGE.to_string() })
}

/// Predict the answer for `message`.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> ApiResult<Json<PredictResponse>> {
    let Json(request) = payload?;
    let message = request
        .message
        .filter(|m| !m.is_empty())
        .ok_or(ApiError::NoInput)?;

    let response = state.inferencer.predict(&message).to_string();
    Ok(Json(PredictResponse { response }))
}

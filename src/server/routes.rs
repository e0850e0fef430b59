// src/server/routes.rs
use super::AppStateArc;
use crate::error::AppError;
use crate::request::GenerateRequest;
use crate::types::{GenerationOutcome, RequestId};
use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

pub fn generate_routes() -> Router<AppStateArc> {
    Router::new()
        .route("/generate", post(generate))
        .route("/api/generate", post(generate))
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/health", get(health_check))
}

/// Always answers with the `success` envelope; the status follows the error kind.
async fn generate(
    State(state): State<AppStateArc>,
    body: Result<Bytes, BytesRejection>,
) -> (StatusCode, Json<GenerationOutcome>) {
    let request_id = RequestId::new();

    let result = match body
        .map_err(|rejection| AppError::MalformedRequestBody(rejection.body_text()))
        .and_then(|body| GenerateRequest::from_body(&body))
    {
        Ok(request) => state.pipeline.run(request_id, &request).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(data) => (StatusCode::OK, Json(GenerationOutcome::Success { data })),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                log::error!("[{}] {} ({}): {}", request_id, status, e.kind(), e);
            } else {
                log::warn!("[{}] {} ({}): {}", request_id, status, e.kind(), e);
            }
            (status, Json(GenerationOutcome::failure(e)))
        }
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

pub async fn not_found() -> (StatusCode, Json<GenerationOutcome>) {
    (
        StatusCode::NOT_FOUND,
        Json(GenerationOutcome::failure("Not found")),
    )
}

fn status_for(error: &AppError) -> StatusCode {
    StatusCode::from_u16(error.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

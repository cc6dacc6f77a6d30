use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::state::AppState;
use crate::translate::{TranslateError, TranslationRequest, TranslationResponse};

pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/translate", post(translate_text))
}

fn error_response(status: StatusCode, detail: String) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

fn translate_error_response(error: TranslateError) -> (StatusCode, Json<Value>) {
    match error {
        TranslateError::EmptyInput => error_response(StatusCode::BAD_REQUEST, error.to_string()),
        e => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Translation failed: {}", e),
        ),
    }
}

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Translation API is running",
        "endpoints": {
            "translate": "/translate (POST)",
            "health": "/health (GET)"
        }
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// `POST /translate`: translate text between two languages.
///
/// # Errors
///
/// - 400 Bad Request: text is empty after trimming
/// - 500 Internal Server Error: generation or output recovery failed
async fn translate_text(
    State(state): State<AppState>,
    Json(request): Json<TranslationRequest>,
) -> Result<Json<TranslationResponse>, (StatusCode, Json<Value>)> {
    if request.text.trim().is_empty() {
        return Err(translate_error_response(TranslateError::EmptyInput));
    }

    let request_id = Uuid::new_v4();
    let span = info_span!(
        "translate",
        %request_id,
        src = %request.source_language,
        tgt = %request.target_language
    );

    let result = state
        .translator
        .translate(&request.text, &request.source_language, &request.target_language)
        .instrument(span.clone())
        .await;

    match result {
        Ok(output) => {
            span.in_scope(|| info!(chars = request.text.chars().count(), "translation completed"));
            Ok(Json(TranslationResponse::new(output, request)))
        }
        Err(e) => {
            span.in_scope(|| warn!(error = %e, "translation failed"));
            Err(translate_error_response(e))
        }
    }
}

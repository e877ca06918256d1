use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::response::{json_error, AppError};
use crate::routes::transition_error;
use crate::services::gemini::DifficultyLevel;
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    subject: String,
    topic_count: u32,
    difficulty: DifficultyLevel,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    from: usize,
    to: usize,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session();

    let request = session
        .write()
        .await
        .begin_syllabus_generation(&body.subject, body.topic_count, body.difficulty)
        .map_err(transition_error)?;

    // The lock is released while the call is in flight; the loading
    // flag refuses a second submission in the meantime.
    let result = state
        .gemini()
        .generate_syllabus(
            &request.subject,
            request.topic_count,
            request.difficulty,
            request.language,
        )
        .await;

    let mut guard = session.write().await;
    match result {
        Ok(syllabus) => {
            guard.syllabus_generated(syllabus);
            Ok(Json(SuccessResponse {
                success: true,
                data: guard.snapshot(),
            }))
        }
        Err(err) => {
            guard.syllabus_generation_failed();
            tracing::error!(error = %err, "syllabus generation failed");
            if err.is_parse_failure() {
                Err(json_error(
                    StatusCode::BAD_GATEWAY,
                    "PARSE_FAILED",
                    "The generated syllabus could not be read",
                ))
            } else {
                Err(json_error(
                    StatusCode::BAD_GATEWAY,
                    "GENERATION_FAILED",
                    "Syllabus generation failed",
                ))
            }
        }
    }
}

pub async fn reorder(
    State(state): State<AppState>,
    Json(body): Json<ReorderRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session();
    let mut guard = session.write().await;
    guard
        .reorder_topics(body.from, body.to)
        .map_err(transition_error)?;
    Ok(Json(SuccessResponse {
        success: true,
        data: guard.snapshot(),
    }))
}

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::response::{json_error, AppError};
use crate::routes::transition_error;
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    topic_id: String,
}

pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session();

    let request = session
        .write()
        .await
        .begin_content_generation(&body.topic_id)
        .map_err(transition_error)?;

    let result = state
        .gemini()
        .generate_detailed_content(
            &request.topic_title,
            &request.subject,
            request.difficulty,
            request.language,
        )
        .await;

    let mut guard = session.write().await;
    match result {
        Ok(content) => {
            guard.content_generated(content);
            Ok(Json(SuccessResponse {
                success: true,
                data: guard.snapshot(),
            }))
        }
        Err(err) => {
            // Call and parse failures collapse to one message here.
            guard.content_generation_failed();
            tracing::error!(error = %err, "content generation failed");
            Err(json_error(
                StatusCode::BAD_GATEWAY,
                "GENERATION_FAILED",
                "Content generation failed. Please try again.",
            ))
        }
    }
}

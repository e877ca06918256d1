use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::ExportKind;
use crate::export::{self, docx, pdf, DocumentFormat};
use crate::response::AppError;
use crate::routes::transition_error;
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    kind: ExportKind,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRequested {
    message: String,
}

pub async fn request(
    State(state): State<AppState>,
    Json(body): Json<ExportRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session();
    let mut guard = session.write().await;
    let message = guard.request_export(body.kind).map_err(transition_error)?;
    Ok(Json(SuccessResponse {
        success: true,
        data: ExportRequested { message },
    }))
}

pub async fn confirm(State(state): State<AppState>) -> Result<Response, AppError> {
    let session = state.session();
    let job = session
        .write()
        .await
        .confirm_export()
        .map_err(transition_error)?;

    // Rendering happens outside the lock; the job carries everything
    // it needs.
    let bytes = match job.format {
        DocumentFormat::Pdf => pdf::render_pdf(&job.spec).map_err(|err| {
            tracing::error!(error = %err, "PDF rendering failed");
            AppError::internal("document rendering failed")
        })?,
        DocumentFormat::Docx => docx::render_docx(&job.spec).map_err(|err| {
            tracing::error!(error = %err, "DOCX rendering failed");
            AppError::internal("document rendering failed")
        })?,
    };

    let filename = export::download_filename(&job.spec.title, job.format.extension());
    let headers = [
        (
            header::CONTENT_TYPE,
            job.format.content_type().to_string(),
        ),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{filename}\""),
        ),
    ];
    Ok((headers, bytes).into_response())
}

pub async fn decline(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session();
    let mut guard = session.write().await;
    guard.decline_export();
    Json(SuccessResponse {
        success: true,
        data: guard.snapshot(),
    })
}

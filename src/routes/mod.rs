mod content;
mod export;
mod health;
mod session;
mod syllabus;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Router;

use crate::core::TransitionError;
use crate::response::{json_error, AppError};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/session", get(session::snapshot))
        .route("/api/session/view", post(session::navigate))
        .route("/api/session/language", post(session::set_language))
        .route("/api/session/search", post(session::set_search))
        .route("/api/session/tab", post(session::select_tab))
        .route("/api/syllabus/generate", post(syllabus::generate))
        .route("/api/syllabus/reorder", post(syllabus::reorder))
        .route("/api/content/generate", post(content::generate))
        .route("/api/export/request", post(export::request))
        .route("/api/export/confirm", post(export::confirm))
        .route("/api/export/decline", post(export::decline))
        .nest("/health", health::router())
        .nest("/api/health", health::router())
        .fallback(fallback_handler)
        .with_state(state)
}

/// Guard rejections are refusals, not server faults; each maps to a
/// client-error status.
pub(crate) fn transition_error(err: TransitionError) -> AppError {
    match err {
        TransitionError::EmptySubject | TransitionError::InvalidReorder => {
            AppError::validation(err.to_string())
        }
        TransitionError::UnknownTopic => AppError::not_found(err.to_string()),
        TransitionError::GenerationInFlight
        | TransitionError::NoSyllabus
        | TransitionError::NoContent
        | TransitionError::NoPendingExport
        | TransitionError::Unavailable(_) => AppError::conflict(err.to_string()),
    }
}

async fn fallback_handler() -> Response {
    json_error(StatusCode::NOT_FOUND, "NOT_FOUND", "Route not found").into_response()
}

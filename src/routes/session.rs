use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::core::{ContentTab, ViewState};
use crate::response::AppError;
use crate::routes::transition_error;
use crate::services::gemini::Language;
use crate::state::AppState;

#[derive(Serialize)]
struct SuccessResponse<T> {
    success: bool,
    data: T,
}

#[derive(Debug, Deserialize)]
pub struct NavigateRequest {
    view: ViewState,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    language: Language,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    query: String,
}

#[derive(Debug, Deserialize)]
pub struct TabRequest {
    tab: ContentTab,
}

pub async fn snapshot(State(state): State<AppState>) -> impl IntoResponse {
    let session = state.session();
    let data = session.read().await.snapshot();
    Json(SuccessResponse {
        success: true,
        data,
    })
}

pub async fn navigate(
    State(state): State<AppState>,
    Json(body): Json<NavigateRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session();
    let mut guard = session.write().await;
    guard.navigate(body.view).map_err(transition_error)?;
    Ok(Json(SuccessResponse {
        success: true,
        data: guard.snapshot(),
    }))
}

pub async fn set_language(
    State(state): State<AppState>,
    Json(body): Json<LanguageRequest>,
) -> impl IntoResponse {
    let session = state.session();
    let mut guard = session.write().await;
    guard.set_language(body.language);
    Json(SuccessResponse {
        success: true,
        data: guard.snapshot(),
    })
}

pub async fn set_search(
    State(state): State<AppState>,
    Json(body): Json<SearchRequest>,
) -> impl IntoResponse {
    let session = state.session();
    let mut guard = session.write().await;
    guard.set_search_query(body.query);
    Json(SuccessResponse {
        success: true,
        data: guard.snapshot(),
    })
}

pub async fn select_tab(
    State(state): State<AppState>,
    Json(body): Json<TabRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = state.session();
    let mut guard = session.write().await;
    guard.select_tab(body.tab).map_err(transition_error)?;
    Ok(Json(SuccessResponse {
        success: true,
        data: guard.snapshot(),
    }))
}

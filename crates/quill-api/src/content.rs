use axum::{
    Json,
    extract::{Path, Query, State},
    http::HeaderMap,
    response::IntoResponse,
};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use quill_types::api::{CreateContentRequest, CreateContentResponse, DeleteContentResponse};
use quill_types::models::ContentItem;

use crate::auth::{AppState, require_session};
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ContentQuery {
    pub user_id: Option<String>,
}

/// GET /api/content — the whole collection in stored order, optionally
/// filtered to one owner. No auth, no pagination.
pub async fn list_content(
    State(state): State<AppState>,
    Query(query): Query<ContentQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let items = state.store.content.load().await?;

    let items: Vec<ContentItem> = match query.user_id {
        Some(user_id) => items.into_iter().filter(|i| i.user_id == user_id).collect(),
        None => items,
    };

    Ok(Json(items))
}

/// POST /api/content — append a new item.
///
/// Ownership (`user_id`) is taken from the request body rather than derived
/// from the session, matching the deployed clients. The session only proves
/// the caller is logged in.
pub async fn create_content(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(req): Json<CreateContentRequest>,
) -> Result<impl IntoResponse, ApiError> {
    require_session(&headers, &state.sessions)?;

    let item = ContentItem {
        id: Uuid::new_v4().to_string(),
        title: req.title,
        content: req.content,
        author: req.author,
        user_id: req.user_id,
        date: Utc::now(),
    };
    let id = item.id.clone();

    let _guard = state.store.content.lock().await;
    let mut items = state.store.content.load().await?;
    items.push(item);
    state.store.content.save(&items).await?;

    info!("Content {} created", id);
    Ok(Json(CreateContentResponse { success: true, id }))
}

/// DELETE /api/content/{id} — owner-only removal.
pub async fn delete_content(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let session = require_session(&headers, &state.sessions)?;

    let _guard = state.store.content.lock().await;
    let mut items = state.store.content.load().await?;

    let item = items
        .iter()
        .find(|i| i.id == item_id)
        .ok_or(ApiError::NotFound)?;

    if item.user_id != session.user_id {
        return Err(ApiError::Forbidden);
    }

    items.retain(|i| i.id != item_id);
    state.store.content.save(&items).await?;

    info!("Content {} deleted", item_id);
    Ok(Json(DeleteContentResponse { success: true }))
}

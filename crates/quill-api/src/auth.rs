use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use quill_auth::password;
use quill_auth::session::{Session, SessionStore};
use quill_store::JsonStore;
use quill_types::api::{
    LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, UserSummary,
};
use quill_types::models::User;

use crate::error::ApiError;

/// Request header carrying the session token.
pub const SESSION_HEADER: &str = "x-session-id";

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub store: JsonStore,
    pub sessions: SessionStore,
}

/// Resolve the `X-Session-ID` header against the session store.
/// Missing header, unknown token, and expired token all look the same.
pub fn require_session(headers: &HeaderMap, sessions: &SessionStore) -> Result<Session, ApiError> {
    let session_id = headers
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or(ApiError::Unauthorized)?;

    sessions.resolve(session_id).ok_or(ApiError::Unauthorized)
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // Hold the collection guard across the uniqueness check and the insert.
    let _guard = state.store.users.lock().await;
    let mut users = state.store.users.load().await?;

    if users.iter().any(|u| u.username == req.username) {
        warn!("Registration rejected: username {} taken", req.username);
        return Err(ApiError::UsernameTaken);
    }

    let password_hash = password::hash(&req.password)?;
    let user = User {
        id: Uuid::new_v4().to_string(),
        username: req.username,
        password_hash,
        created_at: Utc::now(),
    };
    let username = user.username.clone();

    users.push(user);
    state.store.users.save(&users).await?;

    info!("Registered user {}", username);
    Ok(Json(RegisterResponse {
        success: true,
        message: "registration successful".to_string(),
    }))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let users = state.store.users.load().await?;

    let user = users
        .iter()
        .find(|u| u.username == req.username)
        .ok_or(ApiError::InvalidCredentials)?;

    if !password::verify(&req.password, &user.password_hash) {
        return Err(ApiError::InvalidCredentials);
    }

    let session_id = state.sessions.create(&user.id);
    info!("User {} logged in", user.username);

    Ok(Json(LoginResponse {
        success: true,
        session_id,
        user: UserSummary {
            id: user.id.clone(),
            username: user.username.clone(),
            created_at: user.created_at,
        },
    }))
}

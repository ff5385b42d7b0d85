use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::{AppState, PlayerId, ServerSessionId, SessionRecord};

/// Session lifecycle routes the game server calls: join, spawn, leave.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/sessions", post(create_session).get(list_sessions))
        .route("/sessions/{token}", get(get_session).delete(end_session))
        .route("/sessions/{token}/spawn", post(spawn_session))
}

#[derive(Debug, Deserialize)]
pub struct CreateSessionRequest {
    pub player_id: PlayerId,
    pub server_session_id: ServerSessionId,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub session_token: Uuid,
    pub player_id: PlayerId,
    pub server_session_id: ServerSessionId,
    pub join_time_ms: i64,
    pub spawn_time_ms: Option<i64>,
    pub active: bool,
}

impl From<SessionRecord> for SessionResponse {
    fn from(record: SessionRecord) -> Self {
        Self {
            session_token: record.session_token(),
            player_id: record.player().clone(),
            server_session_id: record.server_session().clone(),
            join_time_ms: record.join_time().timestamp_millis(),
            spawn_time_ms: record.spawn_time().map(|t| t.timestamp_millis()),
            active: record.is_active(),
        }
    }
}

async fn create_session(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let record = SessionRecord::new(body.player_id, body.server_session_id);
    let response = SessionResponse::from(record.clone());
    state.sessions.register(record)?;
    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_sessions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<SessionResponse>> {
    Json(
        state
            .sessions
            .all()
            .into_iter()
            .map(SessionResponse::from)
            .collect(),
    )
}

async fn get_session(
    State(state): State<Arc<AppState>>,
    Path(token): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let record = state
        .sessions
        .lookup(&token)
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(record.into()))
}

async fn spawn_session(
    State(state): State<Arc<AppState>>,
    Path(token): Path<Uuid>,
) -> Result<Json<SessionResponse>, ApiError> {
    let record = state
        .sessions
        .mark_spawned(&token)
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(record.into()))
}

async fn end_session(
    State(state): State<Arc<AppState>>,
    Path(token): Path<Uuid>,
) -> StatusCode {
    // Ending an absent session is a no-op, same as registry removal.
    state.sessions.end(&token);
    StatusCode::NO_CONTENT
}

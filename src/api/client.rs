use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Extension, Json, Router,
};
use uuid::Uuid;

use crate::api::server::SessionResponse;
use crate::error::ApiError;
use crate::middleware::Cookies;
use crate::models::{AppState, SessionQuery};

/// Routes for game clients resolving their own session.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/session", get(my_session))
}

/// Resolves the caller's session from the `token` query parameter, falling
/// back to the `session_token` cookie set at join time.
async fn my_session(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SessionQuery>,
    Extension(cookies): Extension<Cookies>,
) -> Result<Response, ApiError> {
    let token = match query.token.or_else(|| token_from_cookies(&cookies)) {
        Some(token) => token,
        None => {
            return Ok((StatusCode::BAD_REQUEST, "missing session token").into_response());
        }
    };

    let record = state
        .sessions
        .lookup(&token)
        .ok_or(ApiError::SessionNotFound)?;
    Ok(Json(SessionResponse::from(record)).into_response())
}

fn token_from_cookies(cookies: &Cookies) -> Option<Uuid> {
    cookies.get("session_token")?.parse().ok()
}

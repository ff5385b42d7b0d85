use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::RegistryError;

/// Last-resort error boundary for route handlers.
///
/// Handlers bubble failures up with `?`; the `IntoResponse` impl decides
/// what the client sees. Internal failures are logged once, server-side,
/// and answered with an opaque 500 so no detail leaks.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session not found")]
    SessionNotFound,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::SessionNotFound => {
                (StatusCode::NOT_FOUND, "session not found").into_response()
            }
            ApiError::Registry(err) => {
                tracing::error!(error = %err, "session registry failure");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!").into_response()
            }
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "unhandled error in request handler");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something broke!").into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_text(response: Response) -> String {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn internal_errors_become_opaque_500s() {
        let err = ApiError::Internal(anyhow::anyhow!("db handle dropped on the floor"));
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_text(response).await;
        assert_eq!(body, "Something broke!");
        assert!(!body.contains("db handle"));
    }

    #[tokio::test]
    async fn missing_sessions_are_404() {
        let response = ApiError::SessionNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

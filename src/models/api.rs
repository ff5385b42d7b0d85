use serde::Deserialize;
use uuid::Uuid;

#[derive(Debug, Deserialize)]
pub struct WsParams {
    pub token: Uuid,
}

/// Optional token for `/client/session`; falls back to the
/// `session_token` cookie when absent.
#[derive(Debug, Deserialize)]
pub struct SessionQuery {
    pub token: Option<Uuid>,
}

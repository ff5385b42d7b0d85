// src/models/mod.rs

pub mod api;
pub mod app_state;
pub mod session;

pub use api::{SessionQuery, WsParams};
pub use app_state::AppState;
pub use session::{PlayerId, ServerSessionId, SessionRecord};

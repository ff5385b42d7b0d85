use crate::middleware::RateLimiter;
use crate::services::SessionRegistry;

/// Process-scoped shared state, created once at startup and handed to the
/// router as `Arc<AppState>`. Tests build their own isolated instance.
#[derive(Debug, Default)]
pub struct AppState {
    pub sessions: SessionRegistry,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

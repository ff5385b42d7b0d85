// src/api/mod.rs

pub mod client;
pub mod server;
pub mod ui;

use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware as axum_middleware,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::middleware;
use crate::models::AppState;
use crate::ws;

/// Origins allowed to make credentialed cross-origin requests: local
/// development hosts plus the named production/staging frontends.
const ALLOWED_ORIGINS: &[&str] = &[
    "http://loopback.gmod:3000",
    "http://loopback.gmod:3030",
    "http://loopback.gmod:8080",
    "http://localhost:3000",
    "http://localhost:3030",
    "http://localhost:8080",
    "https://papi-staging.palominorp.com",
    "https://papi.palominorp.com",
    "https://pal-os.palominorp.com",
    "https://auth.palominorp.com",
];

/// Builds the full application router: version route, the three route
/// groups, static files, the WebSocket endpoint, and the middleware
/// pipeline. Axum runs the last-added layer first, so the stack below
/// executes as rate limit, CORS, access log, then cookie parsing, with
/// body parsing happening in the handlers' extractors.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(version))
        .nest("/ui", ui::routes())
        .nest("/server", server::routes())
        .nest("/client", client::routes())
        .route("/ws", get(ws::websocket_handler))
        .nest_service("/public", ServeDir::new("public"))
        .layer(axum_middleware::from_fn(middleware::cookies::parse))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::enforce,
        ))
        .with_state(state)
}

async fn version() -> Json<Value> {
    Json(json!({ "version": env!("CARGO_PKG_VERSION") }))
}

fn cors_layer() -> CorsLayer {
    let origins: Vec<HeaderValue> = ALLOWED_ORIGINS
        .iter()
        .copied()
        .map(HeaderValue::from_static)
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
}

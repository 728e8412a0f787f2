use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use bridgebot_sync::Bridge;

/// Central shared state — passed as `Arc<AppState>` to all handlers.
pub struct AppState {
    pub bridge: Bridge,
}

/// Assemble the full router, nested under the base URL's path when the
/// bridge is not mounted at the root.
pub fn build_router(state: Arc<AppState>) -> Router {
    let path = state.bridge.base_url().path().to_string();

    let routes = Router::new()
        .route("/", get(crate::http::health::index_handler))
        .route("/ping", get(crate::http::health::ping_handler))
        .route("/{adaptor_id}", post(crate::http::inbound::inbound_handler))
        .with_state(state);

    let router = if path.is_empty() || path == "/" {
        routes
    } else {
        Router::new().nest(&path, routes)
    };

    router
        .fallback(crate::http::health::not_found_handler)
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

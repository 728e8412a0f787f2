use axum::{http::StatusCode, response::Html, Json};
use serde_json::{json, Value};

/// GET /ping — liveness probe.
pub async fn ping_handler() -> &'static str {
    "pong"
}

/// GET / — human-facing landing page.
pub async fn index_handler() -> Html<&'static str> {
    Html("<h1>BridgeBot is running</h1>")
}

/// JSON 404 for anything that matches no route.
pub async fn not_found_handler() -> (StatusCode, Json<Value>) {
    (StatusCode::NOT_FOUND, Json(json!({"error": "Not Found"})))
}

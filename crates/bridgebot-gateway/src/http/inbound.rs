//! Webhook ingress — POST /{adaptor_id}.
//!
//! One route serves every subscriber: the path segment selects the
//! adaptor, the raw request is handed to its `receive`, and every parsed
//! message is dispatched concurrently with that adaptor as origin.
//! Deliveries are never retried by this side.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use futures_util::future::join_all;
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use bridgebot_sync::InboundRequest;

use crate::app::AppState;

/// POST /{adaptor_id}
///
/// 200 `{"status":"ok"}` once every dispatched message has settled,
/// 404 for an id with no subscriber, 500 when `receive` fails.
pub async fn inbound_handler(
    State(state): State<Arc<AppState>>,
    Path(adaptor_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    let Some(subscriber) = state.bridge.subscriber(&adaptor_id) else {
        warn!(adaptor = %adaptor_id, "webhook for unknown adaptor");
        return Err((
            StatusCode::NOT_FOUND,
            Json(json!({"error": "unknown adaptor"})),
        ));
    };

    let trace_id = Uuid::new_v4();
    info!(adaptor = %adaptor_id, trace_id = %trace_id, bytes = body.len(), "webhook arrived");

    let messages = subscriber
        .receive(InboundRequest::new(headers, body))
        .await
        .map_err(|e| {
            warn!(adaptor = %adaptor_id, trace_id = %trace_id, error = %e, "receive failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({"error": e.to_string()})),
            )
        })?
        .unwrap_or_default();

    if !messages.is_empty() {
        info!(
            adaptor = %adaptor_id,
            trace_id = %trace_id,
            count = messages.len(),
            "dispatching inbound messages"
        );
        join_all(
            messages
                .into_iter()
                .map(|message| state.bridge.dispatch(message, &adaptor_id)),
        )
        .await;
    }

    Ok(Json(json!({"status": "ok"})))
}

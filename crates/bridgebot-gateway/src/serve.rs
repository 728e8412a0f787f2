use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use bridgebot_core::BridgeConfig;
use bridgebot_sync::Bridge;

use crate::app::{build_router, AppState};

/// Announce webhook URLs to every subscriber, then bind and serve until
/// the listener fails. The port comes from the bridge's base URL.
pub async fn serve(bridge: Bridge, config: &BridgeConfig) -> anyhow::Result<()> {
    bridge.announce_webhooks().await;

    let port = bridge.base_url().port();
    let addr: SocketAddr = format!("{}:{}", config.bind, port).parse()?;

    let state = Arc::new(AppState { bridge });
    let router = build_router(state);

    info!(%addr, "bridge gateway listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;
    Ok(())
}

//! HTTP API Server
//!
//! Starts and manages the axum-based HTTP server. The WebSocket gateway's
//! router is merged onto the same listener so the push channel shares the
//! API's port, as the deployment expects.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method};
use tower_http::cors::{Any, AllowOrigin, CorsLayer};
use tracing::{info, warn};

use bc_core::{DateRegistry, NotificationChannel};

use crate::routes::routes;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<DateRegistry>,
    pub notifier: NotificationChannel,
    pub api_secret: String,
}

/// Build the CORS layer from the configured origin list. An empty or absent
/// list falls back to a permissive policy.
pub fn cors_layer(allowed_origins: Option<&[String]>) -> CorsLayer {
    match allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let parsed: Vec<HeaderValue> = origins
                .iter()
                .filter_map(|origin| match origin.parse() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!("ignoring unparseable CORS origin: {origin}");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_origin(AllowOrigin::list(parsed))
                .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
                .allow_headers(Any)
        }
        _ => CorsLayer::permissive(),
    }
}

/// Start the HTTP server with the API routes plus any extra router
/// (the WebSocket gateway) merged in.
pub async fn start_server(
    port: u16,
    allowed_origins: Option<Vec<String>>,
    state: AppState,
    extra: Router,
) -> anyhow::Result<()> {
    let app = routes()
        .with_state(state)
        .merge(extra)
        .layer(cors_layer(allowed_origins.as_deref()));

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!("HTTP API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

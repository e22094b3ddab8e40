//! HTTP surface of the relay
//!
//! | Route      | Method     | Body          | Reply         |
//! |------------|------------|---------------|---------------|
//! | `/`        | GET, HEAD  |               | `{"message"}` |
//! | `/chat`    | POST       | `{"message"}` | `{"reply"}`   |
//!
//! Failures reply `{"detail"}`, see [`error::ApiError`].

pub mod error;
pub mod handlers;

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::routing::get;
use axum::routing::post;
use relay_application::QuestionSubmitter;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::{info, warn};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub submitter: Arc<dyn QuestionSubmitter>,
    pub welcome_message: Arc<str>,
}

impl AppState {
    pub fn new(submitter: Arc<dyn QuestionSubmitter>, welcome_message: &str) -> Self {
        Self {
            submitter,
            welcome_message: Arc::from(welcome_message),
        }
    }
}

/// Build the router with CORS restricted to `allowed_origins`.
pub fn router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        // GET routes answer HEAD as well
        .route("/", get(handlers::home))
        .route("/chat", post(handlers::chat))
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// CORS for the configured origins. `"*"` allows any origin, without
/// credentials.
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if allowed_origins.iter().any(|o| o.trim() == "*") {
        return layer.allow_origin(AllowOrigin::any());
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin.trim()) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    layer
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
}

/// Serve `app` on `addr` until Ctrl-C.
pub async fn serve(addr: SocketAddr, app: Router) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down");
    }
}

//! HTTP server wiring for sharebin (router, handlers, and shared state).

/// Configuration loading and defaults.
pub mod config;
/// Application error types and their HTTP mapping.
pub mod error;
/// Liveness and view-consumption decisions.
pub mod expiry;
/// HTTP request handlers.
pub mod handlers;
/// Short identifier generation.
pub mod ident;
/// Data models for API requests and stored pastes.
pub mod models;
/// Paste lifecycle service.
pub mod service;
/// In-memory paste storage.
pub mod store;
/// Background expiry sweep.
pub mod sweep;

pub use config::Config;
pub use error::AppError;
pub use service::PasteService;
pub use store::PasteStore;

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<PasteService>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Construct shared application state.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    ///
    /// # Returns
    /// A new [`AppState`] with an empty paste store.
    pub fn new(config: Config) -> Self {
        let config = Arc::new(config);
        Self {
            service: Arc::new(PasteService::new(config.clone())),
            config,
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState) -> Router {
    let cors = cors_layer(state.config.cors_origin.as_deref());
    let body_limit = state.config.request_body_limit();

    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/pastes", post(handlers::paste::create_paste))
        .route("/pastes/:id", get(handlers::paste::read_paste))
        .with_state(state)
        .layer(
            tower::ServiceBuilder::new()
                .layer(DefaultBodyLimit::max(body_limit))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
}

// The browser client is served from a different origin, so CORS defaults to
// permissive and tightens to a single origin when one is configured.
fn cors_layer(configured_origin: Option<&str>) -> CorsLayer {
    let origin = configured_origin.and_then(|raw| match raw.parse::<HeaderValue>() {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(
                "Invalid CORS_ORIGIN '{}': {}. Allowing any origin",
                raw,
                err
            );
            None
        }
    });

    match origin {
        Some(value) => CorsLayer::new()
            .allow_origin(value)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE, header::ACCEPT]),
        None => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST])
            .allow_headers(Any),
    }
}

/// Resolve the listener address from the `BIND` env var override.
///
/// # Arguments
/// - `config`: Server configuration containing the configured `port`.
///
/// # Returns
/// The parsed `BIND` address, or `0.0.0.0:{port}` when `BIND` is missing or
/// invalid.
pub fn resolve_bind_address(config: &Config) -> SocketAddr {
    let default_bind = SocketAddr::from(([0, 0, 0, 0], config.port));
    match std::env::var("BIND") {
        Ok(value) => match value.trim().parse::<SocketAddr>() {
            Ok(addr) => addr,
            Err(err) => {
                tracing::warn!(
                    "Invalid BIND='{}': {}. Falling back to {}",
                    value,
                    err,
                    default_bind
                );
                default_bind
            }
        },
        Err(_) => default_bind,
    }
}

/// Run the Axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Returns
/// `Ok(())` when the server exits cleanly.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let app = create_app(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            port: 4050,
            public_base_url: "http://localhost:4050".to_string(),
            cors_origin: None,
            max_content_chars: 10_000,
            ttl_min_secs: 60,
            ttl_max_secs: 604_800,
            max_views_limit: 1_000,
            id_length: 8,
            sweep_interval_secs: 0,
        }
    }

    #[test]
    fn create_app_builds_router_for_default_and_restricted_cors() {
        let _open = create_app(AppState::new(test_config()));

        let mut restricted = test_config();
        restricted.cors_origin = Some("https://bin.example.com".to_string());
        let _locked = create_app(AppState::new(restricted));
    }

    #[test]
    fn resolve_bind_address_honors_and_validates_bind_override() {
        let config = test_config();
        let default_bind = SocketAddr::from(([0, 0, 0, 0], 4050));

        assert_eq!(resolve_bind_address(&config), default_bind);

        unsafe {
            std::env::set_var("BIND", "127.0.0.1:4051");
        }
        assert_eq!(
            resolve_bind_address(&config),
            SocketAddr::from(([127, 0, 0, 1], 4051))
        );

        unsafe {
            std::env::set_var("BIND", "bad:host");
        }
        assert_eq!(resolve_bind_address(&config), default_bind);

        unsafe {
            std::env::remove_var("BIND");
        }
    }
}

//! HTTP server wiring for the store review directory (API, handlers, and shared state).

/// Caller identity extractors.
pub mod auth;
/// HTTP error mapping for API handlers.
pub mod error;
/// HTTP handlers for store, menu, file, and review endpoints.
pub mod handlers;

pub use storereview_core::{
    config, db, models, AppError, Config, Database, ReviewService, DEFAULT_PORT,
};

use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use storereview_core::constants::USER_ID_HEADER;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, set_header::SetResponseHeaderLayer,
    trace::TraceLayer,
};

const CONTENT_SECURITY_POLICY: &str =
    "default-src 'none'; frame-ancestors 'none'; base-uri 'none'; form-action 'none'";

/// Shared state passed to HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
    pub config: Arc<Config>,
    pub reviews: Arc<ReviewService<Database>>,
}

impl AppState {
    /// Construct shared application state.
    ///
    /// # Arguments
    /// - `config`: Loaded configuration.
    /// - `db`: Open database handle.
    ///
    /// # Returns
    /// A new [`AppState`] whose review service reads and writes through `db`.
    pub fn new(config: Config, db: Database) -> Self {
        let db = Arc::new(db);
        Self {
            reviews: Arc::new(ReviewService::for_database(db.clone())),
            db,
            config: Arc::new(config),
        }
    }
}

/// Create the application router with all routes and middleware.
///
/// # Arguments
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
///
/// # Returns
/// Configured `axum::Router`.
pub fn create_app(state: AppState, allow_public_access: bool) -> Router {
    let cors_port = state.config.port;
    create_app_with_cors_port(state, allow_public_access, cors_port)
}

/// Resolve the listener address from env var overrides and security policy.
///
/// # Arguments
/// - `config`: Server configuration containing the configured `port`.
/// - `allow_public_access`: Whether non-loopback bind targets are permitted.
///
/// # Returns
/// A validated socket address that enforces loopback when public access is disabled.
pub fn resolve_bind_address(config: &Config, allow_public_access: bool) -> SocketAddr {
    let default_bind = SocketAddr::from(([127, 0, 0, 1], config.port));
    let requested = match std::env::var("BIND") {
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
    };

    if allow_public_access || requested.ip().is_loopback() {
        return requested;
    }

    tracing::warn!(
        "Non-loopback bind {} requested without ALLOW_PUBLIC_ACCESS; forcing 127.0.0.1",
        requested
    );
    SocketAddr::from(([127, 0, 0, 1], requested.port()))
}

fn local_origins(cors_port: u16) -> Vec<HeaderValue> {
    [
        format!("http://localhost:{}", cors_port),
        format!("http://127.0.0.1:{}", cors_port),
    ]
    .into_iter()
    .filter_map(|origin| match HeaderValue::from_str(&origin) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!("Skipping invalid CORS origin '{}': {}", origin, err);
            None
        }
    })
    .collect()
}

fn cors_layer(allow_public_access: bool, cors_port: u16) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE];
    if allow_public_access {
        CorsLayer::new()
            .allow_origin(tower_http::cors::Any)
            .allow_methods(methods)
            .allow_headers(tower_http::cors::Any)
    } else {
        CorsLayer::new()
            .allow_origin(local_origins(cors_port))
            .allow_methods(methods)
            .allow_headers([
                header::CONTENT_TYPE,
                header::ACCEPT,
                HeaderName::from_static(USER_ID_HEADER),
            ])
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/api/store", post(handlers::store::create_store))
        .route("/api/stores", get(handlers::store::list_stores))
        .route("/api/store/:id", get(handlers::store::get_store))
        .route("/api/store/:id/menu", post(handlers::store::create_menu))
        .route("/api/store/:id/menus", get(handlers::store::list_menus))
        .route("/api/store/:id/file", post(handlers::store::register_file))
        .route("/api/store/:id/files", get(handlers::store::list_files))
        .route("/api/store/:id/review", post(handlers::review::create_review))
        .route("/api/store/:id/reviews", get(handlers::review::list_reviews))
        .route(
            "/api/store/:store_id/review/:review_id",
            get(handlers::review::get_review),
        )
        .route(
            "/api/review/:id/like",
            post(handlers::review::like_review).delete(handlers::review::unlike_review),
        )
        .route(
            "/api/user/:id/reviews",
            get(handlers::review::list_user_reviews),
        )
}

fn create_app_with_cors_port(state: AppState, allow_public_access: bool, cors_port: u16) -> Router {
    let max_body_size = state.config.max_body_size;
    api_routes().with_state(state).layer(
        tower::ServiceBuilder::new()
            .layer(DefaultBodyLimit::max(max_body_size))
            .layer(TraceLayer::new_for_http())
            .layer(CompressionLayer::new())
            .layer(cors_layer(allow_public_access, cors_port))
            .layer(SetResponseHeaderLayer::overriding(
                header::CONTENT_SECURITY_POLICY,
                HeaderValue::from_static(CONTENT_SECURITY_POLICY),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_CONTENT_TYPE_OPTIONS,
                HeaderValue::from_static("nosniff"),
            ))
            .layer(SetResponseHeaderLayer::overriding(
                header::X_FRAME_OPTIONS,
                HeaderValue::from_static("DENY"),
            )),
    )
}

fn listener_cors_port(listener: &tokio::net::TcpListener, fallback_port: u16) -> u16 {
    listener
        .local_addr()
        .map(|addr| addr.port())
        .unwrap_or(fallback_port)
}

/// Run the Axum server with graceful shutdown support.
///
/// # Arguments
/// - `listener`: Bound TCP listener for the server.
/// - `state`: Shared application state.
/// - `allow_public_access`: Whether to allow cross-origin requests from any origin.
/// - `shutdown_signal`: Future that resolves when shutdown should start.
///
/// # Errors
/// Returns any I/O error produced by `axum::serve`.
pub async fn serve_router(
    listener: tokio::net::TcpListener,
    state: AppState,
    allow_public_access: bool,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<(), std::io::Error> {
    let cors_port = listener_cors_port(&listener, state.config.port);
    let app = create_app_with_cors_port(state, allow_public_access, cors_port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await
}

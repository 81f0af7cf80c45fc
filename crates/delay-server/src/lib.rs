//! HTTP surface of the delay server.
//!
//! Every request, on any path and with any method, goes through the same
//! stack:
//!
//! ```text
//! CORS headers -> trace -> admission gate -> endpoint -> delay handler
//! ```
//!
//! The gate admits `max_clients` requests at a time (one by default). The
//! endpoint answers `OPTIONS` immediately and hands everything else to
//! [`DelayService`], which validates the query, sleeps, and decides between
//! the welcome page and a simulated failure.
//!
//! # Example
//!
//! ```rust,no_run
//! use delay_server::{serve, ServerSettings};
//!
//! # async fn example() -> Result<(), delay_server::StartupError> {
//! let settings = ServerSettings {
//!     max_clients: 4,
//!     ..ServerSettings::default()
//! };
//! serve(settings).await
//! # }
//! ```

pub mod config;
pub mod endpoint;
pub mod error;

pub use config::{Cli, ServerSettings, DEFAULT_MAX_CLIENTS, DEFAULT_PORT, PORT_ENV};
pub use endpoint::{render_error, DelayEndpoint};
pub use error::StartupError;

use axum::error_handling::HandleErrorLayer;
use axum::http::{header, HeaderValue};
use axum::Router;
use delay_server_gate::AdmissionLayer;
use delay_server_handler::{DelayConfig, DelayService};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

/// Value of `Access-Control-Allow-Origin`.
pub const CORS_ALLOW_ORIGIN: &str = "*";
/// Value of `Access-Control-Allow-Methods`.
pub const CORS_ALLOW_METHODS: &str = "POST, GET, OPTIONS, PUT, DELETE";
/// Value of `Access-Control-Allow-Headers`.
pub const CORS_ALLOW_HEADERS: &str =
    "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization";

/// Builds the router from an already configured gate and handler.
///
/// Handy in tests, where the caller wants to keep the gate around to look at
/// its free slots or close it.
pub fn router(gate: AdmissionLayer, handler: DelayService) -> Router {
    let endpoint = ServiceBuilder::new()
        .layer(HandleErrorLayer::new(render_error))
        .layer(gate)
        .service(DelayEndpoint::new(handler));

    Router::new()
        .fallback_service(endpoint)
        .layer(TraceLayer::new_for_http())
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static(CORS_ALLOW_ORIGIN),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(CORS_ALLOW_METHODS),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            HeaderValue::from_static(CORS_ALLOW_HEADERS),
        ))
}

/// Builds the whole application from startup settings.
pub fn build_app(settings: &ServerSettings) -> Router {
    let gate = AdmissionLayer::builder()
        .name("delay-endpoint")
        .max_clients(settings.max_clients)
        .on_call_queued(|max_clients| {
            tracing::debug!(max_clients, "all slots busy, request waiting");
        })
        .build();

    let mut handler = DelayConfig::builder().name("delay");
    if let Some(seed) = settings.seed {
        handler = handler.seed(seed);
    }
    let handler = handler
        .on_failure_injected(|| tracing::debug!("answering with a mock error"))
        .build();

    router(gate, handler)
}

/// Binds the listener for `settings.addr`.
pub async fn bind(settings: &ServerSettings) -> Result<TcpListener, StartupError> {
    TcpListener::bind(settings.addr)
        .await
        .map_err(|source| StartupError::Bind {
            addr: settings.addr,
            source,
        })
}

/// Serves `app` on an already bound listener until the process is stopped.
pub async fn serve_on(listener: TcpListener, app: Router) -> Result<(), StartupError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("listening on {}", addr);
    }
    axum::serve(listener, app.into_make_service())
        .await
        .map_err(StartupError::Serve)
}

/// Binds and serves with the given settings.
pub async fn serve(settings: ServerSettings) -> Result<(), StartupError> {
    tracing::info!(
        max_clients = settings.max_clients,
        seed = ?settings.seed,
        "starting delay server"
    );
    let listener = bind(&settings).await?;
    serve_on(listener, build_app(&settings)).await
}

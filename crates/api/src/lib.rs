//! HTTP surface of the JIS site: the admin/content REST API, uploads, and
//! server-rendered public pages over the JSON document store.

pub mod config;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod routes;
pub mod state;
pub mod storage;

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::limit::RequestBodyLimitLayer;

pub use config::AppConfig;
pub use state::AppState;

/// Build the router with its full middleware stack.
///
/// Layers, outermost first: request tracing, CORS, security headers, JSON
/// 413 bodies, body limit, error detail (development only), panic recovery.
pub fn build_app(state: AppState) -> Router {
    let config = state.config().clone();

    let mut app = routes::build_router(state).layer(CatchPanicLayer::custom(error::panic_response));

    if !config.is_production() {
        app = app.layer(axum::middleware::map_response(
            middleware::error_detail::expose_error_detail,
        ));
    }

    let app = app
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_upload_bytes))
        .layer(axum::middleware::map_response(
            middleware::body_limit::payload_too_large_as_json,
        ));
    let app = middleware::security_headers::apply(app);

    app.layer(
        ServiceBuilder::new()
            .layer(middleware::request_tracing::trace_layer())
            .layer(middleware::cors::cors_layer(&config)),
    )
}

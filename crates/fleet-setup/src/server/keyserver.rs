//! Public key server.
//!
//! The vendor fetches the integration's public key from a fixed well-known
//! path to verify domain ownership. Nothing else is served.

use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;

use crate::config::{KeyServerConfig, paths};

/// Create the key server router.
///
/// The file is opened on every request, so a key written after startup is
/// picked up and a missing key is a plain 404.
pub fn create_router(config: &KeyServerConfig) -> Router {
    let key_path = config.public_key_path();
    tracing::info!(path = %key_path.display(), route = paths::PUBLIC_KEY_ROUTE, "Serving public key");

    Router::new()
        .route_service(paths::PUBLIC_KEY_ROUTE, ServeFile::new(key_path))
        .layer(CatchPanicLayer::custom(super::handle_panic))
        .layer(TraceLayer::new_for_http())
}

//! # HTTP Router
//!
//! Assembles the service's routes and middleware:
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/api/upload` | [`upload_handler`] |
//! | `GET` | `/healthz` | [`healthz`] |
//! | any | anything else | [`not_found`] |
//!
//! Request bodies are capped at [`HttpConfig::max_body_bytes`] and every
//! request is traced with `tower_http`'s [`TraceLayer`].
//!
//! With local storage, [`serve_local_media`] additionally exposes the stored
//! files under [`LOCAL_MEDIA_PATH`].

use std::path::Path;
use std::sync::Arc;

use axum::{
    Extension, Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::storage::LOCAL_MEDIA_PATH;
use crate::config::web::HttpConfig;
use crate::web::fallback::{healthz, not_found};
use crate::web::upload::{upload_handler::upload_handler, uploader::UploadService};

/// Builds the application router around an [`UploadService`].
pub fn build_router(upload: Arc<UploadService>, http: &HttpConfig) -> Router {
    Router::new()
        .route("/api/upload", post(upload_handler))
        .route("/healthz", get(healthz))
        .fallback(not_found)
        .layer(Extension(upload))
        .layer(DefaultBodyLimit::max(http.max_body_bytes))
        .layer(TraceLayer::new_for_http())
}

/// Serves files written by
/// [`LocalFileStorage`](crate::web::upload::local_storage::LocalFileStorage)
/// from `root` under [`LOCAL_MEDIA_PATH`].
pub fn serve_local_media(router: Router, root: &Path) -> Router {
    router.nest_service(LOCAL_MEDIA_PATH, ServeDir::new(root))
}

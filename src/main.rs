use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use imgup_web::config::app::AppConfig;
use imgup_web::config::storage::{StorageBackend, StorageConfig};
use imgup_web::image::image_rs_processor::ImageRsProcessor;
use imgup_web::web::router::{build_router, serve_local_media};
use imgup_web::web::upload::local_storage::LocalFileStorage;
use imgup_web::web::upload::storage::ObjectStorage;
use imgup_web::web::upload::uploader::UploadService;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env();

    let storage = build_storage(&cfg.storage)?;
    let processor = Arc::new(ImageRsProcessor::new(cfg.normalize_opts()));
    let upload = Arc::new(UploadService::new(storage, processor, cfg.upload.clone()));

    let mut app = build_router(upload, &cfg.http);
    if cfg.storage.backend == StorageBackend::Local && cfg.storage.public_base_url.is_none() {
        app = serve_local_media(app, &cfg.storage.local_root);
    }

    let listener = tokio::net::TcpListener::bind(&cfg.http.addr)
        .await
        .with_context(|| format!("bind {}", cfg.http.addr))?;
    info!(
        addr = %cfg.http.addr,
        max_width = cfg.image.max_width,
        max_height = cfg.image.max_height,
        jpeg_quality = cfg.image.jpeg_quality,
        max_file_size = cfg.upload.max_file_size,
        "image upload service listening"
    );

    axum::serve(listener, app).await.context("serve")?;
    Ok(())
}

fn build_storage(cfg: &StorageConfig) -> Result<Arc<dyn ObjectStorage>> {
    match cfg.backend {
        StorageBackend::Local => {
            info!(root = ?cfg.local_root, "using local file storage");
            Ok(Arc::new(LocalFileStorage::new(
                cfg.local_root.clone(),
                cfg.public_base_url(),
            )))
        }
        #[cfg(feature = "s3")]
        StorageBackend::S3 => Ok(Arc::new(
            imgup_web::web::upload::s3_storage::S3Storage::from_config(cfg)?,
        )),
        #[cfg(not(feature = "s3"))]
        StorageBackend::S3 => anyhow::bail!("STORAGE_BACKEND=s3 requires the `s3` feature"),
    }
}

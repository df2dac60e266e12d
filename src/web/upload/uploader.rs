use std::sync::Arc;
use std::time::Instant;

use tracing::info;

use super::naming::{generate_image_id, storage_key};
use super::storage::{ObjectStorage, StoredObject};
use crate::config::upload::UploadConfig;
use crate::error::upload::UploadError;
use crate::image::format::AllowedFormat;
use crate::image::processor::ImageProcessor;

/// A file received from the client, before any processing.
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub filename: String,
    /// Declared MIME type of the file part.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct UploadService {
    storage: Arc<dyn ObjectStorage>,
    image: Arc<dyn ImageProcessor>,
    cfg: UploadConfig,
}

impl UploadService {
    pub fn new(
        storage: Arc<dyn ObjectStorage>,
        image: Arc<dyn ImageProcessor>,
        cfg: UploadConfig,
    ) -> Self {
        Self {
            storage,
            image,
            cfg,
        }
    }

    pub fn config(&self) -> &UploadConfig {
        &self.cfg
    }

    /// Validates, normalizes and stores one image.
    ///
    /// The declared content type is checked before the image processor is
    /// invoked; normalization runs on the blocking thread pool.
    pub async fn upload(&self, file: UploadedFile) -> Result<StoredObject, UploadError> {
        let start = Instant::now();
        let original_size = file.bytes.len();

        if original_size == 0 {
            return Err(UploadError::EmptyContent);
        }
        if original_size > self.cfg.max_file_size {
            return Err(UploadError::FileTooLarge {
                size: original_size,
                max: self.cfg.max_file_size,
            });
        }

        let format = AllowedFormat::from_content_type(&file.content_type)?;

        let opt_start = Instant::now();
        let image = Arc::clone(&self.image);
        let bytes = file.bytes;
        let normalized = tokio::task::spawn_blocking(move || image.normalize(&bytes, format))
            .await
            .map_err(|e| UploadError::Internal(format!("normalize task failed: {e}")))??;
        info!(
            content_type = normalized.content_type,
            original_size,
            normalized_size = normalized.bytes.len(),
            width = normalized.width,
            height = normalized.height,
            elapsed_ms = opt_start.elapsed().as_millis() as u64,
            "image normalized"
        );

        let image_id = generate_image_id(&file.filename, format, &self.cfg.allowed_extensions);
        let key = storage_key(&self.cfg.key_prefix, &image_id);

        let put_start = Instant::now();
        let url = self
            .storage
            .put(&key, &normalized.bytes, normalized.content_type)
            .await
            .map_err(UploadError::Storage)?;
        info!(
            key = %key,
            elapsed_ms = put_start.elapsed().as_millis() as u64,
            total_ms = start.elapsed().as_millis() as u64,
            "image stored"
        );

        Ok(StoredObject::new(
            key,
            url,
            normalized.content_type,
            normalized.bytes.len() as u64,
        ))
    }
}

//! # Image Upload Handler
//!
//! Provides an Axum-compatible HTTP endpoint for multipart image uploads.
//!
//! ## Features
//! - Accepts `multipart/form-data` requests; the image is read from the field
//!   named by [`UploadConfig::field_name`](crate::config::upload::UploadConfig)
//!   (default `image`), other fields are ignored
//! - Delegates validation, normalization and storage to [`UploadService`]
//! - Returns `{"imageUrl", "key", "contentType", "bytes"}` on success and
//!   `{"error": ...}` on failure
//!
//! ## Example
//! ```rust,ignore
//! use axum::{Router, routing::post, Extension};
//! use std::sync::Arc;
//! use imgup_web::web::upload::upload_handler::upload_handler;
//!
//! let app = Router::new()
//!     .route("/api/upload", post(upload_handler))
//!     .layer(Extension(upload_service));
//! ```

use std::sync::Arc;

use axum::{Extension, Json, extract::Multipart};
use serde::Serialize;

use crate::error::upload::UploadError;
use crate::web::upload::uploader::{UploadService, UploadedFile};

/// JSON response returned after a successful upload.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResp {
    /// Public URL of the stored image.
    pub image_url: String,
    /// Storage key of the stored image.
    pub key: String,
    /// Content type the image was stored with.
    pub content_type: String,
    /// Stored size in bytes.
    pub bytes: u64,
}

/// Axum handler that processes one multipart image upload.
///
/// ## Returns
/// - `200 OK` with JSON if the upload succeeded
/// - `400 BAD REQUEST` if the field is missing, the body is malformed, or
///   the image is rejected (type, decode, size)
/// - `413 PAYLOAD TOO LARGE` if the body exceeds the server's body limit
/// - `500 INTERNAL SERVER ERROR` for encode or storage failures
///
/// ## Example
/// ```text
/// POST /api/upload
/// Content-Type: multipart/form-data; boundary=----
///
/// ----
/// Content-Disposition: form-data; name="image"; filename="cat.png"
/// Content-Type: image/png
///
/// <bytes>
/// ----
/// ```
pub async fn upload_handler(
    Extension(upload_uc): Extension<Arc<UploadService>>,
    mut multipart: Multipart,
) -> Result<Json<UploadResp>, UploadError> {
    let field_name = upload_uc.config().field_name.as_str();

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }

        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .ok_or(UploadError::MissingContentType)?;
        let filename = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = field.bytes().await?;

        let saved = upload_uc
            .upload(UploadedFile {
                filename,
                content_type,
                bytes: bytes.to_vec(),
            })
            .await?;

        return Ok(Json(UploadResp {
            image_url: saved.url,
            key: saved.key,
            content_type: saved.content_type,
            bytes: saved.bytes,
        }));
    }

    Err(UploadError::MissingField(field_name.to_string()))
}

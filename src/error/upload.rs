use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use super::image::ImageError;

/// Errors surfaced by [`UploadService`](crate::web::upload::uploader::UploadService)
/// and the upload endpoint.
///
/// Each variant maps to one HTTP status; the response body is always
/// `{"error": "<message>"}`.
///
/// # Example
/// ```
/// use imgup_web::error::upload::UploadError;
/// use axum::http::StatusCode;
///
/// let err = UploadError::FileTooLarge { size: 10, max: 5 };
/// assert_eq!(err.status(), StatusCode::BAD_REQUEST);
/// ```
#[derive(Debug, Error)]
pub enum UploadError {
    /// The multipart body had no field with the expected name.
    #[error("missing form field {0:?}")]
    MissingField(String),

    /// The file part carried no `Content-Type`.
    #[error("missing file content type")]
    MissingContentType,

    /// The multipart body could not be read.
    #[error("malformed multipart body: {0}")]
    Multipart(String),

    /// The request body exceeded the server's body limit.
    #[error("request body too large: {0}")]
    BodyTooLarge(String),

    /// The uploaded file was empty.
    #[error("no image content received")]
    EmptyContent,

    /// The upload exceeded the byte ceiling before any processing.
    #[error("file is {size} bytes (max {max})")]
    FileTooLarge { size: usize, max: usize },

    #[error(transparent)]
    Image(#[from] ImageError),

    /// Writing to object storage failed.
    #[error("storage write failed: {0:#}")]
    Storage(anyhow::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl UploadError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_)
            | Self::MissingContentType
            | Self::Multipart(_)
            | Self::EmptyContent
            | Self::FileTooLarge { .. } => StatusCode::BAD_REQUEST,
            Self::BodyTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::Image(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            Self::Image(_) | Self::Storage(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Message safe to show to the uploader.
    ///
    /// Server-side failures get a generic message; their details only go to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::Image(ImageError::UnsupportedFormat(ct)) => {
                format!("unsupported image type {ct:?}; allowed: image/jpeg, image/png")
            }
            Self::Image(ImageError::Decode { format, .. }) => {
                format!("file is not a valid {format} image")
            }
            Self::Image(ImageError::TooLarge { max, .. }) => {
                format!("optimized image is still larger than the {max} byte limit")
            }
            Self::Image(ImageError::Encode { .. }) | Self::Storage(_) | Self::Internal(_) => {
                "failed to process image".to_string()
            }
            other => other.to_string(),
        }
    }
}

impl From<MultipartError> for UploadError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::BodyTooLarge(e.body_text())
        } else {
            Self::Multipart(e.body_text())
        }
    }
}

impl IntoResponse for UploadError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "upload failed");
        } else {
            tracing::info!(error = %self, "upload rejected");
        }
        (status, Json(json!({ "error": self.public_message() }))).into_response()
    }
}

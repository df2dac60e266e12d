use thiserror::Error;

/// Failure kinds of the image normalization pipeline.
///
/// Every variant is terminal for the upload: nothing is retried and no
/// partial output accompanies the error.
///
/// # Example
/// ```
/// use imgup_web::error::image::ImageError;
///
/// let err = ImageError::TooLarge { size: 10, max: 5 };
/// assert_eq!(err.to_string(), "normalized image is 10 bytes (max 5)");
/// assert!(err.is_client_error());
/// ```
#[derive(Debug, Error)]
pub enum ImageError {
    /// The declared content type is not whitelisted. Nothing was decoded.
    #[error("unsupported content type: {0:?}")]
    UnsupportedFormat(String),

    /// The bytes are not a valid image of the declared format.
    #[error("decode {format} failed: {source}")]
    Decode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },

    /// The re-encoded output is still over the byte ceiling.
    #[error("normalized image is {size} bytes (max {max})")]
    TooLarge { size: usize, max: usize },

    /// The codec failed while re-encoding.
    #[error("encode {format} failed: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: image::ImageError,
    },
}

impl ImageError {
    /// `true` when the upload itself is at fault rather than the server.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, Self::Encode { .. })
    }
}

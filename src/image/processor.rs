//! # Image Processing Abstractions
//!
//! Defines the normalization policy and the backend-agnostic interface that
//! applies it.
//!
//! This module provides:
//! - [`NormalizeOpts`]: resize box, JPEG quality, byte ceiling and decoder limits.
//! - [`NormalizedImage`]: the re-encoded bytes plus their content type.
//! - [`ImageProcessor`]: the trait the upload service depends on, so the
//!   codec backend can be swapped or stubbed in tests.
//!
//! # Example
//! ```rust
//! use imgup_web::error::image::ImageError;
//! use imgup_web::image::format::AllowedFormat;
//! use imgup_web::image::processor::{ImageProcessor, NormalizedImage};
//!
//! struct PassThrough;
//!
//! impl ImageProcessor for PassThrough {
//!     fn normalize(
//!         &self,
//!         img_bytes: &[u8],
//!         format: AllowedFormat,
//!     ) -> Result<NormalizedImage, ImageError> {
//!         Ok(NormalizedImage::new(img_bytes.to_vec(), format, 1, 1))
//!     }
//! }
//!
//! let out = PassThrough.normalize(b"abc", AllowedFormat::Png).unwrap();
//! assert_eq!(out.bytes, b"abc");
//! assert_eq!(out.content_type, "image/png");
//! ```

use crate::error::image::ImageError;
use crate::image::format::AllowedFormat;

/// Default bounding box (pixels) for both width and height.
pub const DEFAULT_RESIZE_LIMIT: u32 = 555;
/// Default JPEG quality factor.
pub const DEFAULT_JPEG_QUALITY: u8 = 70;
/// Default byte ceiling for both the upload and the normalized output.
pub const DEFAULT_MAX_FILE_SIZE: usize = 6 * 1024 * 1024;
/// Default cap on decoder allocations.
pub const DEFAULT_MAX_DECODE_ALLOC: u64 = 512 * 1024 * 1024;
/// Default cap on either side of a decoded image, in pixels.
pub const DEFAULT_MAX_DECODE_DIMENSION: u32 = 16_384;

/// Normalization policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizeOpts {
    /// Maximum output width (in pixels).
    pub max_w: u32,
    /// Maximum output height (in pixels).
    pub max_h: u32,
    /// JPEG quality, 1..=100. Ignored for PNG.
    pub jpeg_quality: u8,
    /// Largest accepted encoded output, in bytes.
    pub max_file_size: usize,
    /// Upper bound on memory the decoder may allocate.
    pub max_decode_alloc: u64,
    /// Widest image the decoder accepts.
    pub max_decode_width: u32,
    /// Tallest image the decoder accepts.
    pub max_decode_height: u32,
}

impl NormalizeOpts {
    /// Creates options with the given resize box and default encoding policy.
    pub fn new(max_w: u32, max_h: u32) -> Self {
        Self {
            max_w,
            max_h,
            ..Self::default()
        }
    }

    /// Sets the JPEG quality, clamped to 1..=100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }

    /// Sets the output byte ceiling.
    pub fn with_max_file_size(mut self, max_file_size: usize) -> Self {
        self.max_file_size = max_file_size;
        self
    }

    /// Sets the decoder allocation cap.
    pub fn with_max_decode_alloc(mut self, max_decode_alloc: u64) -> Self {
        self.max_decode_alloc = max_decode_alloc;
        self
    }

    /// Sets the largest source dimensions the decoder accepts.
    pub fn with_max_decode_dimensions(mut self, width: u32, height: u32) -> Self {
        self.max_decode_width = width;
        self.max_decode_height = height;
        self
    }
}

impl Default for NormalizeOpts {
    fn default() -> Self {
        Self {
            max_w: DEFAULT_RESIZE_LIMIT,
            max_h: DEFAULT_RESIZE_LIMIT,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
            max_file_size: DEFAULT_MAX_FILE_SIZE,
            max_decode_alloc: DEFAULT_MAX_DECODE_ALLOC,
            max_decode_width: DEFAULT_MAX_DECODE_DIMENSION,
            max_decode_height: DEFAULT_MAX_DECODE_DIMENSION,
        }
    }
}

/// Output of a successful normalization.
///
/// `bytes.len()` never exceeds the `max_file_size` it was produced under.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NormalizedImage {
    /// Re-encoded image data.
    pub bytes: Vec<u8>,
    /// Always the canonical type of the input format.
    pub content_type: &'static str,
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
}

impl NormalizedImage {
    pub fn new(bytes: Vec<u8>, format: AllowedFormat, width: u32, height: u32) -> Self {
        Self {
            bytes,
            content_type: format.content_type(),
            width,
            height,
        }
    }
}

/// Trait defining the normalization step of an upload.
///
/// Implementations decode `img_bytes` as `format`, shrink the image into the
/// configured box, re-encode it in the same format and enforce the byte
/// ceiling. They must hold no mutable state across calls.
pub trait ImageProcessor: Send + Sync {
    /// Normalizes one image.
    ///
    /// # Errors
    /// [`ImageError::Decode`], [`ImageError::Encode`] or [`ImageError::TooLarge`].
    fn normalize(
        &self,
        img_bytes: &[u8],
        format: AllowedFormat,
    ) -> Result<NormalizedImage, ImageError>;
}

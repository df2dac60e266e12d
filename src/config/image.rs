//! # Image Configuration
//!
//! Normalization policy for uploaded images: resize box, JPEG quality and
//! decoder limits.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `IMAGE_MAX_WIDTH` | Maximum output width | `555` |
//! | `IMAGE_MAX_HEIGHT` | Maximum output height | `555` |
//! | `IMAGE_JPEG_QUALITY` | JPEG quality (1–100) | `70` |
//! | `IMAGE_MAX_DECODE_ALLOC` | Decoder allocation cap (bytes) | `536870912` |
//! | `IMAGE_MAX_DECODE_WIDTH` | Widest accepted source image | `16384` |
//! | `IMAGE_MAX_DECODE_HEIGHT` | Tallest accepted source image | `16384` |
//!
//! # Example
//! ```rust
//! use imgup_web::config::image::ImageConfig;
//!
//! let cfg = ImageConfig::default();
//! assert_eq!(cfg.max_width, 555);
//! assert_eq!(cfg.max_height, 555);
//! assert_eq!(cfg.jpeg_quality, 70);
//! ```

use super::env::read_parsed_from;
use crate::image::processor::{
    DEFAULT_JPEG_QUALITY, DEFAULT_MAX_DECODE_ALLOC, DEFAULT_MAX_DECODE_DIMENSION,
    DEFAULT_RESIZE_LIMIT, NormalizeOpts,
};

/// Configuration for image normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct ImageConfig {
    pub max_width: u32,
    pub max_height: u32,
    pub jpeg_quality: u8,
    pub max_decode_alloc: u64,
    pub max_decode_width: u32,
    pub max_decode_height: u32,
}

impl ImageConfig {
    /// Builds an [`ImageConfig`] from a custom variable source.
    ///
    /// Zero sizes are raised to 1 and the quality is clamped to 1..=100.
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_width = read_parsed_from(&provider, "IMAGE_MAX_WIDTH", DEFAULT_RESIZE_LIMIT);
        let max_height = read_parsed_from(&provider, "IMAGE_MAX_HEIGHT", DEFAULT_RESIZE_LIMIT);
        let jpeg_quality: u32 =
            read_parsed_from(&provider, "IMAGE_JPEG_QUALITY", DEFAULT_JPEG_QUALITY as u32);
        let max_decode_alloc =
            read_parsed_from(&provider, "IMAGE_MAX_DECODE_ALLOC", DEFAULT_MAX_DECODE_ALLOC);
        let max_decode_width =
            read_parsed_from(&provider, "IMAGE_MAX_DECODE_WIDTH", DEFAULT_MAX_DECODE_DIMENSION);
        let max_decode_height =
            read_parsed_from(&provider, "IMAGE_MAX_DECODE_HEIGHT", DEFAULT_MAX_DECODE_DIMENSION);

        Self {
            max_width: max_width.max(1),
            max_height: max_height.max(1),
            jpeg_quality: jpeg_quality.clamp(1, 100) as u8,
            max_decode_alloc,
            max_decode_width: max_decode_width.max(1),
            max_decode_height: max_decode_height.max(1),
        }
    }

    /// Normalization options for this policy under the given byte ceiling.
    pub fn normalize_opts(&self, max_file_size: usize) -> NormalizeOpts {
        NormalizeOpts::new(self.max_width, self.max_height)
            .with_jpeg_quality(self.jpeg_quality)
            .with_max_file_size(max_file_size)
            .with_max_decode_alloc(self.max_decode_alloc)
            .with_max_decode_dimensions(self.max_decode_width, self.max_decode_height)
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self::from_provider(|_| None)
    }
}

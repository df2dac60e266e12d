//! # Allowed Image Formats
//!
//! The closed set of formats accepted for upload.
//!
//! Each [`AllowedFormat`] variant ties together:
//! - the declared MIME type it is selected by,
//! - the `image` crate decoder/encoder ([`ImageFormat`]),
//! - the canonical output content type and file extension.
//!
//! Adding a format means adding a variant here; every `match` over
//! [`AllowedFormat`] then points at the remaining places to update.
//!
//! # Example
//! ```rust
//! use imgup_web::image::format::AllowedFormat;
//!
//! let fmt = AllowedFormat::from_content_type("image/png").unwrap();
//! assert_eq!(fmt, AllowedFormat::Png);
//! assert_eq!(fmt.content_type(), "image/png");
//!
//! assert!(AllowedFormat::from_content_type("image/gif").is_err());
//! ```

use image::ImageFormat;

use crate::error::image::ImageError;

/// MIME types accepted by [`AllowedFormat::from_content_type`].
pub const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// File extensions kept as-is when generating storage keys.
pub const ALLOWED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png"];

/// An image format the upload pipeline can decode and re-encode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AllowedFormat {
    Jpeg,
    Png,
}

impl AllowedFormat {
    /// Resolves a declared content type to a format.
    ///
    /// Matching is exact and case-sensitive. Nothing is decoded here; a body
    /// that does not match its declared type is rejected later by the decoder.
    ///
    /// # Errors
    /// [`ImageError::UnsupportedFormat`] for any type outside
    /// [`ALLOWED_MIME_TYPES`].
    pub fn from_content_type(content_type: &str) -> Result<Self, ImageError> {
        match content_type {
            "image/jpeg" => Ok(Self::Jpeg),
            "image/png" => Ok(Self::Png),
            other => Err(ImageError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Canonical content type of the re-encoded output.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Extension used when the uploaded filename carries none we accept.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// Whether a lowercased filename extension names this format.
    pub fn matches_extension(self, ext: &str) -> bool {
        match self {
            Self::Jpeg => matches!(ext, "jpg" | "jpeg"),
            Self::Png => ext == "png",
        }
    }

    /// The codec used for both decoding and encoding.
    pub fn image_format(self) -> ImageFormat {
        match self {
            Self::Jpeg => ImageFormat::Jpeg,
            Self::Png => ImageFormat::Png,
        }
    }
}

//! # Upload Configuration
//!
//! Provides configuration parameters for image uploads: the byte ceiling,
//! the multipart field carrying the file, and how storage keys are built.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `IMAGE_MAX_FILE_SIZE` | Byte ceiling for the upload and the normalized output | `6291456` (6 MiB) |
//! | `UPLOAD_FIELD_NAME` | Multipart field holding the image | `image` |
//! | `UPLOAD_KEY_PREFIX` | Storage key prefix | `uploads` |
//! | `UPLOAD_ALLOWED_EXTENSIONS` | Filename extensions kept in keys | `jpeg,jpg,png` |
//!
//! # Example
//! ```rust
//! use imgup_web::config::upload::UploadConfig;
//!
//! let cfg = UploadConfig::default();
//! assert_eq!(cfg.max_file_size, 6 * 1024 * 1024);
//! assert_eq!(cfg.field_name, "image");
//! assert_eq!(cfg.key_prefix, "uploads");
//! ```

use super::env::{read_list_from, read_parsed_from, read_string_from};
use crate::image::format::ALLOWED_EXTENSIONS;
use crate::image::processor::DEFAULT_MAX_FILE_SIZE;

/// Configuration for the upload flow.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadConfig {
    /// Largest accepted upload and largest accepted normalized output, in bytes.
    pub max_file_size: usize,
    /// Name of the multipart field carrying the image.
    pub field_name: String,
    /// Prefix of generated storage keys.
    pub key_prefix: String,
    /// Lowercase filename extensions preserved in storage keys.
    pub allowed_extensions: Vec<String>,
}

impl UploadConfig {
    /// Builds an [`UploadConfig`] from a custom variable source.
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            max_file_size: read_parsed_from(&provider, "IMAGE_MAX_FILE_SIZE", DEFAULT_MAX_FILE_SIZE),
            field_name: read_string_from(&provider, "UPLOAD_FIELD_NAME", "image"),
            key_prefix: read_string_from(&provider, "UPLOAD_KEY_PREFIX", "uploads"),
            allowed_extensions: read_list_from(
                &provider,
                "UPLOAD_ALLOWED_EXTENSIONS",
                ALLOWED_EXTENSIONS,
            )
            .into_iter()
            .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
            .collect(),
        }
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self::from_provider(|_| None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upload_config_defaults() {
        let cfg = UploadConfig::default();
        assert_eq!(cfg.max_file_size, 6 * 1024 * 1024);
        assert_eq!(cfg.field_name, "image");
        assert_eq!(cfg.key_prefix, "uploads");
        assert_eq!(cfg.allowed_extensions, vec!["jpeg", "jpg", "png"]);
    }

    #[test]
    fn upload_config_reads_values() {
        let cfg = UploadConfig::from_provider(|k| match k {
            "IMAGE_MAX_FILE_SIZE" => Some("1024".into()),
            "UPLOAD_FIELD_NAME" => Some("file".into()),
            "UPLOAD_KEY_PREFIX" => Some("media/avatars".into()),
            "UPLOAD_ALLOWED_EXTENSIONS" => Some(".JPG, png".into()),
            _ => None,
        });
        assert_eq!(cfg.max_file_size, 1024);
        assert_eq!(cfg.field_name, "file");
        assert_eq!(cfg.key_prefix, "media/avatars");
        assert_eq!(cfg.allowed_extensions, vec!["jpg", "png"]);
    }

    #[test]
    fn upload_config_clone_and_debug() {
        let cfg = UploadConfig::default();
        let clone = cfg.clone();
        assert_eq!(cfg, clone);

        let dbg_str = format!("{:?}", cfg);
        assert!(dbg_str.contains("uploads"));
        assert!(dbg_str.contains("image"));
    }
}

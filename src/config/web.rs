//! # HTTP Configuration
//!
//! Defines the HTTP server settings: bind address and request body limit.
//!
//! The body limit must leave room for the multipart framing around an image
//! of `IMAGE_MAX_FILE_SIZE` bytes; oversized files inside the limit are
//! rejected by the upload service with a proper message instead.
//!
//! # Examples
//! ```rust
//! use imgup_web::config::web::HttpConfig;
//!
//! let http = HttpConfig { addr: "127.0.0.1:3000".into(), max_body_bytes: 10 * 1024 * 1024 };
//! assert!(http.max_body_bytes > 1_000_000);
//! ```

use super::env::{read_parsed_from, read_string_from};

/// HTTP-related configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct HttpConfig {
    /// Socket address to bind (e.g. `"0.0.0.0:8080"`).
    pub addr: String,
    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl HttpConfig {
    /// Builds an [`HttpConfig`] from a custom variable source.
    ///
    /// `HTTP_MAX_BODY_BYTES` wins over `HTTP_MAX_BODY_MB` (default 8 MiB).
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let max_body_mb: usize = read_parsed_from(&provider, "HTTP_MAX_BODY_MB", 8);
        Self {
            addr: read_string_from(&provider, "HTTP_ADDR", "0.0.0.0:8080"),
            max_body_bytes: read_parsed_from(
                &provider,
                "HTTP_MAX_BODY_BYTES",
                max_body_mb.saturating_mul(1024 * 1024),
            ),
        }
    }
}

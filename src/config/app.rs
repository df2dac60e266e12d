//! # Application Configuration Loader
//!
//! Provides a unified configuration loader for the upload service:
//! HTTP server, image normalization policy, upload flow and object storage.
//!
//! Automatically loads `.env` files for non-production environments.
//! It checks for a custom `DOTENV_FILE` path first, then falls back to
//! `.env.{APP_ENV}` or `.env`.
//!
//! This configuration is typically initialized once at application startup
//! and shared throughout the system. The individual sections document their
//! own variables: [`HttpConfig`], [`ImageConfig`], [`UploadConfig`],
//! [`StorageConfig`].
//!
//! # Example
//! ```rust,no_run
//! use imgup_web::config::app::AppConfig;
//!
//! let cfg = AppConfig::from_env();
//! println!("listening on {}", cfg.http.addr);
//! ```

use std::env;

use crate::config::{
    image::ImageConfig, storage::StorageConfig, upload::UploadConfig, web::HttpConfig,
};
use crate::image::processor::NormalizeOpts;

/// Top-level application configuration.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// HTTP server configuration.
    pub http: HttpConfig,
    /// Image normalization policy.
    pub image: ImageConfig,
    /// Upload flow settings.
    pub upload: UploadConfig,
    /// Object storage backend and settings.
    pub storage: StorageConfig,
}

impl AppConfig {
    /// Loads application configuration from environment variables.
    ///
    /// ## Behavior
    /// - Reads `APP_ENV` (defaults to `"development"`).
    /// - Loads `.env` or `.env.{APP_ENV}` for non-production environments.
    /// - Parses all supported environment variables and falls back to defaults.
    pub fn from_env() -> Self {
        let app_env = env::var("APP_ENV").unwrap_or_else(|_| "development".into());

        if app_env != "production" {
            if let Ok(path) = env::var("DOTENV_FILE") {
                let _ = dotenvy::from_filename(path);
            } else {
                let candidate = format!(".env.{}", app_env);
                dotenvy::from_filename(&candidate)
                    .or_else(|_| dotenvy::dotenv())
                    .ok();
            }
        }

        Self::from_provider(|k| env::var(k).ok())
    }

    /// Builds the configuration from a custom variable source without
    /// touching dotenv files.
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        AppConfig {
            http: HttpConfig::from_provider(&provider),
            image: ImageConfig::from_provider(&provider),
            upload: UploadConfig::from_provider(&provider),
            storage: StorageConfig::from_provider(&provider),
        }
    }

    /// Normalization options: image policy under the upload byte ceiling.
    pub fn normalize_opts(&self) -> NormalizeOpts {
        self.image.normalize_opts(self.upload.max_file_size)
    }
}

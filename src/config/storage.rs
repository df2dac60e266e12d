//! # Storage Configuration
//!
//! Selects the object storage backend and carries its settings.
//!
//! # Environment Variables
//! | Variable | Description | Default |
//! |-----------|-------------|----------|
//! | `STORAGE_BACKEND` | `s3` or `local` | `s3` |
//! | `S3_BUCKET` | Bucket name | `image-uploads` |
//! | `S3_REGION` | AWS region | `us-east-1` |
//! | `S3_ENDPOINT` | Custom S3-compatible endpoint (MinIO, R2) | *none* |
//! | `S3_ACCESS_KEY` / `S3_SECRET_KEY` | Static credentials | *ambient AWS credentials* |
//! | `STORAGE_PUBLIC_BASE_URL` | Base of returned URLs | derived from backend |
//! | `LOCAL_STORAGE_ROOT` | Root directory for `local` | `./var/uploads` |
//!
//! # Example
//! ```rust
//! use imgup_web::config::storage::{StorageBackend, StorageConfig};
//!
//! let cfg = StorageConfig::from_provider(|_| None);
//! assert_eq!(cfg.backend, StorageBackend::S3);
//! assert_eq!(cfg.public_base_url(), "https://image-uploads.s3.amazonaws.com");
//! ```

use std::path::PathBuf;

/// URL path local objects are served under when no public base URL is set.
pub const LOCAL_MEDIA_PATH: &str = "/media";

/// Which [`ObjectStorage`](crate::web::upload::storage::ObjectStorage) to build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageBackend {
    S3,
    Local,
}

/// Object storage settings.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key: Option<String>,
    pub secret_key: Option<String>,
    /// Explicit base for returned URLs; see [`StorageConfig::public_base_url`].
    pub public_base_url: Option<String>,
    pub local_root: PathBuf,
}

impl StorageConfig {
    /// Builds a [`StorageConfig`] from a custom variable source.
    pub fn from_provider<F>(provider: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            provider(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let backend = match get("STORAGE_BACKEND").as_deref() {
            Some(v) if v.eq_ignore_ascii_case("local") => StorageBackend::Local,
            _ => StorageBackend::S3,
        };

        Self {
            backend,
            bucket: get("S3_BUCKET").unwrap_or_else(|| "image-uploads".into()),
            region: get("S3_REGION").unwrap_or_else(|| "us-east-1".into()),
            endpoint: get("S3_ENDPOINT"),
            access_key: get("S3_ACCESS_KEY"),
            secret_key: get("S3_SECRET_KEY"),
            public_base_url: get("STORAGE_PUBLIC_BASE_URL"),
            local_root: get("LOCAL_STORAGE_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./var/uploads")),
        }
    }

    /// Base URL that object keys are appended to.
    ///
    /// Falls back to the virtual-hosted AWS URL, the path-style URL of a
    /// custom endpoint, or [`LOCAL_MEDIA_PATH`] for local storage.
    pub fn public_base_url(&self) -> String {
        if let Some(base) = &self.public_base_url {
            return base.trim_end_matches('/').to_string();
        }
        match (self.backend, &self.endpoint) {
            (StorageBackend::Local, _) => LOCAL_MEDIA_PATH.to_string(),
            (StorageBackend::S3, Some(endpoint)) => {
                format!("{}/{}", endpoint.trim_end_matches('/'), self.bucket)
            }
            (StorageBackend::S3, None) => format!("https://{}.s3.amazonaws.com", self.bucket),
        }
    }
}

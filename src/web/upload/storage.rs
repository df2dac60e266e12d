//! # Object Storage Abstractions
//!
//! Provides the interface used to persist normalized images and hand back a
//! URL clients can fetch them from.
//!
//! This module defines:
//! - [`StoredObject`]: what was written and where it can be fetched.
//! - [`ObjectStorage`]: trait abstraction for storage backends (S3, local FS).
//!
//! Implementations in this crate are
//! [`S3Storage`](super::s3_storage::S3Storage) and
//! [`LocalFileStorage`](super::local_storage::LocalFileStorage); tests use
//! in-memory stubs.
//!
//! # Example
//! ```rust
//! use imgup_web::web::upload::storage::ObjectStorage;
//! use anyhow::Result;
//!
//! struct EchoStorage;
//!
//! #[async_trait::async_trait]
//! impl ObjectStorage for EchoStorage {
//!     async fn put(&self, key: &str, _bytes: &[u8], _content_type: &str) -> Result<String> {
//!         Ok(format!("https://cdn.example.com/{key}"))
//!     }
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// Metadata for an object written by an upload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    /// Storage key (e.g. `"uploads/<uuid>.jpg"`).
    pub key: String,
    /// Public URL of the object.
    pub url: String,
    /// MIME content type the object was stored with.
    pub content_type: String,
    /// Object size in bytes.
    pub bytes: u64,
}

impl StoredObject {
    pub fn new(
        key: impl Into<String>,
        url: impl Into<String>,
        content_type: impl Into<String>,
        bytes: u64,
    ) -> Self {
        Self {
            key: key.into(),
            url: url.into(),
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// A durable object store.
///
/// Credentials, retries and transport are the implementor's concern.
#[async_trait]
pub trait ObjectStorage: Send + Sync {
    /// Writes `bytes` under `key` with the given content type.
    ///
    /// # Returns
    /// The public URL of the stored object.
    ///
    /// # Errors
    /// Returns an [`anyhow::Error`] if the write fails.
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String>;
}

/// Joins a base URL and a key with exactly one `/`.
pub(crate) fn join_url(base: &str, key: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

//! # Local File Storage
//!
//! Provides a concrete implementation of the [`ObjectStorage`] trait that
//! saves objects directly to the local filesystem.
//!
//! This module ensures that:
//! - parent directories are automatically created,
//! - keys are sanitized (no leading `/`, no `..` traversal),
//! - all objects are stored under a configured root directory,
//! - returned URLs are built from a configured public base URL.
//!
//! Commonly used for local development, where the root directory is served
//! by a static file server.
//!
//! # Example
//! ```rust,no_run
//! use imgup_web::web::upload::local_storage::LocalFileStorage;
//! use imgup_web::web::upload::storage::ObjectStorage;
//!
//! # async fn run() -> anyhow::Result<()> {
//! let storage = LocalFileStorage::new("/tmp/uploads", "http://localhost:8080/uploads");
//! let url = storage.put("uploads/avatar.png", b"binary", "image/png").await?;
//! assert_eq!(url, "http://localhost:8080/uploads/uploads/avatar.png");
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;

use super::storage::{ObjectStorage, join_url};

/// Stores uploaded objects on the local filesystem.
#[derive(Clone, Debug)]
pub struct LocalFileStorage {
    /// Root directory where all objects are stored.
    root: PathBuf,
    /// URL prefix under which `root` is served.
    public_base_url: String,
}

impl LocalFileStorage {
    /// Creates a new [`LocalFileStorage`].
    ///
    /// # Example
    /// ```
    /// use imgup_web::web::upload::local_storage::LocalFileStorage;
    ///
    /// let storage = LocalFileStorage::new("/tmp/data", "http://localhost/files");
    /// assert_eq!(storage.root().to_str().unwrap(), "/tmp/data");
    /// ```
    pub fn new<P: Into<PathBuf>>(root: P, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    /// Writes an object under the root directory and returns its absolute path.
    ///
    /// # Behavior
    /// - Trims leading slashes from `key`
    /// - Replaces `..` with `_` to avoid directory traversal
    pub async fn save_file(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let full = self.root.join(sanitize_key(key));
        if let Some(dir) = full.parent() {
            fs::create_dir_all(dir)
                .await
                .with_context(|| format!("create dir {dir:?}"))?;
        }
        fs::write(&full, bytes)
            .await
            .with_context(|| format!("write {full:?}"))?;
        Ok(full)
    }

    /// Returns the configured root path.
    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl ObjectStorage for LocalFileStorage {
    async fn put(&self, key: &str, bytes: &[u8], _content_type: &str) -> Result<String> {
        self.save_file(key, bytes).await?;
        Ok(join_url(&self.public_base_url, &sanitize_key(key)))
    }
}

fn sanitize_key(key: &str) -> String {
    key.trim_start_matches('/').replace("..", "_")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_root() -> PathBuf {
        let mut p = std::env::temp_dir();
        let stamp = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("imgup-local-storage-test-{stamp}-{}", uuid::Uuid::new_v4()));
        p
    }

    #[tokio::test]
    async fn put_writes_bytes_and_returns_public_url() -> Result<()> {
        let root = unique_temp_root();
        let storage = LocalFileStorage::new(&root, "http://localhost:8080/media/");

        let url = storage
            .put("uploads/a.png", b"hello world", "image/png")
            .await?;
        assert_eq!(url, "http://localhost:8080/media/uploads/a.png");

        let saved = std::fs::read(root.join("uploads/a.png"))?;
        assert_eq!(saved, b"hello world");

        let _ = std::fs::remove_dir_all(&root);
        Ok(())
    }

    #[tokio::test]
    async fn save_creates_parent_directories() -> Result<()> {
        let root = unique_temp_root();
        let storage = LocalFileStorage::new(&root, "http://x");

        let abs = storage.save_file("deep/nested/dir/file.jpg", &[0u8; 3]).await?;

        assert!(abs.exists());
        assert!(root.join("deep/nested/dir").is_dir());

        let _ = std::fs::remove_dir_all(&root);
        Ok(())
    }

    #[tokio::test]
    async fn sanitize_blocks_parent_segments() -> Result<()> {
        let root = unique_temp_root();
        let storage = LocalFileStorage::new(&root, "http://x");

        let url = storage.put("../secret.png", b"x", "image/png").await?;

        let expected = root.join("_/secret.png");
        assert!(expected.exists());
        assert_eq!(url, "http://x/_/secret.png");

        let _ = std::fs::remove_dir_all(&root);
        Ok(())
    }

    #[tokio::test]
    async fn leading_slash_is_trimmed() -> Result<()> {
        let root = unique_temp_root();
        let storage = LocalFileStorage::new(&root, "http://x");

        let abs = storage.save_file("/top/level.png", b"y").await?;
        assert_eq!(abs, root.join("top/level.png"));

        let _ = std::fs::remove_dir_all(&root);
        Ok(())
    }

    #[test]
    fn root_returns_configured_path() {
        let root = unique_temp_root();
        let storage = LocalFileStorage::new(&root, "http://x");
        assert_eq!(storage.root(), root.as_path());
    }
}

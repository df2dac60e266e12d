//! # S3 Object Storage
//!
//! [`ObjectStorage`] backed by AWS S3 or any S3-compatible API
//! (MinIO, Cloudflare R2) through `rust-s3`.
//!
//! Credentials come from [`StorageConfig`] when both keys are set, otherwise
//! from the ambient AWS sources (environment, profile, instance metadata).

use anyhow::{Context, Result, bail};
use async_trait::async_trait;
use s3::{Bucket, Region, creds::Credentials};

use super::storage::{ObjectStorage, join_url};
use crate::config::storage::StorageConfig;

/// Writes objects to an S3 bucket.
pub struct S3Storage {
    bucket: Box<Bucket>,
    public_base_url: String,
}

impl S3Storage {
    pub fn new(bucket: Box<Bucket>, public_base_url: impl Into<String>) -> Self {
        Self {
            bucket,
            public_base_url: public_base_url.into(),
        }
    }

    /// Builds the bucket handle from configuration. No request is sent.
    pub fn from_config(cfg: &StorageConfig) -> Result<Self> {
        let region = match &cfg.endpoint {
            Some(endpoint) => Region::Custom {
                region: cfg.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => cfg
                .region
                .parse::<Region>()
                .with_context(|| format!("invalid S3 region {:?}", cfg.region))?,
        };

        let credentials = Credentials::new(
            cfg.access_key.as_deref(),
            cfg.secret_key.as_deref(),
            None,
            None,
            None,
        )
        .context("load S3 credentials")?;

        let mut bucket = Bucket::new(&cfg.bucket, region, credentials)
            .with_context(|| format!("open bucket {:?}", cfg.bucket))?;
        if cfg.endpoint.is_some() {
            bucket = bucket.with_path_style();
        }

        tracing::info!(
            bucket = %cfg.bucket,
            region = %cfg.region,
            endpoint = cfg.endpoint.as_deref().unwrap_or("aws"),
            "S3 client initialized"
        );
        Ok(Self::new(bucket, cfg.public_base_url()))
    }

    /// Public URL for `key`.
    pub fn public_url(&self, key: &str) -> String {
        join_url(&self.public_base_url, key)
    }
}

#[async_trait]
impl ObjectStorage for S3Storage {
    async fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String> {
        let resp = self
            .bucket
            .put_object_with_content_type(key, bytes, content_type)
            .await
            .with_context(|| format!("put s3://{}/{}", self.bucket.name(), key))?;

        let status = resp.status_code();
        if !(200..300).contains(&status) {
            bail!(
                "put s3://{}/{} returned status {}",
                self.bucket.name(),
                key,
                status
            );
        }
        Ok(self.public_url(key))
    }
}

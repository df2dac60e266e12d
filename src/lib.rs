//! # imgup_web
//!
//! HTTP service that accepts a single image upload, normalizes it and
//! stores it in object storage, answering with a public URL.
//!
//! This crate provides:
//! - Format whitelisting and image normalization (`image`)
//! - The upload flow, storage backends and HTTP endpoint (`web`)
//! - Environment-driven configuration (`config`)
//! - Typed errors mapped to HTTP responses (`error`)
//!
//! ## Example usage
//!
//! ```rust
//! use imgup_web::image::format::AllowedFormat;
//! use imgup_web::image::image_rs_processor::ImageRsProcessor;
//! use imgup_web::image::processor::NormalizeOpts;
//!
//! let format = AllowedFormat::from_content_type("image/png").unwrap();
//! let processor = ImageRsProcessor::new(NormalizeOpts::default());
//! assert!(processor.normalize(b"not a png", format).is_err());
//! ```
// ===============================
// Re-exports of external crates
// ===============================

pub use anyhow;
pub use axum;
pub use dotenvy;
pub use ::image as image_rs;
pub use serde;
pub use serde_json;
pub use tokio;
pub use tower;
pub use tower_http;
pub use tracing;
pub use uuid;

// ===============================
// Public modules
// ===============================
pub mod config;
pub mod error;
pub mod image;
pub mod web;

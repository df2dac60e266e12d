//! Image validation and normalization.

pub mod format;
pub mod image_rs_processor;
pub mod processor;

//! Storage key generation for uploaded images.

use std::path::Path;

use uuid::Uuid;

use crate::image::format::AllowedFormat;

/// Generates a collision-resistant object name such as
/// `"6f1c…-…-….jpg"`.
///
/// The uploaded filename's extension is kept (lowercased) when it is in
/// `allowed_extensions` and names `format`; otherwise the format's canonical
/// extension is used.
pub fn generate_image_id(
    filename: &str,
    format: AllowedFormat,
    allowed_extensions: &[String],
) -> String {
    let id = Uuid::new_v4();
    let ext = normalize_extension(filename, format, allowed_extensions);
    format!("{id}.{ext}")
}

/// Extension (without dot) an uploaded image is stored under.
pub fn normalize_extension(
    filename: &str,
    format: AllowedFormat,
    allowed_extensions: &[String],
) -> String {
    Path::new(filename.trim())
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .filter(|e| format.matches_extension(e))
        .filter(|e| allowed_extensions.iter().any(|a| a == e))
        .unwrap_or_else(|| format.extension().to_string())
}

/// Full storage key: `"{prefix}/{image_id}"`, or just the id when the
/// prefix is empty.
pub fn storage_key(prefix: &str, image_id: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        image_id.to_string()
    } else {
        format!("{prefix}/{image_id}")
    }
}

//! # Environment Variable Utilities
//!
//! Provides helpers for reading environment variables with common type conversions
//! and fallback defaults.
//!
//! The `*_from` readers take a provider function, so configuration can be
//! loaded from a map in tests.
//!
//! # Examples
//! ```rust,no_run
//! use imgup_web::config::env::{read_parsed_from, read_string_from};
//!
//! let width: u32 = read_parsed_from(|k| std::env::var(k).ok(), "IMAGE_MAX_WIDTH", 555);
//! let prefix = read_string_from(|k| std::env::var(k).ok(), "UPLOAD_KEY_PREFIX", "uploads");
//! ```

use std::str::FromStr;

/// Reads and parses a value using a custom provider function.
///
/// Surrounding whitespace and quotes are stripped. Missing or unparsable
/// values yield `default`.
///
/// # Example
/// ```rust
/// use imgup_web::config::env::read_parsed_from;
///
/// let v: u64 = read_parsed_from(|_| Some("'42'".into()), "LIMIT", 7);
/// assert_eq!(v, 42);
/// ```
pub fn read_parsed_from<T, F>(provider: F, name: &str, default: T) -> T
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .and_then(|v| clean(&v).parse::<T>().ok())
        .unwrap_or(default)
}

/// Reads a non-empty string using a custom provider function.
pub fn read_string_from<F>(provider: F, name: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    provider(name)
        .map(|v| clean(&v).to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Reads a comma-separated list; blank items are dropped.
pub fn read_list_from<F>(provider: F, name: &str, default: &[&str]) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    let items: Vec<String> = provider(name)
        .map(|v| {
            clean(&v)
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if items.is_empty() {
        default.iter().map(|s| s.to_string()).collect()
    } else {
        items
    }
}

fn clean(v: &str) -> &str {
    v.trim().trim_matches(|c| c == '"' || c == '\'')
}

pub mod fallback;
pub mod router;
pub mod upload;

pub mod image;
pub mod upload;

pub mod local_storage;
pub mod naming;
#[cfg(feature = "s3")]
pub mod s3_storage;
pub mod storage;
pub mod upload_handler;
pub mod uploader;

//! # kariyer-storage
//!
//! Uploads user documents to an S3-compatible bucket (MinIO in development)
//! under `{base_path}/{owner_id}/{file_name}`.

pub mod client;
pub mod document;
pub mod error;

pub use client::StorageClient;
pub use document::{Document, DocumentSource};
pub use error::StorageError;

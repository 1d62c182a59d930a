//! Object storage errors.

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::primitives::ByteStreamError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Couldn't open uploaded file {file_name}")]
    Open {
        file_name: String,
        #[source]
        source: ByteStreamError,
    },

    #[error("Failed to upload {key} to object storage")]
    Upload {
        key: String,
        #[source]
        source: SdkError<PutObjectError>,
    },

    #[error("Document {file_name:?} has no usable file name")]
    InvalidFileName { file_name: String },
}

pub type StorageResult<T> = Result<T, StorageError>;

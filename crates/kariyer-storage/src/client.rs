//! S3 / MinIO document storage client.
//!
//! Wraps `aws-sdk-s3`. Retries are switched off: a failed put is reported
//! to the caller exactly once.

use aws_sdk_s3::config::retry::RetryConfig;
use aws_sdk_s3::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::{
    config::{Builder as S3Builder, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use kariyer_common::config::StorageSettings;
use tracing::{debug, error};

use crate::document::{Document, DocumentSource};
use crate::error::{StorageError, StorageResult};

#[derive(Clone)]
pub struct StorageClient {
    inner: Client,
    bucket: String,
    base_path: String,
}

impl StorageClient {
    pub fn new(cfg: &StorageSettings) -> Self {
        let creds = Credentials::new(
            &cfg.access_key,
            &cfg.secret_key,
            None, // session token
            None, // expiry
            "kariyer-storage",
        );

        let s3_cfg = S3Builder::new()
            .endpoint_url(&cfg.endpoint)
            .credentials_provider(creds)
            .region(Region::new(cfg.region.clone()))
            // Force path-style URLs (required for MinIO)
            .force_path_style(true)
            .retry_config(RetryConfig::disabled())
            .build();

        Self {
            inner: Client::from_conf(s3_cfg),
            bucket: cfg.bucket.clone(),
            base_path: cfg.base_path.clone(),
        }
    }

    /// `{base_path}/{owner_id}/{file_name}` with stray slashes collapsed.
    pub fn object_key(&self, owner_id: &str, file_name: &str) -> String {
        [self.base_path.as_str(), owner_id, file_name]
            .iter()
            .map(|segment| segment.trim_matches('/'))
            .filter(|segment| !segment.is_empty())
            .collect::<Vec<_>>()
            .join("/")
    }

    /// Upload each document under the owner's prefix, in order.
    ///
    /// A document whose base name is empty (`""`, `"reports/"`) is rejected
    /// before anything is sent.
    /// Stops at the first failure and returns it. Documents uploaded before
    /// the failure stay in the bucket. Returns the keys written on success.
    pub async fn upload<I>(&self, owner_id: &str, documents: I) -> StorageResult<Vec<String>>
    where
        I: IntoIterator<Item = Document>,
    {
        let mut keys = Vec::new();
        for document in documents {
            if document.base_name().is_empty() {
                error!(
                    owner_id,
                    file_name = %document.file_name,
                    "Refusing document without a file name"
                );
                return Err(StorageError::InvalidFileName {
                    file_name: document.file_name,
                });
            }
            let key = self.object_key(owner_id, document.base_name());
            if let Err(e) = self.put_document(&key, document).await {
                error!(owner_id, key = %key, "Error uploading document: {e}");
                return Err(e);
            }
            keys.push(key);
        }
        Ok(keys)
    }

    async fn put_document(&self, key: &str, document: Document) -> StorageResult<()> {
        let content_type = document.content_type();
        let body = match document.source {
            DocumentSource::Bytes(bytes) => ByteStream::from(bytes),
            DocumentSource::Path(path) => ByteStream::from_path(&path).await.map_err(|source| {
                StorageError::Open {
                    file_name: document.file_name.clone(),
                    source,
                }
            })?,
        };

        self.inner
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .content_type(content_type)
            .body(body)
            .send()
            .await
            .map_err(|source| {
                self.log_put_failure(key, &source);
                StorageError::Upload {
                    key: key.to_owned(),
                    source,
                }
            })?;

        debug!(bucket = %self.bucket, key, "Uploaded document");
        Ok(())
    }

    fn log_put_failure(&self, key: &str, err: &SdkError<PutObjectError>) {
        let code = err.as_service_error().and_then(ProvideErrorMetadata::code);
        if code == Some("EntityTooLarge") {
            error!(
                bucket = %self.bucket,
                key,
                "Object too large for a single PUT (5 GB max); use a multipart upload instead"
            );
        } else {
            error!(bucket = %self.bucket, key, code, "Couldn't upload object: {err}");
        }
    }
}

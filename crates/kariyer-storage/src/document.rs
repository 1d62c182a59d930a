//! Files handed to [`StorageClient::upload`](crate::StorageClient::upload).

use std::path::PathBuf;

/// Where the bytes of a document come from.
#[derive(Debug, Clone)]
pub enum DocumentSource {
    /// Already in memory, e.g. a buffered multipart field.
    Bytes(Vec<u8>),
    /// On disk; streamed rather than read up front.
    Path(PathBuf),
}

#[derive(Debug, Clone)]
pub struct Document {
    /// Name as submitted by the user. Only the last path component is used
    /// in the object key.
    pub file_name: String,
    pub source: DocumentSource,
}

impl Document {
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            source: DocumentSource::Bytes(bytes.into()),
        }
    }

    pub fn from_path(file_name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_name: file_name.into(),
            source: DocumentSource::Path(path.into()),
        }
    }

    /// `file_name` without any client-supplied directories.
    pub fn base_name(&self) -> &str {
        self.file_name
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(&self.file_name)
    }

    pub fn content_type(&self) -> String {
        mime_guess::from_path(self.base_name())
            .first_or_octet_stream()
            .to_string()
    }
}

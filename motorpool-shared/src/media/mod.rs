//! Media upload
//!
//! Avatars are not stored by this service. They are pushed to a third-party
//! media host and the host's response is kept verbatim on the user record.
//!
//! # Uploaders
//!
//! - `cloudinary`: Cloudinary upload API over HTTPS
//! - `mock`: Deterministic in-process uploader for tests and demos
//!
//! # Example
//!
//! ```no_run
//! use motorpool_shared::media::{MediaUploader, UploadFile};
//! use motorpool_shared::media::mock::MockUploader;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let uploader = MockUploader::new();
//! let asset = uploader
//!     .upload(UploadFile::new("avatar.png", "image/png", vec![0x89, 0x50]))
//!     .await?;
//! println!("Uploaded to {}", asset.secure_url);
//! # Ok(())
//! # }
//! ```

pub mod cloudinary;
pub mod mock;

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use std::time::Duration;

/// Upload error types
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    /// The request never produced a response (DNS, TLS, connection reset...)
    #[error("Media upload request failed: {0}")]
    Request(String),

    /// The media host answered with a non-success status
    #[error("Media host rejected upload ({status}): {message}")]
    Rejected {
        status: u16,
        message: String,
    },

    /// The media host answered with a body we could not parse
    #[error("Media host returned an invalid response: {0}")]
    InvalidResponse(String),

    /// No response within the configured limit
    #[error("Media upload timed out after {0:?}")]
    Timeout(Duration),
}

/// Upload result type alias
pub type UploadResult<T> = Result<T, UploadError>;

/// A file received from a client, ready to be forwarded
#[derive(Debug, Clone)]
pub struct UploadFile {
    /// Original file name, if the client sent one
    pub file_name: Option<String>,

    /// Declared MIME type, if the client sent one
    pub content_type: Option<String>,

    /// File contents
    pub bytes: Bytes,
}

impl UploadFile {
    /// Creates an upload file with a name and content type
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Bytes>,
    ) -> Self {
        Self {
            file_name: Some(file_name.into()),
            content_type: Some(content_type.into()),
            bytes: bytes.into(),
        }
    }

    /// Size of the file in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the file has no content
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Asset description returned by the media host
///
/// `public_id` and `secure_url` are always present. Every other field the
/// host returns (dimensions, format, version, signature...) is kept in
/// `extra` so the record stores the response unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    /// Host-side identifier of the asset
    pub public_id: String,

    /// HTTPS URL of the asset
    pub secure_url: String,

    /// Remaining response fields
    #[serde(flatten)]
    pub extra: Map<String, JsonValue>,
}

/// Media uploader contract
///
/// Implementations push a file to a media host and return the host's
/// description of the stored asset.
#[async_trait]
pub trait MediaUploader: Send + Sync {
    /// Uploads a file
    ///
    /// # Errors
    ///
    /// Returns an `UploadError` if the host is unreachable, rejects the
    /// file, or answers with something that is not an asset description.
    async fn upload(&self, file: UploadFile) -> UploadResult<MediaAsset>;
}

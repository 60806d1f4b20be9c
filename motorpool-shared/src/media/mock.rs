//! Mock uploader for testing and demos
//!
//! Produces deterministic assets without any network traffic:
//!
//! ```text
//! public_id:  mock/{n}
//! secure_url: https://media.invalid/mock/{n}/{file_name}
//! ```
//!
//! It can be switched into a failing mode to exercise upstream error paths.

use super::{MediaAsset, MediaUploader, UploadError, UploadFile, UploadResult};
use async_trait::async_trait;
use serde_json::Map;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Deterministic in-process uploader
#[derive(Debug, Default)]
pub struct MockUploader {
    /// Number of successful uploads so far
    uploads: AtomicUsize,

    /// Whether uploads should fail
    failing: AtomicBool,
}

impl MockUploader {
    /// Creates a mock uploader that accepts every file
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock uploader that rejects every file
    pub fn failing() -> Self {
        let uploader = Self::default();
        uploader.set_failing(true);
        uploader
    }

    /// Switches failure mode on or off
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful uploads
    pub fn upload_count(&self) -> usize {
        self.uploads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MediaUploader for MockUploader {
    async fn upload(&self, file: UploadFile) -> UploadResult<MediaAsset> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(UploadError::Rejected {
                status: 503,
                message: "mock media host unavailable".to_string(),
            });
        }

        let n = self.uploads.fetch_add(1, Ordering::SeqCst) + 1;
        let file_name = file.file_name.as_deref().unwrap_or("upload");

        let mut extra = Map::new();
        extra.insert("bytes".to_string(), file.len().into());
        if let Some(content_type) = &file.content_type {
            extra.insert("content_type".to_string(), content_type.clone().into());
        }

        Ok(MediaAsset {
            public_id: format!("mock/{}", n),
            secure_url: format!("https://media.invalid/mock/{}/{}", n, file_name),
            extra,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_upload_is_deterministic() {
        let uploader = MockUploader::new();

        let first = uploader
            .upload(UploadFile::new("a.png", "image/png", vec![1u8, 2]))
            .await
            .unwrap();
        let second = uploader
            .upload(UploadFile::new("b.png", "image/png", vec![3u8]))
            .await
            .unwrap();

        assert_eq!(first.public_id, "mock/1");
        assert_eq!(first.secure_url, "https://media.invalid/mock/1/a.png");
        assert_eq!(first.extra["bytes"], 2);
        assert_eq!(second.public_id, "mock/2");
        assert_eq!(uploader.upload_count(), 2);
    }

    #[tokio::test]
    async fn test_failing_mock() {
        let uploader = MockUploader::failing();
        let result = uploader
            .upload(UploadFile::new("a.png", "image/png", vec![1u8]))
            .await;

        assert!(matches!(result, Err(UploadError::Rejected { status: 503, .. })));
        assert_eq!(uploader.upload_count(), 0);

        uploader.set_failing(false);
        assert!(uploader
            .upload(UploadFile::new("a.png", "image/png", vec![1u8]))
            .await
            .is_ok());
    }
}

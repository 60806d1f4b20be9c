//! Cloudinary uploader
//!
//! Uploads images through Cloudinary's signed upload API:
//!
//! ```text
//! POST {api_base}/v1_1/{cloud_name}/image/upload
//! Content-Type: multipart/form-data
//!
//! file, api_key, timestamp, [folder], signature, signature_algorithm=sha256
//! ```
//!
//! The signature is the hex SHA-256 of the sorted signed parameters
//! (`folder=...&timestamp=...`) followed by the API secret.

use super::{MediaAsset, MediaUploader, UploadError, UploadFile, UploadResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default Cloudinary API origin
pub const DEFAULT_API_BASE: &str = "https://api.cloudinary.com";

/// Cloudinary account configuration
#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    /// Cloud name (account identifier)
    pub cloud_name: String,

    /// API key
    pub api_key: String,

    /// API secret used to sign uploads
    pub api_secret: String,

    /// Optional folder assets are placed in
    pub folder: Option<String>,

    /// API origin, overridable for testing against a stub
    pub api_base: String,

    /// Per-request timeout
    pub timeout: Duration,
}

/// Uploads files to Cloudinary
#[derive(Debug, Clone)]
pub struct CloudinaryUploader {
    client: reqwest::Client,
    config: CloudinaryConfig,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl CloudinaryUploader {
    /// Creates a new uploader
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialisation failure).
    pub fn new(config: CloudinaryConfig) -> UploadResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| UploadError::Request(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Endpoint for image uploads
    pub fn upload_url(&self) -> String {
        format!(
            "{}/v1_1/{}/image/upload",
            self.config.api_base.trim_end_matches('/'),
            self.config.cloud_name
        )
    }

    /// Parameters that take part in the signature, sorted by name
    fn signed_params(&self, timestamp: i64) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(2);
        if let Some(folder) = &self.config.folder {
            params.push(("folder", folder.clone()));
        }
        params.push(("timestamp", timestamp.to_string()));
        params.sort_by(|a, b| a.0.cmp(b.0));
        params
    }

    /// Signs a sorted parameter list
    fn sign(&self, params: &[(&str, String)]) -> String {
        let to_sign = params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&");

        let mut hasher = Sha256::new();
        hasher.update(to_sign.as_bytes());
        hasher.update(self.config.api_secret.as_bytes());
        hex::encode(hasher.finalize())
    }

    fn map_request_error(&self, err: reqwest::Error) -> UploadError {
        if err.is_timeout() {
            UploadError::Timeout(self.config.timeout)
        } else {
            UploadError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl MediaUploader for CloudinaryUploader {
    async fn upload(&self, file: UploadFile) -> UploadResult<MediaAsset> {
        let size = file.len();
        let timestamp = chrono::Utc::now().timestamp();
        let params = self.signed_params(timestamp);
        let signature = self.sign(&params);

        let mut part = Part::bytes(file.bytes.to_vec())
            .file_name(file.file_name.unwrap_or_else(|| "upload".to_string()));
        if let Some(content_type) = file.content_type.as_deref() {
            part = part
                .mime_str(content_type)
                .map_err(|e| UploadError::Request(e.to_string()))?;
        }

        let mut form = Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature)
            .text("signature_algorithm", "sha256");
        for (name, value) in params {
            form = form.text(name, value);
        }

        debug!(url = %self.upload_url(), size, "Uploading file to Cloudinary");

        let response = self
            .client
            .post(self.upload_url())
            .multipart(form)
            .send()
            .await
            .map_err(|e| self.map_request_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            warn!(status = status.as_u16(), %message, "Cloudinary rejected upload");
            return Err(UploadError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        let asset = response
            .json::<MediaAsset>()
            .await
            .map_err(|e| UploadError::InvalidResponse(e.to_string()))?;

        info!(public_id = %asset.public_id, size, "Uploaded file to Cloudinary");
        Ok(asset)
    }
}

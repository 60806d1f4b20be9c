//! Common test utilities for integration tests
//!
//! Builds the full router over in-memory stores and the mock uploader, and
//! provides request helpers (JSON and hand-built multipart bodies).

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use motorpool_api::app::{build_router, AppState};
use motorpool_api::config::{ApiConfig, Config, DatabaseConfig, MediaConfig};
use motorpool_shared::media::cloudinary::{CloudinaryConfig, DEFAULT_API_BASE};
use motorpool_shared::media::mock::MockUploader;
use motorpool_shared::services::{UserService, VehicleService};
use motorpool_shared::store::memory::{MemoryUserStore, MemoryVehicleStore};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt;

pub const BOUNDARY: &str = "motorpool-test-boundary";

/// Test context containing the router and handles on its backing doubles
pub struct TestContext {
    pub app: Router,
    pub users: Arc<MemoryUserStore>,
    pub vehicles: Arc<MemoryVehicleStore>,
    pub uploader: Arc<MockUploader>,
}

/// Configuration that never touches the environment
pub fn test_config() -> Config {
    Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            cors_origins: vec!["*".to_string()],
            production: false,
            max_upload_bytes: 1024 * 1024,
        },
        database: DatabaseConfig {
            url: "postgresql://unused".to_string(),
            max_connections: 1,
            store_timeout: Duration::from_secs(5),
        },
        media: MediaConfig {
            cloudinary: CloudinaryConfig {
                cloud_name: "test".to_string(),
                api_key: "test".to_string(),
                api_secret: "test".to_string(),
                folder: None,
                api_base: DEFAULT_API_BASE.to_string(),
                timeout: Duration::from_secs(5),
            },
        },
    }
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_uploader(MockUploader::new())
    }

    pub fn with_uploader(uploader: MockUploader) -> Self {
        let config = test_config();
        let users = Arc::new(MemoryUserStore::new());
        let vehicles = Arc::new(MemoryVehicleStore::new());
        let uploader = Arc::new(uploader);

        let state = AppState::new(
            UserService::new(users.clone(), uploader.clone(), config.service_timeouts()),
            VehicleService::new(vehicles.clone(), config.service_timeouts()),
            config,
        );

        Self {
            app: build_router(state),
            users,
            vehicles,
            uploader,
        }
    }

    /// Sends a request and returns the status with the parsed JSON body
    ///
    /// An empty body parses as `Value::Null`.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                panic!("non-JSON body: {}", String::from_utf8_lossy(&bytes))
            })
        };

        (status, body)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::GET, uri)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(empty_request(Method::DELETE, uri)).await
    }

    /// Creates a vehicle through the API and returns it
    pub async fn create_vehicle(&self, body: Value) -> Value {
        let (status, body) = self
            .send(json_request(Method::POST, "/vehicles", &body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["vehicle"].clone()
    }

    /// Creates a user through the API and returns it, token included
    pub async fn create_user(&self, username: &str, email: &str) -> Value {
        let body = multipart_body(
            &[("username", username), ("email", email)],
            Some(("avatar.png", "image/png", b"\x89PNG fake image")),
        );
        let (status, body) = self
            .send(multipart_request(Method::POST, "/users", body))
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["user"].clone()
    }
}

pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: Method, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn multipart_request(method: Method, uri: &str, body: Vec<u8>) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Builds a multipart body with text fields and an optional `avatar` file
///
/// The file is given as `(file_name, content_type, bytes)`.
pub fn multipart_body(fields: &[(&str, &str)], avatar: Option<(&str, &str, &[u8])>) -> Vec<u8> {
    let mut body = Vec::new();

    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                BOUNDARY, name, value
            )
            .as_bytes(),
        );
    }

    if let Some((file_name, content_type, bytes)) = avatar {
        body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"avatar\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                BOUNDARY, file_name, content_type
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

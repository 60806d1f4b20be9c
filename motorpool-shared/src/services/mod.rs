//! Record access services
//!
//! Stateless services translating create/read/update/delete intents into
//! store (and, for users, media host) calls. Each service is built from
//! injected handles, so tests can hand it in-memory stores and a mock
//! uploader.
//!
//! # Example
//!
//! ```no_run
//! use motorpool_shared::services::{ServiceTimeouts, VehicleService};
//! use motorpool_shared::store::memory::MemoryVehicleStore;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let vehicles = VehicleService::new(Arc::new(MemoryVehicleStore::new()), ServiceTimeouts::default());
//! let all = vehicles.list_all().await?;
//! # Ok(())
//! # }
//! ```

pub mod user_service;
pub mod vehicle_service;

pub use user_service::{UserFields, UserService};
pub use vehicle_service::VehicleService;

use crate::media::UploadError;
use crate::sanitize::BrandError;
use crate::store::{StoreError, StoreResult};
use std::future::Future;
use std::time::Duration;

/// Default limit for a single store call
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default limit for a single media upload
pub const DEFAULT_UPLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Service error types
///
/// A closed set; the API maps each variant to one status code.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Identifier or brand lookup yielded nothing
    #[error("{0}")]
    NotFound(String),

    /// Brand input rejected before any store access
    #[error(transparent)]
    Validation(#[from] BrandError),

    /// Media host failure
    #[error(transparent)]
    Upstream(#[from] UploadError),

    /// Store failure, including malformed identifiers and timeouts
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ServiceError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Request-scoped time limits for outbound calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceTimeouts {
    /// Limit for each store call
    pub store: Duration,

    /// Limit for each media upload
    pub upload: Duration,
}

impl Default for ServiceTimeouts {
    fn default() -> Self {
        Self {
            store: DEFAULT_STORE_TIMEOUT,
            upload: DEFAULT_UPLOAD_TIMEOUT,
        }
    }
}

/// Awaits a store call, failing with `StoreError::Timeout` past `limit`
pub(crate) async fn within_store_timeout<T, F>(limit: Duration, call: F) -> StoreResult<T>
where
    F: Future<Output = StoreResult<T>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| StoreError::Timeout(limit))?
}

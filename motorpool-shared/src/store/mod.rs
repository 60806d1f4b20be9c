//! Record store ports
//!
//! Services talk to persistence through these traits so the backing store
//! can be swapped: PostgreSQL in production, in-memory in tests.
//!
//! # Adapters
//!
//! - `postgres`: [`PgUserStore`](postgres::PgUserStore) and
//!   [`PgVehicleStore`](postgres::PgVehicleStore) over a `PgPool`
//! - `memory`: [`MemoryUserStore`](memory::MemoryUserStore) and
//!   [`MemoryVehicleStore`](memory::MemoryVehicleStore)
//!
//! Lookups return `Ok(None)` for a missing record; only real store failures
//! are errors.

pub mod memory;
pub mod postgres;

use crate::models::{
    user::{NewUser, User, UserChanges, UserProfile},
    vehicle::{NewVehicle, Vehicle, VehicleChanges},
};
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// Store error types
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The database reported a failure
    #[error("Database error: {0}")]
    Database(String),

    /// The identifier is not a valid record ID
    #[error("Malformed identifier: {0}")]
    MalformedId(String),

    /// The store did not answer within the configured limit
    #[error("Store operation timed out after {0:?}")]
    Timeout(Duration),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Database(err.to_string())
    }
}

/// Store result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Parses a record identifier received from a client
///
/// # Errors
///
/// Returns `StoreError::MalformedId` if `id` is not a UUID.
///
/// # Example
///
/// ```
/// use motorpool_shared::store::parse_record_id;
///
/// assert!(parse_record_id("7b1c2f4e-8a4d-4d1e-9d55-3f1f6a0e2b11").is_ok());
/// assert!(parse_record_id("not-an-id").is_err());
/// ```
pub fn parse_record_id(id: &str) -> StoreResult<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| StoreError::MalformedId(id.to_string()))
}

/// Persistence for users
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user in a single write
    async fn insert(&self, data: NewUser) -> StoreResult<User>;

    /// Returns every user, token omitted
    async fn list(&self) -> StoreResult<Vec<UserProfile>>;

    /// Returns one user, token omitted
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserProfile>>;

    /// Applies `changes` and returns the updated user
    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<UserProfile>>;

    /// Removes a user and returns it
    async fn delete(&self, id: Uuid) -> StoreResult<Option<UserProfile>>;

    /// Checks that the store is reachable
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

/// Persistence for vehicles
#[async_trait]
pub trait VehicleStore: Send + Sync {
    /// Inserts a vehicle in a single write
    async fn insert(&self, data: NewVehicle) -> StoreResult<Vehicle>;

    /// Returns every vehicle
    async fn list(&self) -> StoreResult<Vec<Vehicle>>;

    /// Returns one vehicle
    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;

    /// Returns the first vehicle whose brand equals `brand` ignoring case
    async fn find_by_brand(&self, brand: &str) -> StoreResult<Option<Vehicle>>;

    /// Replaces kind, color and brand and returns the updated vehicle
    async fn update(&self, id: Uuid, changes: VehicleChanges) -> StoreResult<Option<Vehicle>>;

    /// Removes a vehicle and returns it
    async fn delete(&self, id: Uuid) -> StoreResult<Option<Vehicle>>;

    /// Checks that the store is reachable
    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_record_id() {
        let id = Uuid::new_v4();
        assert_eq!(parse_record_id(&id.to_string()).unwrap(), id);
        assert_eq!(parse_record_id(&format!(" {} ", id)).unwrap(), id);
    }

    #[test]
    fn test_parse_malformed_record_id() {
        let err = parse_record_id("507f1f77bcf86cd799439011").unwrap_err();
        assert!(matches!(err, StoreError::MalformedId(ref id) if id == "507f1f77bcf86cd799439011"));
        assert_eq!(
            err.to_string(),
            "Malformed identifier: 507f1f77bcf86cd799439011"
        );
    }

    #[test]
    fn test_row_not_found_is_database_error() {
        let err = StoreError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, StoreError::Database(_)));
    }
}

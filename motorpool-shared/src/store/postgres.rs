//! PostgreSQL store adapters
//!
//! Thin wrappers that route each port method to the model's query and turn
//! `sqlx::Error` into `StoreError`.

use super::{StoreResult, UserStore, VehicleStore};
use crate::db::pool::health_check;
use crate::models::{
    user::{NewUser, User, UserChanges, UserProfile},
    vehicle::{NewVehicle, Vehicle, VehicleChanges},
};
use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

/// User store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn insert(&self, data: NewUser) -> StoreResult<User> {
        Ok(User::create(&self.pool, data).await?)
    }

    async fn list(&self) -> StoreResult<Vec<UserProfile>> {
        Ok(UserProfile::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(UserProfile::find_by_id(&self.pool, id).await?)
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<UserProfile>> {
        Ok(UserProfile::update(&self.pool, id, changes).await?)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        Ok(UserProfile::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

/// Vehicle store backed by PostgreSQL
#[derive(Debug, Clone)]
pub struct PgVehicleStore {
    pool: PgPool,
}

impl PgVehicleStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VehicleStore for PgVehicleStore {
    async fn insert(&self, data: NewVehicle) -> StoreResult<Vehicle> {
        Ok(Vehicle::create(&self.pool, data).await?)
    }

    async fn list(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(Vehicle::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        Ok(Vehicle::find_by_id(&self.pool, id).await?)
    }

    async fn find_by_brand(&self, brand: &str) -> StoreResult<Option<Vehicle>> {
        Ok(Vehicle::find_by_brand(&self.pool, brand).await?)
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> StoreResult<Option<Vehicle>> {
        Ok(Vehicle::update(&self.pool, id, changes).await?)
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        Ok(Vehicle::delete(&self.pool, id).await?)
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(health_check(&self.pool).await?)
    }
}

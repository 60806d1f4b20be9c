//! In-memory store adapters
//!
//! Records live in insertion order behind a `tokio::sync::RwLock`. Used as
//! test doubles and for running the API without a database.

use super::{StoreResult, UserStore, VehicleStore};
use crate::models::{
    user::{NewUser, User, UserChanges, UserProfile},
    vehicle::{NewVehicle, Vehicle, VehicleChanges},
};
use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User store holding records in memory
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    users: RwLock<Vec<User>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users
    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    /// Whether no user is stored
    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }

    /// Returns the stored token of a user
    ///
    /// Lets tests check the token without going through a public read path.
    pub async fn token_of(&self, id: Uuid) -> Option<String> {
        self.users
            .read()
            .await
            .iter()
            .find(|u| u.id == id)
            .map(|u| u.token.clone())
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert(&self, data: NewUser) -> StoreResult<User> {
        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: data.username,
            email: data.email,
            avatar: data.avatar,
            token: data.token,
            created_at: now,
            updated_at: now,
        };

        self.users.write().await.push(user.clone());
        Ok(user)
    }

    async fn list(&self) -> StoreResult<Vec<UserProfile>> {
        let users = self.users.read().await;
        Ok(users.iter().cloned().map(UserProfile::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        let users = self.users.read().await;
        Ok(users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .map(UserProfile::from))
    }

    async fn update(&self, id: Uuid, changes: UserChanges) -> StoreResult<Option<UserProfile>> {
        let mut users = self.users.write().await;
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };

        user.username = changes.username;
        user.email = changes.email;
        if let Some(avatar) = changes.avatar {
            user.avatar = avatar;
        }
        user.updated_at = Utc::now();

        Ok(Some(UserProfile::from(user.clone())))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<UserProfile>> {
        let mut users = self.users.write().await;
        let removed = users
            .iter()
            .position(|u| u.id == id)
            .map(|idx| users.remove(idx));
        Ok(removed.map(UserProfile::from))
    }
}

/// Vehicle store holding records in memory
#[derive(Debug, Default)]
pub struct MemoryVehicleStore {
    vehicles: RwLock<Vec<Vehicle>>,
}

impl MemoryVehicleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored vehicles
    pub async fn len(&self) -> usize {
        self.vehicles.read().await.len()
    }

    /// Whether no vehicle is stored
    pub async fn is_empty(&self) -> bool {
        self.vehicles.read().await.is_empty()
    }
}

#[async_trait]
impl VehicleStore for MemoryVehicleStore {
    async fn insert(&self, data: NewVehicle) -> StoreResult<Vehicle> {
        let now = Utc::now();
        let vehicle = Vehicle {
            id: Uuid::new_v4(),
            kind: data.kind,
            color: data.color,
            brand: data.brand,
            owner: data.owner,
            created_at: now,
            updated_at: now,
        };

        self.vehicles.write().await.push(vehicle.clone());
        Ok(vehicle)
    }

    async fn list(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(self.vehicles.read().await.clone())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let vehicles = self.vehicles.read().await;
        Ok(vehicles.iter().find(|v| v.id == id).cloned())
    }

    async fn find_by_brand(&self, brand: &str) -> StoreResult<Option<Vehicle>> {
        let wanted = brand.to_lowercase();
        let vehicles = self.vehicles.read().await;
        Ok(vehicles
            .iter()
            .find(|v| v.brand.as_deref().map(str::to_lowercase).as_deref() == Some(wanted.as_str()))
            .cloned())
    }

    async fn update(&self, id: Uuid, changes: VehicleChanges) -> StoreResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        let Some(vehicle) = vehicles.iter_mut().find(|v| v.id == id) else {
            return Ok(None);
        };

        vehicle.kind = changes.kind;
        vehicle.color = changes.color;
        vehicle.brand = changes.brand;
        vehicle.updated_at = Utc::now();

        Ok(Some(vehicle.clone()))
    }

    async fn delete(&self, id: Uuid) -> StoreResult<Option<Vehicle>> {
        let mut vehicles = self.vehicles.write().await;
        let removed = vehicles
            .iter()
            .position(|v| v.id == id)
            .map(|idx| vehicles.remove(idx));
        Ok(removed)
    }
}

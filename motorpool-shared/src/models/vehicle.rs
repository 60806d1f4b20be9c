//! Vehicle model and database operations
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE vehicles (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     kind TEXT,
//!     color TEXT,
//!     brand TEXT,
//!     owner TEXT,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//!
//! CREATE INDEX idx_vehicles_brand_lower ON vehicles (lower(brand));
//! ```
//!
//! `owner` is a free reference to a user; nothing checks that it exists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

const VEHICLE_COLUMNS: &str = "id, kind, color, brand, owner, created_at, updated_at";

/// Vehicle model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Vehicle {
    /// Unique vehicle ID
    pub id: Uuid,

    /// Kind of vehicle (car, motorbike, van...)
    pub kind: Option<String>,

    /// Color
    pub color: Option<String>,

    /// Brand, matched case-insensitively by brand lookup
    pub brand: Option<String>,

    /// Owning user reference, immutable after creation
    pub owner: Option<String>,

    /// When the vehicle was created
    pub created_at: DateTime<Utc>,

    /// When the vehicle was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new vehicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewVehicle {
    pub kind: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
    pub owner: Option<String>,
}

/// Input for updating a vehicle
///
/// All three fields are written; `None` clears the column. There is no
/// `owner` here on purpose: ownership never changes after creation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VehicleChanges {
    pub kind: Option<String>,
    pub color: Option<String>,
    pub brand: Option<String>,
}

impl Vehicle {
    /// Creates a new vehicle in the database
    pub async fn create(pool: &PgPool, data: NewVehicle) -> Result<Self, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            INSERT INTO vehicles (kind, color, brand, owner)
            VALUES ($1, $2, $3, $4)
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(data.kind)
        .bind(data.color)
        .bind(data.brand)
        .bind(data.owner)
        .fetch_one(pool)
        .await?;

        Ok(vehicle)
    }

    /// Lists every vehicle, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let vehicles = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles ORDER BY created_at ASC",
            VEHICLE_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(vehicles)
    }

    /// Finds a vehicle by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "SELECT {} FROM vehicles WHERE id = $1",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(vehicle)
    }

    /// Finds the oldest vehicle whose brand equals `brand`, ignoring case
    ///
    /// The comparison is an equality on `lower(brand)`, so it is anchored at
    /// both ends and `%`/`_` carry no wildcard meaning.
    pub async fn find_by_brand(pool: &PgPool, brand: &str) -> Result<Option<Self>, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            SELECT {}
            FROM vehicles
            WHERE lower(brand) = lower($1)
            ORDER BY created_at ASC
            LIMIT 1
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(brand)
        .fetch_optional(pool)
        .await?;

        Ok(vehicle)
    }

    /// Replaces kind, color and brand
    ///
    /// # Returns
    ///
    /// The updated vehicle if found, None otherwise
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: VehicleChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            r#"
            UPDATE vehicles
            SET kind = $2, color = $3, brand = $4, updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .bind(data.kind)
        .bind(data.color)
        .bind(data.brand)
        .fetch_optional(pool)
        .await?;

        Ok(vehicle)
    }

    /// Deletes a vehicle by ID
    ///
    /// # Returns
    ///
    /// The removed vehicle, None if it didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let vehicle = sqlx::query_as::<_, Vehicle>(&format!(
            "DELETE FROM vehicles WHERE id = $1 RETURNING {}",
            VEHICLE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(vehicle)
    }
}

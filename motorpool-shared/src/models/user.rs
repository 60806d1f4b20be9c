//! User model and database operations
//!
//! Users carry an avatar hosted by the media service and an opaque token
//! generated at creation time. The token is only ever returned once, by
//! [`User::create`]; every other read goes through [`UserProfile`], which
//! has no token column.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE users (
//!     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
//!     username TEXT,
//!     email TEXT,
//!     avatar JSONB NOT NULL,
//!     token VARCHAR(64) NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
//!     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use motorpool_shared::models::user::{NewUser, User, UserProfile};
//! use motorpool_shared::media::MediaAsset;
//! use sqlx::PgPool;
//!
//! # async fn example(pool: PgPool, avatar: MediaAsset) -> Result<(), sqlx::Error> {
//! let user = User::create(
//!     &pool,
//!     NewUser {
//!         username: Some("jdoe".to_string()),
//!         email: Some("jdoe@example.com".to_string()),
//!         avatar,
//!         token: "t".repeat(64),
//!     },
//! )
//! .await?;
//!
//! let profile = UserProfile::find_by_id(&pool, user.id).await?;
//! # Ok(())
//! # }
//! ```

use crate::media::MediaAsset;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

/// Columns selected for a profile (everything except the token)
const PROFILE_COLUMNS: &str = "id, username, email, avatar, created_at, updated_at";

/// Full user record, including the token
///
/// Only produced by creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    pub username: Option<String>,

    /// Email address (no format or uniqueness constraint)
    pub email: Option<String>,

    /// Media host response for the uploaded avatar
    #[sqlx(json)]
    pub avatar: MediaAsset,

    /// Opaque secret issued at creation
    pub token: String,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

/// User record without the token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserProfile {
    /// Unique user ID
    pub id: Uuid,

    /// Display name
    pub username: Option<String>,

    /// Email address
    pub email: Option<String>,

    /// Media host response for the uploaded avatar
    #[sqlx(json)]
    pub avatar: MediaAsset,

    /// When the user was created
    pub created_at: DateTime<Utc>,

    /// When the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            avatar: user.avatar,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Input for creating a new user
///
/// Written in a single insert.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: MediaAsset,
    pub token: String,
}

/// Input for updating a user
///
/// `username` and `email` are always written, so `None` clears them.
/// `avatar` is only written when present.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub username: Option<String>,
    pub email: Option<String>,
    pub avatar: Option<MediaAsset>,
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Returns
    ///
    /// The newly created user, token included, with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails
    pub async fn create(pool: &PgPool, data: NewUser) -> Result<Self, sqlx::Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, avatar, token)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, email, avatar, token, created_at, updated_at
            "#,
        )
        .bind(data.username)
        .bind(data.email)
        .bind(Json(data.avatar))
        .bind(data.token)
        .fetch_one(pool)
        .await?;

        Ok(user)
    }
}

impl UserProfile {
    /// Lists every user, oldest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Self>, sqlx::Error> {
        let users = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {} FROM users ORDER BY created_at ASC",
            PROFILE_COLUMNS
        ))
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Updates an existing user
    ///
    /// Username and email are replaced unconditionally; the avatar is kept
    /// when `data.avatar` is None. `updated_at` is set to the current time.
    ///
    /// # Returns
    ///
    /// The updated user if found, None if the user doesn't exist
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UserChanges,
    ) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            r#"
            UPDATE users
            SET username = $2,
                email = $3,
                avatar = COALESCE($4, avatar),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            PROFILE_COLUMNS
        ))
        .bind(id)
        .bind(data.username)
        .bind(data.email)
        .bind(data.avatar.map(Json))
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Deletes a user by ID
    ///
    /// # Returns
    ///
    /// The removed user, None if the user didn't exist
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let user = sqlx::query_as::<_, UserProfile>(&format!(
            "DELETE FROM users WHERE id = $1 RETURNING {}",
            PROFILE_COLUMNS
        ))
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }
}

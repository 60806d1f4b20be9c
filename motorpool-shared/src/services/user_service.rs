//! User record access
//!
//! # Create flow
//!
//! ```text
//! create(fields, avatar)
//!   ├─> upload avatar to media host   (failure: nothing written)
//!   ├─> generate 64-char token
//!   └─> insert full record in one write
//! ```
//!
//! Upload and insert are not transactional. When the insert fails after a
//! successful upload the asset stays on the media host; the service logs its
//! `public_id` so it can be cleaned up by hand.

use super::{within_store_timeout, ServiceError, ServiceResult, ServiceTimeouts};
use crate::media::{MediaAsset, MediaUploader, UploadError, UploadFile};
use crate::models::user::{NewUser, User, UserChanges, UserProfile};
use crate::store::{parse_record_id, UserStore};
use crate::token::generate_user_token;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

const NOT_FOUND: &str = "User not found";

/// Caller-supplied user fields
///
/// Used for both create and update. On update both values are written as
/// given, so an omitted field is cleared.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserFields {
    pub username: Option<String>,
    pub email: Option<String>,
}

/// User service
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    uploader: Arc<dyn MediaUploader>,
    timeouts: ServiceTimeouts,
}

impl UserService {
    pub fn new(
        store: Arc<dyn UserStore>,
        uploader: Arc<dyn MediaUploader>,
        timeouts: ServiceTimeouts,
    ) -> Self {
        Self {
            store,
            uploader,
            timeouts,
        }
    }

    /// Uploads an avatar within the upload time limit
    async fn upload_avatar(&self, file: UploadFile) -> ServiceResult<MediaAsset> {
        let limit = self.timeouts.upload;
        let asset = tokio::time::timeout(limit, self.uploader.upload(file))
            .await
            .map_err(|_| UploadError::Timeout(limit))??;

        debug!(public_id = %asset.public_id, "Avatar uploaded");
        Ok(asset)
    }

    /// Creates a user
    ///
    /// # Returns
    ///
    /// The created user, token included. This is the only call that ever
    /// returns the token.
    ///
    /// # Errors
    ///
    /// - `Upstream` if the avatar upload fails (the user is not persisted)
    /// - `Store` if the insert fails
    pub async fn create(&self, fields: UserFields, avatar: UploadFile) -> ServiceResult<User> {
        let avatar = self.upload_avatar(avatar).await?;
        let public_id = avatar.public_id.clone();

        let data = NewUser {
            username: fields.username,
            email: fields.email,
            avatar,
            token: generate_user_token(),
        };

        let user = within_store_timeout(self.timeouts.store, self.store.insert(data))
            .await
            .map_err(|e| {
                warn!(
                    %public_id,
                    error = %e,
                    "User insert failed after avatar upload; asset left orphaned on media host"
                );
                e
            })?;

        info!(user_id = %user.id, "User created");
        Ok(user)
    }

    /// Lists every user, tokens omitted
    pub async fn list_all(&self) -> ServiceResult<Vec<UserProfile>> {
        Ok(within_store_timeout(self.timeouts.store, self.store.list()).await?)
    }

    /// Fetches one user, token omitted
    pub async fn get_by_id(&self, id: &str) -> ServiceResult<UserProfile> {
        let id = parse_record_id(id)?;
        within_store_timeout(self.timeouts.store, self.store.find_by_id(id))
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))
    }

    /// Updates a user
    ///
    /// Username and email are always replaced. The avatar is replaced only
    /// when a new file is supplied; it is uploaded before the store write.
    pub async fn update(
        &self,
        id: &str,
        fields: UserFields,
        avatar: Option<UploadFile>,
    ) -> ServiceResult<UserProfile> {
        let id = parse_record_id(id)?;

        let avatar = match avatar {
            Some(file) => Some(self.upload_avatar(file).await?),
            None => None,
        };

        let changes = UserChanges {
            username: fields.username,
            email: fields.email,
            avatar,
        };

        let user = within_store_timeout(self.timeouts.store, self.store.update(id, changes))
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))?;

        info!(user_id = %user.id, "User updated");
        Ok(user)
    }

    /// Deletes a user and returns it
    pub async fn delete_by_id(&self, id: &str) -> ServiceResult<UserProfile> {
        let id = parse_record_id(id)?;
        let user = within_store_timeout(self.timeouts.store, self.store.delete(id))
            .await?
            .ok_or_else(|| ServiceError::not_found(NOT_FOUND))?;

        info!(user_id = %user.id, "User deleted");
        Ok(user)
    }

    /// Pings the store
    pub async fn health_check(&self) -> ServiceResult<()> {
        Ok(within_store_timeout(self.timeouts.store, self.store.ping()).await?)
    }
}

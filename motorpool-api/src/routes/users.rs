//! User endpoints
//!
//! Bodies are `multipart/form-data` with text fields `username` and `email`
//! and a file field `avatar`.
//!
//! ```text
//! POST   /users        -> 201 {"message": "User created", "user": {..., "token": "..."}}
//! GET    /users        -> 200 [UserProfile...]
//! GET    /users/:id    -> 200 UserProfile
//! PUT    /users/:id    -> 200 {"message": "User updated"}
//! DELETE /users/:id    -> 200 {"message": "User deleted"}
//! ```
//!
//! The token only appears in the creation response.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    routes::MessageResponse,
};
use axum::{
    extract::{multipart::MultipartRejection, rejection::PathRejection, Multipart, Path, State},
    http::StatusCode,
    Json,
};
use motorpool_shared::media::UploadFile;
use motorpool_shared::models::user::{User, UserProfile};
use motorpool_shared::services::UserFields;
use serde::{Deserialize, Serialize};

/// Creation response, the only place the token is returned
#[derive(Debug, Serialize, Deserialize)]
pub struct UserCreatedResponse {
    pub message: String,
    pub user: User,
}

/// Parsed multipart user form
#[derive(Debug, Default)]
struct UserForm {
    fields: UserFields,
    avatar: Option<UploadFile>,
}

/// Reads the user form
///
/// Unknown fields are skipped. An `avatar` part with no content counts as
/// absent.
async fn read_user_form(mut multipart: Multipart) -> ApiResult<UserForm> {
    let mut form = UserForm::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("username") => form.fields.username = Some(field.text().await?),
            Some("email") => form.fields.email = Some(field.text().await?),
            Some("avatar") => {
                let file_name = field.file_name().map(str::to_string);
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await?;

                if !bytes.is_empty() {
                    form.avatar = Some(UploadFile {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Creates a user
pub async fn create_user(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<(StatusCode, Json<UserCreatedResponse>)> {
    let form = read_user_form(multipart?).await?;
    let avatar = form
        .avatar
        .ok_or_else(|| ApiError::BadRequest("Avatar file is required".to_string()))?;

    let user = state.users.create(form.fields, avatar).await?;

    Ok((
        StatusCode::CREATED,
        Json(UserCreatedResponse {
            message: "User created".to_string(),
            user,
        }),
    ))
}

/// Lists all users
pub async fn list_users(State(state): State<AppState>) -> ApiResult<Json<Vec<UserProfile>>> {
    Ok(Json(state.users.list_all().await?))
}

/// Gets a user by ID
pub async fn get_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<UserProfile>> {
    let Path(id) = id?;
    Ok(Json(state.users.get_by_id(&id).await?))
}

/// Updates a user, replacing the avatar only when a new file is sent
pub async fn update_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let form = read_user_form(multipart?).await?;
    state.users.update(&id, form.fields, form.avatar).await?;

    Ok(Json(MessageResponse::new("User updated")))
}

/// Deletes a user
pub async fn delete_user(
    State(state): State<AppState>,
    id: Result<Path<String>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    state.users.delete_by_id(&id).await?;
    Ok(Json(MessageResponse::new("User deleted")))
}

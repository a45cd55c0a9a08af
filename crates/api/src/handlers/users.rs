//! Handlers for the `/users` resource.

use axum::extract::{Path, State};
use axum::Json;
use bagline_core::types::RecordId;
use bagline_db::models::user::UserResponse;
use bagline_db::repositories::UserRepo;

use crate::error::AppResult;
use crate::response::{no_store_json, NoStoreJson, SuccessResponse};
use crate::state::AppState;

/// GET /api/users
///
/// Newest first; password hashes are never included.
pub async fn list(State(state): State<AppState>) -> AppResult<NoStoreJson<Vec<UserResponse>>> {
    let users = UserRepo::list(state.store()).await?;
    Ok(no_store_json(users.into_iter().map(Into::into).collect()))
}

/// DELETE /api/users/{id}
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
) -> AppResult<Json<SuccessResponse>> {
    let deleted = UserRepo::delete(state.store(), id).await?;
    tracing::info!(user_id = %id, deleted, "User delete requested");
    Ok(Json(SuccessResponse::ok()))
}

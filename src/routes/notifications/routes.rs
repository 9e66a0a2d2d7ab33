use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::queries;
use crate::error::{ApiError, ApiResult};
use crate::routes::middleware_auth::JwtUser;
use crate::state::AppState;

/// List the caller's notifications, newest first
pub async fn list(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
) -> ApiResult<impl IntoResponse> {
    let notifications = queries::list_notifications(&state.db, user_id).await?;

    Ok(Json(notifications))
}

/// Mark one owned notification as read
pub async fn mark_read(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let notification = queries::mark_read(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Notification"))?;

    Ok(Json(notification))
}

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::PgPool;
use uuid::Uuid;

use super::{
    queries, validate_category, validate_description, validate_name, validate_priority,
    CreateTaskRequest, Task, TaskListQuery, TaskStatsResponse, UpdateStatusRequest,
    UpdateTaskRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::routes::middleware_auth::JwtUser;
use crate::routes::notifications;
use crate::state::AppState;
use crate::stats::completion_rate;

/// Best-effort: the task write has already committed, so a failure here is
/// logged and swallowed rather than failing the request.
async fn notify_assignee(db: &PgPool, assignee: Uuid, task: &Task) {
    let message = format!("You have been assigned a new task: {}", task.name);

    if let Err(e) =
        notifications::queries::create_notification(db, assignee, &message, Some(task.id)).await
    {
        tracing::warn!("failed to create assignment notification: {e}");
    }
}

fn validate_create(body: &CreateTaskRequest) -> Result<(), String> {
    validate_name(&body.name)?;
    if let Some(priority) = body.priority {
        validate_priority(priority)?;
    }
    if let Some(ref description) = body.description {
        validate_description(description)?;
    }
    if let Some(ref category) = body.category {
        validate_category(category)?;
    }

    Ok(())
}

fn validate_update(body: &UpdateTaskRequest) -> Result<(), String> {
    if let Some(ref name) = body.name {
        validate_name(name)?;
    }
    if let Some(priority) = body.priority {
        validate_priority(priority)?;
    }
    if let Some(ref description) = body.description {
        validate_description(description)?;
    }
    if let Some(ref category) = body.category {
        validate_category(category)?;
    }

    Ok(())
}

// HANDLERS

/// Create a new task; assigning someone notifies them
pub async fn create(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Json(body): Json<CreateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_create(&body).map_err(ApiError::Validation)?;

    let task = queries::create_task(&state.db, user_id, body).await?;

    if let Some(assignee) = task.assignee {
        notify_assignee(&state.db, assignee, &task).await;
    }

    Ok((StatusCode::CREATED, Json(task)))
}

/// List the caller's tasks, optionally filtered
pub async fn list(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Query(filter): Query<TaskListQuery>,
) -> ApiResult<impl IntoResponse> {
    let tasks = queries::list_tasks(&state.db, user_id, &filter).await?;

    Ok(Json(tasks))
}

/// Get a single owned task
pub async fn get(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let task = queries::get_task(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Task"))?;

    Ok(Json(task))
}

/// Update an owned task; handing it to a different assignee notifies them
pub async fn update(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateTaskRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_update(&body).map_err(ApiError::Validation)?;

    // Read the stored assignee first so a reassignment is detectable after
    // the (atomic, owner-scoped) update lands.
    let previous = queries::get_task(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Task"))?;

    let task = queries::update_task(&state.db, user_id, id, body)
        .await?
        .ok_or(ApiError::NotFound("Task"))?;

    if let Some(assignee) = task.assignee {
        if previous.assignee != Some(assignee) {
            notify_assignee(&state.db, assignee, &task).await;
        }
    }

    Ok(Json(task))
}

/// Update only the status of an owned task
pub async fn update_status(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateStatusRequest>,
) -> ApiResult<impl IntoResponse> {
    let task = queries::update_status(&state.db, user_id, id, body.status)
        .await?
        .ok_or(ApiError::NotFound("Task"))?;

    Ok(Json(task))
}

/// Delete an owned task. Notifications that point at it are left in place.
pub async fn delete(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = queries::delete_task(&state.db, user_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Task"));
    }

    Ok(Json(
        serde_json::json!({ "message": "Task deleted successfully" }),
    ))
}

/// Completion counts and rate for the caller's tasks
pub async fn stats(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
) -> ApiResult<impl IntoResponse> {
    let counts = queries::status_counts(&state.db, user_id).await?;

    Ok(Json(TaskStatsResponse {
        total: counts.total,
        completed: counts.completed,
        pending: counts.pending,
        in_progress: counts.in_progress,
        completion_rate: completion_rate(counts.completed, counts.total),
    }))
}

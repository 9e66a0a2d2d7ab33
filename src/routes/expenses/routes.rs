use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use super::{
    queries, validate_amount, validate_description, validate_name, CreateExpenseRequest,
    ExpenseCategory, ExpenseListQuery, ExpenseStatsQuery, UpdateExpenseRequest,
};
use crate::error::{ApiError, ApiResult};
use crate::routes::middleware_auth::JwtUser;
use crate::state::AppState;
use crate::stats::summarize_expenses;

// HANDLERS

/// Create a new expense for the caller
pub async fn create(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Json(body): Json<CreateExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    validate_name(&body.name).map_err(ApiError::Validation)?;
    validate_amount(body.amount).map_err(ApiError::Validation)?;
    if let Some(ref description) = body.description {
        validate_description(description).map_err(ApiError::Validation)?;
    }

    let expense = queries::create_expense(&state.db, user_id, body).await?;

    Ok((StatusCode::CREATED, Json(expense)))
}

/// List the caller's expenses, optionally filtered by category and an
/// inclusive date range
pub async fn list(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Query(filter): Query<ExpenseListQuery>,
) -> ApiResult<impl IntoResponse> {
    let expenses = queries::list_expenses(&state.db, user_id, &filter).await?;

    Ok(Json(expenses))
}

/// Get a single owned expense
pub async fn get(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let expense = queries::get_expense(&state.db, user_id, id)
        .await?
        .ok_or(ApiError::NotFound("Expense"))?;

    Ok(Json(expense))
}

/// Update an owned expense
pub async fn update(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    if let Some(ref name) = body.name {
        validate_name(name).map_err(ApiError::Validation)?;
    }
    if let Some(amount) = body.amount {
        validate_amount(amount).map_err(ApiError::Validation)?;
    }
    if let Some(ref description) = body.description {
        validate_description(description).map_err(ApiError::Validation)?;
    }

    let expense = queries::update_expense(&state.db, user_id, id, body)
        .await?
        .ok_or(ApiError::NotFound("Expense"))?;

    Ok(Json(expense))
}

/// Delete an owned expense
pub async fn delete(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Path(id): Path<Uuid>,
) -> ApiResult<impl IntoResponse> {
    let deleted = queries::delete_expense(&state.db, user_id, id).await?;

    if !deleted {
        return Err(ApiError::NotFound("Expense"));
    }

    Ok(Json(
        serde_json::json!({ "message": "Expense deleted successfully" }),
    ))
}

/// Summary statistics over the caller's expenses in an optional inclusive
/// date range
pub async fn stats(
    State(state): State<AppState>,
    JwtUser(user_id): JwtUser,
    Query(range): Query<ExpenseStatsQuery>,
) -> ApiResult<impl IntoResponse> {
    if let (Some(start), Some(end)) = (range.start_date, range.end_date) {
        if start > end {
            return Err(ApiError::InvalidDateRange);
        }
    }

    let records = queries::stat_rows(&state.db, user_id, range.start_date, range.end_date).await?;
    let summary = summarize_expenses(&records);

    Ok(Json(summary))
}

/// The fixed category list clients build pickers from
pub async fn categories() -> impl IntoResponse {
    Json(ExpenseCategory::ALL)
}

use chrono::{NaiveDate, Utc};
use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::{CreateExpenseRequest, Expense, ExpenseListQuery, UpdateExpenseRequest};
use crate::stats::ExpenseRecord;

pub async fn create_expense(
    pool: &PgPool,
    user_id: Uuid,
    body: CreateExpenseRequest,
) -> Result<Expense> {
    let date = body.date.unwrap_or_else(|| Utc::now().date_naive());

    let rec = sqlx::query_as::<_, Expense>(
        r#"
        INSERT INTO expenses (id, user_id, name, amount, description, date, category)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(body.name.trim())
    .bind(body.amount)
    .bind(body.description)
    .bind(date)
    .bind(body.category)
    .fetch_one(pool)
    .await?;

    Ok(rec)
}

pub async fn list_expenses(
    pool: &PgPool,
    user_id: Uuid,
    filter: &ExpenseListQuery,
) -> Result<Vec<Expense>> {
    let mut query = String::from("SELECT * FROM expenses WHERE user_id = $1");
    let mut bind_count = 2;

    if filter.category.is_some() {
        query.push_str(&format!(" AND category = ${}", bind_count));
        bind_count += 1;
    }
    if filter.start_date.is_some() {
        query.push_str(&format!(" AND date >= ${}", bind_count));
        bind_count += 1;
    }
    if filter.end_date.is_some() {
        query.push_str(&format!(" AND date <= ${}", bind_count));
    }

    query.push_str(" ORDER BY date DESC, created_at DESC");

    let mut query_builder = sqlx::query_as::<_, Expense>(&query).bind(user_id);

    if let Some(category) = filter.category {
        query_builder = query_builder.bind(category);
    }
    if let Some(start) = filter.start_date {
        query_builder = query_builder.bind(start);
    }
    if let Some(end) = filter.end_date {
        query_builder = query_builder.bind(end);
    }

    query_builder.fetch_all(pool).await
}

pub async fn get_expense(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Expense>> {
    sqlx::query_as::<_, Expense>(
        r#"
        SELECT * FROM expenses
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

/// Owner check and mutation are one statement; a foreign id comes back as
/// `None`, indistinguishable from a missing row.
pub async fn update_expense(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    body: UpdateExpenseRequest,
) -> Result<Option<Expense>> {
    let mut query = String::from("UPDATE expenses SET updated_at = NOW()");
    let mut bind_count = 1;

    if body.name.is_some() {
        query.push_str(&format!(", name = ${}", bind_count));
        bind_count += 1;
    }
    if body.amount.is_some() {
        query.push_str(&format!(", amount = ${}", bind_count));
        bind_count += 1;
    }
    if body.description.is_some() {
        query.push_str(&format!(", description = ${}", bind_count));
        bind_count += 1;
    }
    if body.date.is_some() {
        query.push_str(&format!(", date = ${}", bind_count));
        bind_count += 1;
    }
    if body.category.is_some() {
        query.push_str(&format!(", category = ${}", bind_count));
        bind_count += 1;
    }

    query.push_str(&format!(
        " WHERE id = ${} AND user_id = ${} RETURNING *",
        bind_count,
        bind_count + 1
    ));

    let mut query_builder = sqlx::query_as::<_, Expense>(&query);

    if let Some(name) = body.name {
        query_builder = query_builder.bind(name.trim().to_string());
    }
    if let Some(amount) = body.amount {
        query_builder = query_builder.bind(amount);
    }
    if let Some(description) = body.description {
        query_builder = query_builder.bind(description);
    }
    if let Some(date) = body.date {
        query_builder = query_builder.bind(date);
    }
    if let Some(category) = body.category {
        query_builder = query_builder.bind(category);
    }

    query_builder
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
}

pub async fn delete_expense(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM expenses
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// Slim projection feeding the summary fold. Bounds are inclusive on both
/// ends, day granularity.
pub async fn stat_rows(
    pool: &PgPool,
    user_id: Uuid,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<Vec<ExpenseRecord>> {
    sqlx::query_as::<_, ExpenseRecord>(
        r#"
        SELECT amount, category, date FROM expenses
        WHERE user_id = $1
          AND ($2::date IS NULL OR date >= $2)
          AND ($3::date IS NULL OR date <= $3)
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(pool)
    .await
}

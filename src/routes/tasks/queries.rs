use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::{CreateTaskRequest, Task, TaskListQuery, TaskStatus, UpdateTaskRequest};

pub async fn create_task(pool: &PgPool, user_id: Uuid, body: CreateTaskRequest) -> Result<Task> {
    let rec = sqlx::query_as::<_, Task>(
        r#"
        INSERT INTO tasks (id, user_id, name, description, priority, deadline, status, assignee, category)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(body.name.trim())
    .bind(body.description)
    .bind(body.priority.unwrap_or(3))
    .bind(body.deadline)
    .bind(body.status)
    .bind(body.assignee)
    .bind(body.category)
    .fetch_one(pool)
    .await?;

    Ok(rec)
}

pub async fn list_tasks(pool: &PgPool, user_id: Uuid, filter: &TaskListQuery) -> Result<Vec<Task>> {
    let mut query = String::from("SELECT * FROM tasks WHERE user_id = $1");
    let mut bind_count = 2;

    if filter.status.is_some() {
        query.push_str(&format!(" AND status = ${}", bind_count));
        bind_count += 1;
    }
    if filter.priority.is_some() {
        query.push_str(&format!(" AND priority = ${}", bind_count));
        bind_count += 1;
    }
    if filter.category.is_some() {
        query.push_str(&format!(" AND category = ${}", bind_count));
        bind_count += 1;
    }
    if filter.assignee.is_some() {
        query.push_str(&format!(" AND assignee = ${}", bind_count));
    }

    query.push_str(" ORDER BY created_at DESC");

    let mut query_builder = sqlx::query_as::<_, Task>(&query).bind(user_id);

    if let Some(status) = filter.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(priority) = filter.priority {
        query_builder = query_builder.bind(priority);
    }
    if let Some(ref category) = filter.category {
        query_builder = query_builder.bind(category);
    }
    if let Some(assignee) = filter.assignee {
        query_builder = query_builder.bind(assignee);
    }

    query_builder.fetch_all(pool).await
}

pub async fn get_task(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Task>> {
    sqlx::query_as::<_, Task>(
        r#"
        SELECT * FROM tasks
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
pub async fn update_task(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    body: UpdateTaskRequest,
) -> Result<Option<Task>> {
    let mut query = String::from("UPDATE tasks SET updated_at = NOW()");
    let mut bind_count = 1;

    if body.name.is_some() {
        query.push_str(&format!(", name = ${}", bind_count));
        bind_count += 1;
    }
    if body.description.is_some() {
        query.push_str(&format!(", description = ${}", bind_count));
        bind_count += 1;
    }
    if body.priority.is_some() {
        query.push_str(&format!(", priority = ${}", bind_count));
        bind_count += 1;
    }
    if body.deadline.is_some() {
        query.push_str(&format!(", deadline = ${}", bind_count));
        bind_count += 1;
    }
    if body.status.is_some() {
        query.push_str(&format!(", status = ${}", bind_count));
        bind_count += 1;
    }
    // Some(None) binds NULL, clearing the assignee
    if body.assignee.is_some() {
        query.push_str(&format!(", assignee = ${}", bind_count));
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

    let mut query_builder = sqlx::query_as::<_, Task>(&query);

    if let Some(name) = body.name {
        query_builder = query_builder.bind(name.trim().to_string());
    }
    if let Some(description) = body.description {
        query_builder = query_builder.bind(description);
    }
    if let Some(priority) = body.priority {
        query_builder = query_builder.bind(priority);
    }
    if let Some(deadline) = body.deadline {
        query_builder = query_builder.bind(deadline);
    }
    if let Some(status) = body.status {
        query_builder = query_builder.bind(status);
    }
    if let Some(assignee) = body.assignee {
        query_builder = query_builder.bind(assignee);
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

pub async fn update_status(
    pool: &PgPool,
    user_id: Uuid,
    id: Uuid,
    status: TaskStatus,
) -> Result<Option<Task>> {
    sqlx::query_as::<_, Task>(
        r#"
        UPDATE tasks
        SET status = $3, updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .bind(status)
    .fetch_optional(pool)
    .await
}

pub async fn delete_task(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM tasks
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(id)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[derive(sqlx::FromRow)]
pub struct StatusCounts {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
}

pub async fn status_counts(pool: &PgPool, user_id: Uuid) -> Result<StatusCounts> {
    sqlx::query_as::<_, StatusCounts>(
        r#"
        SELECT
            COUNT(*) AS total,
            COUNT(*) FILTER (WHERE status = 'completed') AS completed,
            COUNT(*) FILTER (WHERE status = 'pending') AS pending,
            COUNT(*) FILTER (WHERE status = 'in-progress') AS in_progress
        FROM tasks
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_one(pool)
    .await
}

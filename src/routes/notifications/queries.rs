use sqlx::{PgPool, Result};
use uuid::Uuid;

use super::Notification;

pub async fn create_notification(
    pool: &PgPool,
    recipient: Uuid,
    message: &str,
    task_id: Option<Uuid>,
) -> Result<Notification> {
    sqlx::query_as::<_, Notification>(
        r#"
        INSERT INTO notifications (id, user_id, message, task_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(recipient)
    .bind(message)
    .bind(task_id)
    .fetch_one(pool)
    .await
}

pub async fn list_notifications(pool: &PgPool, user_id: Uuid) -> Result<Vec<Notification>> {
    sqlx::query_as::<_, Notification>(
        r#"
        SELECT * FROM notifications
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await
}

pub async fn mark_read(pool: &PgPool, user_id: Uuid, id: Uuid) -> Result<Option<Notification>> {
    sqlx::query_as::<_, Notification>(
        r#"
        UPDATE notifications
        SET read = TRUE
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(user_id)
    .fetch_optional(pool)
    .await
}

pub mod queries;
pub mod routes;

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// In-app notification addressed to one recipient. `task_id` is a loose
/// reference: the task may have been deleted since.
#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub message: String,
    pub task_id: Option<Uuid>,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

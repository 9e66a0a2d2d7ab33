pub mod queries;
pub mod routes;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// MODELS

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Pending
    }
}

#[derive(Debug, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub priority: i32,
    pub deadline: DateTime<Utc>,
    pub status: TaskStatus,
    pub assignee: Option<Uuid>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// DTOS

#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    pub name: String,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub deadline: DateTime<Utc>,
    #[serde(default)]
    pub status: TaskStatus,
    pub assignee: Option<Uuid>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<i32>,
    pub deadline: Option<DateTime<Utc>>,
    pub status: Option<TaskStatus>,
    /// Missing key leaves the assignee alone; an explicit `null` clears it.
    #[serde(default)]
    pub assignee: Option<Option<Uuid>>,
    pub category: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: TaskStatus,
}

#[derive(Debug, Deserialize)]
pub struct TaskListQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<i32>,
    pub category: Option<String>,
    pub assignee: Option<Uuid>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStatsResponse {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub in_progress: i64,
    pub completion_rate: i64,
}

// HELPER FUNCTIONS

pub fn validate_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err("Please provide a task name".to_string());
    }

    if name.len() > 100 {
        return Err("Task name cannot be more than 100 characters".to_string());
    }

    Ok(())
}

pub fn validate_priority(priority: i32) -> Result<(), String> {
    if !(1..=5).contains(&priority) {
        return Err("Priority must be between 1 and 5".to_string());
    }

    Ok(())
}

pub fn validate_description(description: &str) -> Result<(), String> {
    if description.len() > 500 {
        return Err("Description cannot be more than 500 characters".to_string());
    }

    Ok(())
}

pub fn validate_category(category: &str) -> Result<(), String> {
    if category.len() > 100 {
        return Err("Category cannot be more than 100 characters".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_serde_names() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );

        let parsed: TaskStatus = serde_json::from_str("\"pending\"").unwrap();
        assert_eq!(parsed, TaskStatus::Pending);

        let invalid: Result<TaskStatus, _> = serde_json::from_str("\"done\"");
        assert!(invalid.is_err());
    }

    #[test]
    fn test_status_defaults_to_pending() {
        let body: CreateTaskRequest = serde_json::from_str(
            r#"{"name": "ship it", "deadline": "2024-06-01T00:00:00Z"}"#,
        )
        .unwrap();
        assert_eq!(body.status, TaskStatus::Pending);
    }

    #[test]
    fn test_update_request_assignee_three_states() {
        let missing: UpdateTaskRequest = serde_json::from_str(r#"{"name": "x"}"#).unwrap();
        assert_eq!(missing.assignee, None);

        let cleared: UpdateTaskRequest = serde_json::from_str(r#"{"assignee": null}"#).unwrap();
        assert_eq!(cleared.assignee, Some(None));

        let id = Uuid::new_v4();
        let set: UpdateTaskRequest =
            serde_json::from_str(&format!(r#"{{"assignee": "{id}"}}"#)).unwrap();
        assert_eq!(set.assignee, Some(Some(id)));
    }

    #[test]
    fn test_validate_priority_bounds() {
        assert!(validate_priority(1).is_ok());
        assert!(validate_priority(3).is_ok());
        assert!(validate_priority(5).is_ok());
        assert!(validate_priority(0).is_err());
        assert!(validate_priority(6).is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("Write report").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_description_length() {
        assert!(validate_description(&"x".repeat(500)).is_ok());
        assert!(validate_description(&"x".repeat(501)).is_err());
    }
}

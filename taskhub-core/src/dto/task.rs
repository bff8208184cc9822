//! Task DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::validate;
use crate::domain::{TaskPriority, TaskStatus};
use crate::error::ValidationError;

/// Request to create a task
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTask {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: TaskPriority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl CreateTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::required("title", &self.title)
    }
}

/// Partial update of a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl UpdateTask {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate::optional_required("title", self.title.as_deref())
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.assigned_to.is_none()
            && self.due_date.is_none()
    }
}

/// Body of `PATCH /tasks/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateTaskStatus {
    pub status: TaskStatus,
}

/// Filters accepted by `GET /tasks`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub assigned_to: Option<String>,
    pub department_id: Option<String>,
}

impl TaskFilter {
    pub fn assigned_to(employee_id: impl Into<String>) -> Self {
        Self {
            assigned_to: Some(employee_id.into()),
            ..Self::default()
        }
    }

    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(priority) = self.priority {
            query.push(("priority", priority.as_str().to_string()));
        }
        if let Some(id) = &self.assigned_to {
            query.push(("assignedTo", id.clone()));
        }
        if let Some(id) = &self.department_id {
            query.push(("departmentId", id.clone()));
        }
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query() {
        let filter = TaskFilter {
            status: Some(TaskStatus::InProgress),
            priority: Some(TaskPriority::Urgent),
            ..TaskFilter::assigned_to("e1")
        };
        assert_eq!(
            filter.to_query(),
            vec![
                ("status", "in_progress".to_string()),
                ("priority", "urgent".to_string()),
                ("assignedTo", "e1".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_task_wire_format() {
        let req = CreateTask {
            title: "Ship release".into(),
            description: None,
            priority: TaskPriority::High,
            department_id: Some("d1".into()),
            assigned_to: None,
            due_date: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "title": "Ship release", "priority": "high", "departmentId": "d1" })
        );
    }

    #[test]
    fn test_update_task_empty() {
        assert!(UpdateTask::default().is_empty());
        let update = UpdateTask {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        assert!(!update.is_empty());
        assert!(UpdateTask { title: Some(" ".into()), ..Default::default() }.validate().is_err());
    }
}

use crate::error::Result;
use crate::models::common::{impl_has_self_link, Link};
use crate::rest::RestContext;
use crate::time::Time;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskTypeName {
    Email,
    PhoneCall,
    Post,
    Meet,
    System,
    InternalProcess,
    Audit,
    SupplierAgreement,
    FlightOnRequestTask,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CreateTaskRequest {
    pub task_type: TaskTypeName,
    pub description: String,
    #[serde(rename = "AssignedToUserID", skip_serializing_if = "Option::is_none")]
    pub assigned_to_user_id: Option<i64>,
    #[serde(rename = "AssignedToUserGroupID", skip_serializing_if = "Option::is_none")]
    pub assigned_to_user_group_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_date: Option<Time>,
}

impl CreateTaskRequest {
    pub fn new(task_type: TaskTypeName, description: impl Into<String>) -> Self {
        CreateTaskRequest {
            task_type,
            description: description.into(),
            assigned_to_user_id: None,
            assigned_to_user_group_id: None,
            action_date: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskType {
    #[serde(rename = "ID")]
    pub id: i64,
    #[serde(rename = "Name")]
    pub name: TaskTypeName,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Task {
    #[serde(rename = "ID")]
    pub id: i64,
    pub description: String,
    #[serde(default)]
    pub status: Option<String>,
    pub task_type: TaskType,
    #[serde(default)]
    pub due_date_time: Option<Time>,
    #[serde(default)]
    pub last_modified_date: Option<Time>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl_has_self_link!(Task);

/// Task API actions
#[derive(Debug, Clone, Copy)]
pub struct TasksApi<'a> {
    ctx: &'a RestContext,
}

impl<'a> TasksApi<'a> {
    pub(crate) fn new(ctx: &'a RestContext) -> Self {
        TasksApi { ctx }
    }

    /// Create a new task for a reservation
    pub async fn create(&self, reservation_id: impl Display, task: &CreateTaskRequest) -> Result<Task> {
        self.ctx
            .post(&format!("/sales/reservations/{}/tasks", reservation_id), task)
            .await
    }

    /// List tasks for a reservation
    pub async fn list(&self, reservation_id: impl Display) -> Result<Vec<Task>> {
        self.ctx
            .get(&format!("/sales/reservations/{}/tasks", reservation_id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_task_request_ids() {
        let mut request = CreateTaskRequest::new(TaskTypeName::PhoneCall, "Call back re: dietary needs");
        request.assigned_to_user_id = Some(12);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({"TaskType": "PhoneCall", "Description": "Call back re: dietary needs", "AssignedToUserID": 12})
        );
    }

    #[test]
    fn test_unknown_task_type() {
        let task: Task = serde_json::from_value(json!({
            "ID": 3,
            "Description": "Chase deposit",
            "Status": "Late",
            "TaskType": {"ID": 99, "Name": "CarrierPigeon"},
            "LastModifiedDate": "2024-05-01T09:00:00"
        }))
        .unwrap();
        assert_eq!(task.task_type.name, TaskTypeName::Unknown);
        assert_eq!(task.status.as_deref(), Some("Late"));
    }
}

// Workflow execution records as reported by the execution service
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionStatus {
    pub action_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// Raw action output, usually CSV. Absent while the action is still running.
    #[serde(default)]
    pub result: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStatus {
    pub execution_id: String,
    pub workflow_id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub action_statuses: Vec<ActionStatus>,
}

impl WorkflowStatus {
    pub fn action_status(&self, action_id: &str) -> Option<&ActionStatus> {
        self.action_statuses.iter().find(|s| s.action_id == action_id)
    }
}

// Repository trait for workflow execution lookups
use crate::domain::execution::WorkflowStatus;
use async_trait::async_trait;

#[async_trait]
pub trait ExecutionRepository: Send + Sync {
    /// Most recent execution of the given workflow
    async fn latest_execution(&self, workflow_id: &str) -> anyhow::Result<WorkflowStatus>;

    /// A specific execution by its identifier
    async fn workflow_status(&self, execution_id: &str) -> anyhow::Result<WorkflowStatus>;
}

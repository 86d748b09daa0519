// HTTP client for the workflow execution service
use crate::application::execution_repository::ExecutionRepository;
use crate::domain::execution::WorkflowStatus;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ExecutionClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ExecutionClient {
    pub fn new(base_url: String, token: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build execution service HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    fn latest_url(&self, workflow_id: &str) -> String {
        format!(
            "{}/api/workflowqueue/latest?workflow_id={}",
            self.base_url,
            urlencoding::encode(workflow_id)
        )
    }

    fn status_url(&self, execution_id: &str) -> String {
        format!(
            "{}/api/workflowqueue/{}",
            self.base_url,
            urlencoding::encode(execution_id)
        )
    }

    async fn fetch_status(&self, url: &str) -> Result<WorkflowStatus> {
        tracing::debug!("Fetching workflow status from {}", url);

        let mut request = self.client.get(url).header("Accept", "application/json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .context("Failed to send request to execution service")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Execution service request failed with status {}: {}", status, body);
        }

        response
            .json::<WorkflowStatus>()
            .await
            .context("Failed to parse execution service response")
    }
}

#[async_trait]
impl ExecutionRepository for ExecutionClient {
    async fn latest_execution(&self, workflow_id: &str) -> Result<WorkflowStatus> {
        self.fetch_status(&self.latest_url(workflow_id)).await
    }

    async fn workflow_status(&self, execution_id: &str) -> Result<WorkflowStatus> {
        self.fetch_status(&self.status_url(execution_id)).await
    }
}

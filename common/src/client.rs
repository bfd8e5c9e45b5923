// Backend API client

use crate::errors::ClientError;
use crate::models::{Execution, TriggerRequest};
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;

/// Error body shape the backend may return on a non-success status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// ApiClient issues requests against the configured backend API. Every
/// request path is prefixed with the base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    /// Create a new ApiClient with the specified base URL and timeout
    pub fn new(base_url: &str, timeout_seconds: u64) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the executions list: `GET {base_url}/executions`.
    #[tracing::instrument(skip(self))]
    pub async fn list_executions(&self) -> Result<Vec<Execution>, ClientError> {
        let url = format!("{}/executions", self.base_url);
        let response = self.client.get(&url).send().await?;
        let response = Self::check_status(response).await?;

        let executions: Vec<Execution> = response
            .json()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))?;

        tracing::debug!(count = executions.len(), "Fetched executions");
        Ok(executions)
    }

    /// Send a test trigger: `POST {base_url}/trigger`. The response body is
    /// ignored on success.
    #[tracing::instrument(skip(self), fields(function_name = %request.function_name))]
    pub async fn send_trigger(&self, request: &TriggerRequest) -> Result<(), ClientError> {
        let url = format!("{}/trigger", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await?;

        Self::check_status(response).await?;
        tracing::info!(function_name = %request.function_name, "Trigger accepted by backend");
        Ok(())
    }

    /// Turn a non-success response into `ClientError::Status`, pulling the
    /// optional `{"message": ...}` field out of the error body.
    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message);

        tracing::warn!(status = status.as_u16(), message = ?message, "Backend returned an error");
        Err(ClientError::Status {
            status: status.as_u16(),
            message,
        })
    }
}

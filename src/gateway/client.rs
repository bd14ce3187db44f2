//! HTTP client for the workflow backend.

use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};
use tracing::debug;

use super::{Backend, Household};
use crate::error::BackendError;

/// Client for the workflow backend API.
///
/// Holds the base URL, the optional bearer credential, and a pooled
/// `reqwest::Client`. All of that is immutable after construction, so calls
/// may run concurrently. Failures are never retried here — every error
/// propagates to the caller as a single [`BackendError`].
pub struct GatewayClient {
    base_url: String,
    api_key: Option<SecretString>,
    client: reqwest::Client,
}

impl GatewayClient {
    /// Create a client for the backend at `base_url`.
    pub fn new(base_url: impl Into<String>, api_key: Option<SecretString>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        debug!(backend = %base_url, "Gateway client initialized");
        Self {
            base_url,
            api_key,
            client: reqwest::Client::new(),
        }
    }

    /// The backend base URL this client talks to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, endpoint: &str) -> RequestBuilder {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, endpoint))
            .header(reqwest::header::CONTENT_TYPE, "application/json");
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }
        request
    }

    /// Send a request and parse the JSON body, normalizing failures.
    ///
    /// Non-2xx responses become `BackendError::Rejected` carrying the status
    /// and the error body — parsed as JSON when the backend sent JSON, raw
    /// text otherwise.
    async fn send(&self, request: RequestBuilder, endpoint: &str) -> Result<Value, BackendError> {
        let response = request
            .send()
            .await
            .map_err(|e| BackendError::Transport {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str(&raw).unwrap_or(Value::String(raw));
            return Err(BackendError::Rejected {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
                detail,
            });
        }

        response.json().await.map_err(|e| BackendError::Transport {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl Backend for GatewayClient {
    async fn list_households(
        &self,
        advisor_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Household>, BackendError> {
        let endpoint = "/api/transitions";
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(advisor_id) = advisor_id {
            params.push(("advisor_id", advisor_id));
        }
        if let Some(status) = status {
            params.push(("status", status));
        }

        let body = self
            .send(self.request(Method::GET, endpoint).query(&params), endpoint)
            .await?;
        serde_json::from_value(body).map_err(|e| BackendError::Transport {
            endpoint: endpoint.to_string(),
            reason: format!("unexpected household payload: {e}"),
        })
    }

    async fn get_household(&self, household_id: i64) -> Result<Value, BackendError> {
        let endpoint = format!("/api/transitions/{household_id}");
        self.send(self.request(Method::GET, &endpoint), &endpoint)
            .await
    }

    async fn complete_task(
        &self,
        task_id: i64,
        note: Option<&str>,
    ) -> Result<Value, BackendError> {
        let endpoint = format!("/api/tasks/{task_id}/complete");
        let body = json!({ "status": "COMPLETED", "note": note });
        self.send(self.request(Method::POST, &endpoint).json(&body), &endpoint)
            .await
    }

    async fn validate_document(
        &self,
        document_id: &str,
        document_url: Option<&str>,
    ) -> Result<Value, BackendError> {
        let endpoint = "/documents/validate";
        let body = json!({ "document_id": document_id, "document_url": document_url });
        self.send(self.request(Method::POST, endpoint).json(&body), endpoint)
            .await
    }

    async fn get_meeting_pack(&self, household_id: i64) -> Result<Value, BackendError> {
        let endpoint = format!("/households/{household_id}/meeting-pack");
        self.send(self.request(Method::GET, &endpoint), &endpoint)
            .await
    }

    async fn get_eta_prediction(&self, workflow_id: &str) -> Result<Value, BackendError> {
        let endpoint = format!("/predictions/eta/{workflow_id}");
        self.send(self.request(Method::GET, &endpoint), &endpoint)
            .await
    }

    async fn create_workflow(
        &self,
        workflow_type: &str,
        advisor_id: &str,
        metadata: Value,
    ) -> Result<Value, BackendError> {
        let endpoint = "/workflows";
        let body = json!({
            "workflow_type": workflow_type,
            "advisor_id": advisor_id,
            "metadata": metadata,
        });
        self.send(self.request(Method::POST, endpoint).json(&body), endpoint)
            .await
    }

    async fn get_workflow(&self, workflow_id: &str) -> Result<Value, BackendError> {
        let endpoint = format!("/workflows/{workflow_id}");
        self.send(self.request(Method::GET, &endpoint), &endpoint)
            .await
    }

    async fn run_entity_match(&self, source_data: Value) -> Result<Value, BackendError> {
        let endpoint = "/entity/match";
        self.send(
            self.request(Method::POST, endpoint).json(&source_data),
            endpoint,
        )
        .await
    }

    async fn draft_communication(
        &self,
        template_type: &str,
        recipient: &str,
        context: Value,
    ) -> Result<Value, BackendError> {
        let endpoint = "/communications/draft";
        let body = json!({
            "template_type": template_type,
            "recipient": recipient,
            "context": context,
        });
        self.send(self.request(Method::POST, endpoint).json(&body), endpoint)
            .await
    }
}

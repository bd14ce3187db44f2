//! Gateway to the workflow backend — the only component that performs
//! network calls.

pub mod client;

pub use client::GatewayClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::BackendError;

/// One household (transition) as reported by the backend.
///
/// Only the fields the reply formatters read are typed. Everything else the
/// backend sends lands in `extra` and is re-serialized untouched, so payloads
/// round-trip through the chat path without loss.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Household {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub advisor_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub open_tasks_count: u64,
    #[serde(default)]
    pub nigo_issues_count: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Async interface to the workflow backend.
///
/// One method per backend capability. `GatewayClient` is the production
/// implementation; tests substitute stubs. Implementations must be safe to
/// call concurrently — no method takes `&mut self`.
#[async_trait]
pub trait Backend: Send + Sync {
    /// List households, optionally filtered by advisor and/or status.
    async fn list_households(
        &self,
        advisor_id: Option<&str>,
        status: Option<&str>,
    ) -> Result<Vec<Household>, BackendError>;

    /// Fetch one household in full.
    async fn get_household(&self, household_id: i64) -> Result<Value, BackendError>;

    /// Mark a task as completed, with an optional note.
    async fn complete_task(&self, task_id: i64, note: Option<&str>)
    -> Result<Value, BackendError>;

    /// Validate a document for NIGO issues.
    async fn validate_document(
        &self,
        document_id: &str,
        document_url: Option<&str>,
    ) -> Result<Value, BackendError>;

    /// Generate a meeting pack for a household.
    async fn get_meeting_pack(&self, household_id: i64) -> Result<Value, BackendError>;

    /// Predict the completion time of a workflow.
    async fn get_eta_prediction(&self, workflow_id: &str) -> Result<Value, BackendError>;

    /// Create a workflow for an advisor.
    async fn create_workflow(
        &self,
        workflow_type: &str,
        advisor_id: &str,
        metadata: Value,
    ) -> Result<Value, BackendError>;

    /// Fetch a workflow's dashboard/status.
    async fn get_workflow(&self, workflow_id: &str) -> Result<Value, BackendError>;

    /// Run entity resolution over caller-supplied source data.
    async fn run_entity_match(&self, source_data: Value) -> Result<Value, BackendError>;

    /// Draft an outbound communication from a template.
    async fn draft_communication(
        &self,
        template_type: &str,
        recipient: &str,
        context: Value,
    ) -> Result<Value, BackendError>;
}

//! HTTP surface — the chat endpoint plus direct backend passthroughs.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::chat::{self, DEFAULT_SESSION, Dispatcher};
use crate::error::BackendError;
use crate::gateway::Backend;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub gateway: Arc<dyn Backend>,
    /// Backend base URL, reported by `/health`.
    pub backend_url: String,
}

/// Build the router: chat, health, and one passthrough per gateway
/// operation. CORS is wide open — frontends connect from anywhere.
pub fn routes(
    dispatcher: Arc<Dispatcher>,
    gateway: Arc<dyn Backend>,
    backend_url: String,
) -> Router {
    let state = AppState {
        dispatcher,
        gateway,
        backend_url,
    };

    Router::new()
        .route("/health", get(health))
        .route("/chat", post(handle_chat))
        .route("/workflows/create", post(create_workflow))
        .route("/workflows/{workflow_id}", get(get_workflow))
        .route("/households", get(list_households))
        .route("/households/{household_id}", get(get_household))
        .route(
            "/households/{household_id}/meeting-pack",
            get(get_meeting_pack),
        )
        .route("/tasks/{task_id}/complete", post(complete_task))
        .route("/documents/validate", post(validate_document))
        .route("/predictions/eta/{workflow_id}", get(get_eta))
        .route("/entity/match", post(entity_match))
        .route("/communications/draft", post(draft_communication))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

// ── Error mapping ───────────────────────────────────────────────────────

/// A failed backend call, reported to the frontend as a server error with
/// the backend's message as detail.
struct ApiError(BackendError);

impl From<BackendError> for ApiError {
    fn from(err: BackendError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, endpoint = %self.0.endpoint(), "Backend call failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": self.0.to_string() })),
        )
            .into_response()
    }
}

// ── Request / response models ───────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub session_id: Option<String>,
    #[allow(dead_code)]
    pub user_id: Option<String>,
    #[allow(dead_code)]
    pub context: Option<Value>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub session_id: String,
    pub actions_taken: Vec<String>,
    pub data: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct WorkflowCreateRequest {
    pub workflow_type: String,
    pub advisor_id: String,
    pub metadata: Option<Value>,
}

#[derive(Debug, Deserialize, Default)]
pub struct TaskCompleteRequest {
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DocumentValidateRequest {
    pub document_id: String,
    pub document_url: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CommunicationDraftRequest {
    pub template_type: String,
    pub recipient: String,
    pub context: Value,
}

#[derive(Debug, Deserialize)]
pub struct HouseholdFilter {
    pub advisor_id: Option<String>,
    pub status: Option<String>,
}

// ── Health ──────────────────────────────────────────────────────────────

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "transition-assist",
        "backend_connected": state.backend_url,
    }))
}

// ── Chat ────────────────────────────────────────────────────────────────

/// Classify the message, dispatch it, and shape the exchange for the
/// frontend. Backend failures surface here as 500s — never swallowed.
async fn handle_chat(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, ApiError> {
    let session_id = request
        .session_id
        .unwrap_or_else(|| DEFAULT_SESSION.to_string());

    let intent = chat::classify(&request.message);
    let exchange = state
        .dispatcher
        .dispatch(intent, &request.message, &session_id)
        .await?;

    Ok(Json(ChatResponse {
        response: exchange.response,
        session_id: exchange.session_id,
        actions_taken: exchange.actions_taken,
        data: exchange.data,
    }))
}

// ── Direct passthroughs ─────────────────────────────────────────────────

async fn create_workflow(
    State(state): State<AppState>,
    Json(request): Json<WorkflowCreateRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .gateway
        .create_workflow(
            &request.workflow_type,
            &request.advisor_id,
            request.metadata.unwrap_or_else(|| json!({})),
        )
        .await?;
    Ok(Json(result))
}

async fn get_workflow(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.gateway.get_workflow(&workflow_id).await?))
}

async fn list_households(
    State(state): State<AppState>,
    Query(filter): Query<HouseholdFilter>,
) -> Result<Json<Value>, ApiError> {
    let households = state
        .gateway
        .list_households(filter.advisor_id.as_deref(), filter.status.as_deref())
        .await?;
    Ok(Json(json!(households)))
}

async fn get_household(
    State(state): State<AppState>,
    Path(household_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.gateway.get_household(household_id).await?))
}

async fn complete_task(
    State(state): State<AppState>,
    Path(task_id): Path<i64>,
    Json(request): Json<TaskCompleteRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .gateway
        .complete_task(task_id, request.note.as_deref())
        .await?;
    Ok(Json(result))
}

async fn validate_document(
    State(state): State<AppState>,
    Json(request): Json<DocumentValidateRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .gateway
        .validate_document(&request.document_id, request.document_url.as_deref())
        .await?;
    Ok(Json(result))
}

async fn get_meeting_pack(
    State(state): State<AppState>,
    Path(household_id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.gateway.get_meeting_pack(household_id).await?))
}

async fn get_eta(
    State(state): State<AppState>,
    Path(workflow_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.gateway.get_eta_prediction(&workflow_id).await?))
}

async fn entity_match(
    State(state): State<AppState>,
    Json(source_data): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    Ok(Json(state.gateway.run_entity_match(source_data).await?))
}

async fn draft_communication(
    State(state): State<AppState>,
    Json(request): Json<CommunicationDraftRequest>,
) -> Result<Json<Value>, ApiError> {
    let result = state
        .gateway
        .draft_communication(&request.template_type, &request.recipient, request.context)
        .await?;
    Ok(Json(result))
}

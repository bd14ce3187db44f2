//! Intent dispatch — maps each classified intent to backend calls and a
//! formatted reply.

use std::sync::Arc;

use serde_json::json;
use tracing::debug;

use super::format::{format_dashboard, format_household_list};
use super::{ChatExchange, Intent};
use crate::error::BackendError;
use crate::gateway::Backend;

const HELP_TEXT: &str = "I'm your transition assistant. I can help you with:\n\
                         • View dashboard and status\n\
                         • List households and clients\n\
                         • Complete tasks\n\
                         • Validate documents\n\
                         • Generate meeting packs\n\
                         • Check ETAs and predictions\n\n\
                         What would you like to do?";

/// Routes classified intents to gateway calls and formatted replies.
///
/// The gateway is injected at construction so tests can substitute a stub.
/// Read-only intents fetch through it; intents that would need an identifier
/// the message cannot supply answer with a clarifying prompt and never touch
/// the backend. Each branch records exactly one action tag.
pub struct Dispatcher {
    gateway: Arc<dyn Backend>,
}

impl Dispatcher {
    pub fn new(gateway: Arc<dyn Backend>) -> Self {
        Self { gateway }
    }

    /// Handle one classified message.
    ///
    /// Backend failures propagate to the caller — no retries, no fallback
    /// data, and no writes ever happen from this path.
    pub async fn dispatch(
        &self,
        intent: Intent,
        message: &str,
        session_id: &str,
    ) -> Result<ChatExchange, BackendError> {
        let mut actions = Vec::new();
        let mut data = None;

        let response = match intent {
            Intent::Dashboard => {
                let households = self.gateway.list_households(None, None).await?;
                let text = format_dashboard(&households);
                data = Some(json!({ "households": households }));
                actions.push("listed_households".to_string());
                text
            }
            Intent::ListHouseholds => {
                let households = self.gateway.list_households(None, None).await?;
                let text = format_household_list(&households);
                data = Some(json!({ "households": households }));
                actions.push("listed_households".to_string());
                text
            }
            Intent::CompleteTaskRequest => {
                actions.push("requested_task_id".to_string());
                "To complete a task, please provide the task ID or use the \
                 /tasks/complete endpoint."
                    .to_string()
            }
            Intent::ValidateDocumentRequest => {
                actions.push("ready_to_validate_document".to_string());
                "I can validate documents for NIGO issues. Please provide the document ID."
                    .to_string()
            }
            Intent::MeetingPackRequest => {
                actions.push("requested_household_for_meeting".to_string());
                "I can prepare a meeting pack. Which household/client is the meeting for?"
                    .to_string()
            }
            Intent::EtaRequest => {
                actions.push("requested_workflow_for_eta".to_string());
                "I can predict completion times. Which workflow are you asking about?"
                    .to_string()
            }
            Intent::Help => {
                actions.push("provided_help".to_string());
                HELP_TEXT.to_string()
            }
        };

        debug!(
            intent = ?intent,
            session = %session_id,
            message = %message.chars().take(100).collect::<String>(),
            actions = ?actions,
            "Dispatched chat message"
        );

        Ok(ChatExchange {
            response,
            session_id: session_id.to_string(),
            intent,
            actions_taken: actions,
            data,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::{Value, json};

    use super::*;
    use crate::chat::DEFAULT_SESSION;
    use crate::gateway::Household;

    /// Stub backend that records every call and serves a fixed household
    /// list.
    struct StubBackend {
        households: Vec<Household>,
        calls: Mutex<Vec<&'static str>>,
    }

    impl StubBackend {
        fn new(households: Vec<Household>) -> Self {
            Self {
                households,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, op: &'static str) {
            self.calls.lock().unwrap().push(op);
        }

        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Backend for StubBackend {
        async fn list_households(
            &self,
            _advisor_id: Option<&str>,
            _status: Option<&str>,
        ) -> Result<Vec<Household>, BackendError> {
            self.record("list_households");
            Ok(self.households.clone())
        }

        async fn get_household(&self, _household_id: i64) -> Result<Value, BackendError> {
            self.record("get_household");
            Ok(json!({}))
        }

        async fn complete_task(
            &self,
            _task_id: i64,
            _note: Option<&str>,
        ) -> Result<Value, BackendError> {
            self.record("complete_task");
            Ok(json!({}))
        }

        async fn validate_document(
            &self,
            _document_id: &str,
            _document_url: Option<&str>,
        ) -> Result<Value, BackendError> {
            self.record("validate_document");
            Ok(json!({}))
        }

        async fn get_meeting_pack(&self, _household_id: i64) -> Result<Value, BackendError> {
            self.record("get_meeting_pack");
            Ok(json!({}))
        }

        async fn get_eta_prediction(&self, _workflow_id: &str) -> Result<Value, BackendError> {
            self.record("get_eta_prediction");
            Ok(json!({}))
        }

        async fn create_workflow(
            &self,
            _workflow_type: &str,
            _advisor_id: &str,
            _metadata: Value,
        ) -> Result<Value, BackendError> {
            self.record("create_workflow");
            Ok(json!({}))
        }

        async fn get_workflow(&self, _workflow_id: &str) -> Result<Value, BackendError> {
            self.record("get_workflow");
            Ok(json!({}))
        }

        async fn run_entity_match(&self, _source_data: Value) -> Result<Value, BackendError> {
            self.record("run_entity_match");
            Ok(json!({}))
        }

        async fn draft_communication(
            &self,
            _template_type: &str,
            _recipient: &str,
            _context: Value,
        ) -> Result<Value, BackendError> {
            self.record("draft_communication");
            Ok(json!({}))
        }
    }

    fn sample_households() -> Vec<Household> {
        let mut extra = serde_json::Map::new();
        extra.insert("region".to_string(), json!("northeast"));
        vec![
            Household {
                id: 7,
                name: "Alvarez".to_string(),
                advisor_name: "Dana Reed".to_string(),
                status: "AT_RISK".to_string(),
                open_tasks_count: 3,
                nigo_issues_count: 1,
                extra,
            },
            Household {
                id: 9,
                name: "Bennett".to_string(),
                advisor_name: "Lee Park".to_string(),
                status: "IN_PROGRESS".to_string(),
                open_tasks_count: 2,
                nigo_issues_count: 0,
                ..Default::default()
            },
        ]
    }

    #[tokio::test]
    async fn test_dashboard_fetches_and_formats() {
        let stub = Arc::new(StubBackend::new(sample_households()));
        let dispatcher = Dispatcher::new(Arc::clone(&stub) as Arc<dyn Backend>);

        let exchange = dispatcher
            .dispatch(Intent::Dashboard, "dashboard", DEFAULT_SESSION)
            .await
            .unwrap();

        assert_eq!(exchange.actions_taken, vec!["listed_households"]);
        assert!(exchange.response.contains("Total Households: 2"));
        assert_eq!(stub.calls(), vec!["list_households"]);
    }

    #[tokio::test]
    async fn test_dashboard_data_round_trips_unchanged() {
        let households = sample_households();
        let stub = Arc::new(StubBackend::new(households.clone()));
        let dispatcher = Dispatcher::new(stub as Arc<dyn Backend>);

        let exchange = dispatcher
            .dispatch(Intent::Dashboard, "status", DEFAULT_SESSION)
            .await
            .unwrap();

        // The formatter must not mutate the payload — flattened extras
        // included.
        let data = exchange.data.unwrap();
        assert_eq!(data["households"], json!(households));
        assert_eq!(data["households"][0]["region"], json!("northeast"));
    }

    #[tokio::test]
    async fn test_clarifying_intents_never_touch_the_backend() {
        let stub = Arc::new(StubBackend::new(Vec::new()));
        let dispatcher = Dispatcher::new(Arc::clone(&stub) as Arc<dyn Backend>);

        for (intent, action) in [
            (Intent::CompleteTaskRequest, "requested_task_id"),
            (Intent::ValidateDocumentRequest, "ready_to_validate_document"),
            (Intent::MeetingPackRequest, "requested_household_for_meeting"),
            (Intent::EtaRequest, "requested_workflow_for_eta"),
            (Intent::Help, "provided_help"),
        ] {
            let exchange = dispatcher
                .dispatch(intent, "complete task 12", DEFAULT_SESSION)
                .await
                .unwrap();
            assert_eq!(exchange.actions_taken, vec![action]);
            assert!(exchange.data.is_none());
        }

        assert!(stub.calls().is_empty());
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        struct FailingBackend;

        #[async_trait]
        impl Backend for FailingBackend {
            async fn list_households(
                &self,
                _advisor_id: Option<&str>,
                _status: Option<&str>,
            ) -> Result<Vec<Household>, BackendError> {
                Err(BackendError::Rejected {
                    endpoint: "/api/transitions".to_string(),
                    status: 503,
                    detail: json!({"detail": "backend down"}),
                })
            }

            async fn get_household(&self, _: i64) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn complete_task(&self, _: i64, _: Option<&str>) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn validate_document(
                &self,
                _: &str,
                _: Option<&str>,
            ) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn get_meeting_pack(&self, _: i64) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn get_eta_prediction(&self, _: &str) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn create_workflow(
                &self,
                _: &str,
                _: &str,
                _: Value,
            ) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn get_workflow(&self, _: &str) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn run_entity_match(&self, _: Value) -> Result<Value, BackendError> {
                unimplemented!()
            }
            async fn draft_communication(
                &self,
                _: &str,
                _: &str,
                _: Value,
            ) -> Result<Value, BackendError> {
                unimplemented!()
            }
        }

        let dispatcher = Dispatcher::new(Arc::new(FailingBackend));
        let err = dispatcher
            .dispatch(Intent::ListHouseholds, "households", DEFAULT_SESSION)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(503));
    }
}

//! Chat core — intent classification, dispatch, and reply formatting.

pub mod dispatch;
pub mod format;
pub mod intent;

pub use dispatch::Dispatcher;
pub use intent::{Intent, classify};

use serde_json::Value;

/// Session id used when the caller does not supply one.
pub const DEFAULT_SESSION: &str = "default";

/// One processed chat message.
///
/// Built fresh per request and dropped when the reply is sent — there is no
/// conversation memory across exchanges.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    /// Reply text for the user.
    pub response: String,
    /// Session the exchange belongs to.
    pub session_id: String,
    /// Intent the message classified to.
    pub intent: Intent,
    /// Action tags recorded while handling the message.
    pub actions_taken: Vec<String>,
    /// Structured payload backing the reply, when a backend call was made.
    pub data: Option<Value>,
}

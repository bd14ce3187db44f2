//! Keyword-based intent classification.

use serde::{Deserialize, Serialize};

/// The classified purpose of a free-text message, drawn from a fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    /// Overview of all households and their open work.
    Dashboard,
    /// List households/clients.
    ListHouseholds,
    /// Wants to complete a task (id must still be asked for).
    CompleteTaskRequest,
    /// Wants a document validated (id must still be asked for).
    ValidateDocumentRequest,
    /// Wants a meeting pack (household must still be asked for).
    MeetingPackRequest,
    /// Asks about completion times (workflow must still be asked for).
    EtaRequest,
    /// Anything unmatched — answered with a capability summary.
    Help,
}

/// Classify a message by case-insensitive substring matching.
///
/// First match wins, and the order of the checks is load-bearing: the
/// categories share words ("status" can appear in a document question), so
/// earlier rules shadow later ones.
///
/// The completion rule is deliberately asymmetric: "complete" matches on its
/// own, while "done" only counts together with "task".
pub fn classify(message: &str) -> Intent {
    let msg = message.to_lowercase();

    if msg.contains("what's left") || msg.contains("status") || msg.contains("dashboard") {
        Intent::Dashboard
    } else if msg.contains("household") || msg.contains("client") {
        Intent::ListHouseholds
    } else if msg.contains("complete") || (msg.contains("done") && msg.contains("task")) {
        Intent::CompleteTaskRequest
    } else if msg.contains("document") || msg.contains("validate") {
        Intent::ValidateDocumentRequest
    } else if msg.contains("meeting") || msg.contains("pack") {
        Intent::MeetingPackRequest
    } else if msg.contains("eta") || msg.contains("when") || msg.contains("timeline") {
        Intent::EtaRequest
    } else {
        Intent::Help
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_keywords_any_casing() {
        assert_eq!(classify("show me the DASHBOARD"), Intent::Dashboard);
        assert_eq!(classify("What's left today?"), Intent::Dashboard);
        assert_eq!(classify("Status update please"), Intent::Dashboard);
    }

    #[test]
    fn test_dashboard_shadows_later_rules() {
        // "status" wins even when household words are present.
        assert_eq!(classify("status of the Smith household"), Intent::Dashboard);
    }

    #[test]
    fn test_list_households() {
        assert_eq!(classify("show my households"), Intent::ListHouseholds);
        assert_eq!(classify("which clients do I have"), Intent::ListHouseholds);
    }

    #[test]
    fn test_complete_alone_matches_task_completion() {
        // "complete" needs no "task" alongside it.
        assert_eq!(classify("complete"), Intent::CompleteTaskRequest);
        assert_eq!(classify("mark the task as done"), Intent::CompleteTaskRequest);
        // "done" without "task" falls through to later rules.
        assert_eq!(classify("are we done with the meeting"), Intent::MeetingPackRequest);
    }

    #[test]
    fn test_document_validation() {
        assert_eq!(classify("validate this for me"), Intent::ValidateDocumentRequest);
        assert_eq!(classify("is the document okay"), Intent::ValidateDocumentRequest);
    }

    #[test]
    fn test_meeting_pack() {
        assert_eq!(classify("prep the meeting"), Intent::MeetingPackRequest);
        assert_eq!(classify("I need a pack"), Intent::MeetingPackRequest);
    }

    #[test]
    fn test_eta() {
        assert_eq!(classify("eta on the transfer?"), Intent::EtaRequest);
        assert_eq!(classify("tell me the timeline"), Intent::EtaRequest);
    }

    #[test]
    fn test_unmatched_falls_back_to_help() {
        assert_eq!(classify("hello there"), Intent::Help);
        assert_eq!(classify(""), Intent::Help);
        assert_eq!(classify("🦀"), Intent::Help);
    }
}

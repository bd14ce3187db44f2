//! One-shot command-line access to the backend gateway.
//!
//! Prints the backend's JSON to stdout, so output pipes cleanly into jq.

use serde_json::{Value, json};

use crate::error::BackendError;
use crate::gateway::Backend;

const USAGE: &str = "Usage: transition-assist <command> [args]\n\n\
                     Commands:\n  \
                     serve                        Run the HTTP server (default)\n  \
                     repl                         Interactive chat loop\n  \
                     list [advisor_id] [status]   List households\n  \
                     get <household_id>           Get household details\n  \
                     complete <task_id> [note]    Complete a task\n  \
                     validate <doc_id> [url]      Validate document\n  \
                     meeting <household_id>       Get meeting pack\n  \
                     eta <workflow_id>            Get ETA prediction";

/// Execute a single gateway command and print the result as pretty JSON.
///
/// Backend failures print `{"error": ...}` and exit nonzero, keeping stdout
/// machine-readable either way.
pub async fn run(command: &str, args: &[String], gateway: &dyn Backend) -> anyhow::Result<()> {
    let result = match command {
        "list" => {
            let advisor_id = args.first().map(String::as_str);
            let status = args.get(1).map(String::as_str);
            gateway
                .list_households(advisor_id, status)
                .await
                .map(|households| json!(households))
        }
        "get" => {
            let household_id = require_id(args.first(), "household_id")?;
            gateway.get_household(household_id).await
        }
        "complete" => {
            let task_id = require_id(args.first(), "task_id")?;
            let note = args.get(1).map(String::as_str);
            gateway.complete_task(task_id, note).await
        }
        "validate" => {
            let document_id = require_arg(args.first(), "document_id")?;
            let document_url = args.get(1).map(String::as_str);
            gateway.validate_document(document_id, document_url).await
        }
        "meeting" => {
            let household_id = require_id(args.first(), "household_id")?;
            gateway.get_meeting_pack(household_id).await
        }
        "eta" => {
            let workflow_id = require_arg(args.first(), "workflow_id")?;
            gateway.get_eta_prediction(workflow_id).await
        }
        "help" | "--help" => {
            eprintln!("{USAGE}");
            return Ok(());
        }
        other => {
            eprintln!("Unknown command: {other}\n\n{USAGE}");
            std::process::exit(1);
        }
    };

    print_result(result)
}

fn require_arg<'a>(arg: Option<&'a String>, name: &str) -> anyhow::Result<&'a str> {
    match arg {
        Some(value) => Ok(value),
        None => {
            eprintln!("Error: {name} required\n\n{USAGE}");
            std::process::exit(1);
        }
    }
}

fn require_id(arg: Option<&String>, name: &str) -> anyhow::Result<i64> {
    let raw = require_arg(arg, name)?;
    match raw.parse() {
        Ok(id) => Ok(id),
        Err(_) => {
            eprintln!("Error: {name} must be an integer, got {raw:?}");
            std::process::exit(1);
        }
    }
}

fn print_result(result: Result<Value, BackendError>) -> anyhow::Result<()> {
    match result {
        Ok(value) => {
            println!("{}", serde_json::to_string_pretty(&value)?);
            Ok(())
        }
        Err(e) => {
            println!("{}", json!({ "error": e.to_string() }));
            std::process::exit(1);
        }
    }
}

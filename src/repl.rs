//! stdin/stdout chat loop for local testing.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::chat::{self, DEFAULT_SESSION, Dispatcher};

/// Read messages from stdin and print replies until EOF or `/quit`.
///
/// Goes through the same classifier and dispatcher as the HTTP chat
/// endpoint, so replies match what a frontend would see.
pub async fn run(dispatcher: Arc<Dispatcher>) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let reader = BufReader::new(stdin);
    let mut lines = reader.lines();

    eprint!("> ");
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            eprint!("> ");
            continue;
        }
        if line == "/quit" {
            break;
        }

        let intent = chat::classify(line);
        match dispatcher.dispatch(intent, line, DEFAULT_SESSION).await {
            Ok(exchange) => println!("\n{}\n", exchange.response),
            Err(e) => eprintln!("\nerror: {e}\n"),
        }
        eprint!("> ");
    }

    Ok(())
}

use std::sync::Arc;

use transition_assist::chat::Dispatcher;
use transition_assist::cli;
use transition_assist::config::ServerConfig;
use transition_assist::gateway::{Backend, GatewayClient};
use transition_assist::repl;
use transition_assist::server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env()?;

    // One gateway client for every entry point — server, REPL, and one-shot
    // commands all share it.
    let gateway: Arc<dyn Backend> = Arc::new(GatewayClient::new(
        config.backend_url.clone(),
        config.backend_api_key.clone(),
    ));
    let dispatcher = Arc::new(Dispatcher::new(Arc::clone(&gateway)));

    let mode = std::env::args().nth(1);
    match mode.as_deref() {
        None | Some("serve") => serve(config, dispatcher, gateway).await,
        Some("repl") => repl::run(dispatcher).await,
        Some(command) => {
            let args: Vec<String> = std::env::args().skip(2).collect();
            cli::run(command, &args, gateway.as_ref()).await
        }
    }
}

async fn serve(
    config: ServerConfig,
    dispatcher: Arc<Dispatcher>,
    gateway: Arc<dyn Backend>,
) -> anyhow::Result<()> {
    eprintln!("🤖 Transition Assist v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend:  {}", config.backend_url);
    eprintln!("   Chat API: http://{}:{}/chat\n", config.host, config.port);

    let app = server::routes(dispatcher, gateway, config.backend_url.clone());

    let listener = tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;
    tracing::info!(host = %config.host, port = config.port, "Chat server started");
    axum::serve(listener, app).await?;

    Ok(())
}

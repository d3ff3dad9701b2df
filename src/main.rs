use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::io::BufReader;
use tracing::info;
use travel_assistant::{terminal, AppConfig, HttpAskClient, JsonFileStore, SessionManager};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = AppConfig::from_env();
    info!(
        service = %config.service_url,
        history = %config.history_path.display(),
        "starting travel assistant"
    );

    let client = HttpAskClient::new(&config.service_url).with_timeout(config.timeout);
    let store = JsonFileStore::open(&config.history_path);
    let mut session = SessionManager::new(Arc::new(client), Box::new(store));

    let stdin = BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    terminal::run(&mut session, stdin, &mut stdout)
        .await
        .context("terminal session failed")?;

    Ok(())
}

//! Terminal catalog browser.
//!
//! Usage: `shopfront [CATALOG]` where CATALOG is a URL or a JSON file path
//! (defaults to `$SHOPFRONT_CATALOG`, then `products.json`). Commands are read
//! from stdin, one per line; see `shopfront_client::command`.

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use shopfront_client::{
    parse_command, source_for, CatalogController, CatalogLocation, ClientConfig, Command,
    TextRenderer, UiEvent,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ClientConfig::from_env();
    shopfront_observability::tracing::init(config.log_format);

    if let Some(arg) = std::env::args().nth(1) {
        config = config.with_catalog(CatalogLocation::parse(&arg));
    }

    tracing::info!(catalog = %config.catalog, "starting shopfront");

    let source = source_for(&config.catalog);
    let (tx, rx) = mpsc::channel(64);
    let reader = tokio::spawn(read_commands(tx));

    let controller = CatalogController::new(config, TextRenderer::new(std::io::stdout()));
    let controller = controller.run(source.as_ref(), rx).await;

    reader.abort();

    if controller.state().view_state().is_error() {
        anyhow::bail!("catalog could not be loaded from {}", controller.config().catalog);
    }
    Ok(())
}

async fn read_commands(tx: mpsc::Sender<UiEvent>) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::Event(event)) => {
                if tx.send(event).await.is_err() {
                    break;
                }
            }
            Err(err) => tracing::warn!(error = %err, input = %line, "ignoring command"),
        }
    }

    Ok(())
}

//! vds - vulnerability detection response synthesis
//!
//! Reads a scan context document, resolves its candidates against the
//! configured feed store and prints the resulting report entries.

mod cli;
mod display;
mod error;
mod logging;

use crate::cli::{Cli, GlobalArgs};
use crate::display::OutputRenderer;
use crate::error::CliError;
use clap::Parser;
use std::path::Path;
use std::process;
use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};
use vds_config::Config;
use vds_events::EventSender;
use vds_feed::{CachedFeed, FeedLookup, SqliteFeed};
use vds_scanner::ResponseBuilder;
use vds_types::ScanContext;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Configuration comes first so logging can honor it
    let config = match load_config(&cli.global).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    logging::init_tracing(&config, cli.global.debug);

    if let Err(e) = run(cli, config).await {
        error!("Application error: {}", e);
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

/// Defaults < file < environment < command line
async fn load_config(global: &GlobalArgs) -> Result<Config, CliError> {
    let mut config = Config::load_or_default(global.config.as_deref()).await?;
    config.merge_env()?;
    apply_cli_config(&mut config, global);
    Ok(config)
}

fn apply_cli_config(config: &mut Config, global: &GlobalArgs) {
    if let Some(output) = global.output {
        config.general.default_output = output;
    }
    if let Some(feed) = &global.feed {
        config.feed.database_path = Some(feed.clone());
    }
    if global.no_cache {
        config.feed.cache_enabled = false;
    }
    if global.json {
        config.logging.json = true;
    }
}

async fn run(cli: Cli, config: Config) -> Result<(), CliError> {
    info!("Starting vds v{}", env!("CARGO_PKG_VERSION"));

    let mut context = read_context(&cli.context).await?;

    let (event_sender, event_receiver) = vds_events::channel();
    let forwarder = tokio::spawn(logging::forward_events(event_receiver));

    let feed = SqliteFeed::open(config.feed_path()?, config.feed.max_connections)
        .await?
        .with_events(event_sender.clone());

    let result = if config.feed.cache_enabled {
        let ttl = Duration::from_secs(config.feed.cache_ttl_seconds);
        let cached = CachedFeed::new(feed, ttl).with_events(event_sender.clone());
        synthesize(cached, event_sender, &mut context).await
    } else {
        synthesize(feed, event_sender, &mut context).await
    };

    // All senders are gone once synthesis returns; let the forwarder drain
    join_forwarder(forwarder).await;
    result?;

    OutputRenderer::new(config.general.default_output).render(&context.results)?;
    info!("Command completed successfully");
    Ok(())
}

async fn synthesize<F: FeedLookup>(
    feed: F,
    event_sender: EventSender,
    context: &mut ScanContext,
) -> Result<(), CliError> {
    let builder = ResponseBuilder::new(feed).with_events(event_sender);
    builder.synthesize(context).await?;
    Ok(())
}

/// Wait for the event forwarder to drain; `false` if it did not finish cleanly
async fn join_forwarder(forwarder: JoinHandle<()>) -> bool {
    match forwarder.await {
        Ok(()) => true,
        Err(e) => {
            warn!("event forwarder stopped abnormally: {e}");
            false
        }
    }
}

async fn read_context(path: &Path) -> Result<ScanContext, CliError> {
    if path == Path::new("-") {
        return read_context_from(tokio::io::stdin()).await;
    }

    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| vds_errors::Error::io_with_path(&e, path))?;
    parse_context(&raw)
}

async fn read_context_from<R>(mut reader: R) -> Result<ScanContext, CliError>
where
    R: AsyncRead + Unpin,
{
    let mut raw = String::new();
    reader.read_to_string(&mut raw).await?;
    parse_context(&raw)
}

fn parse_context(raw: &str) -> Result<ScanContext, CliError> {
    serde_json::from_str(raw).map_err(|e| CliError::InvalidContext(e.to_string()))
}

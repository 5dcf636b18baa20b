mod console;
mod driver;
mod script;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use feed_composer::Collaborators;
use feed_composer::Composer;
use feed_composer::ComposerConfig;
use feed_composer::ComposerEventSender;
use feed_composer_protocol::FeedContext;
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use crate::console::Console;
use crate::driver::Driver;

#[derive(Parser, Debug)]
#[command(
    version,
    about = "Drive a feed message composer from a script, logging collaborator calls as JSON lines"
)]
struct Cli {
    /// Composer configuration file. Defaults to `~/.feed-composer/config.toml`.
    #[arg(long, env = "FEED_COMPOSER_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, default_value = "workspace")]
    workspace: String,

    #[arg(long, default_value = "feed")]
    feed: String,

    /// Preferred language attached to published messages.
    #[arg(long)]
    language: Option<String>,

    /// Publish without notifying feed subscribers.
    #[arg(long)]
    silent: bool,

    /// Act as a limited workspace member: templates and fleet messages are unavailable.
    #[arg(long)]
    limited_member: bool,

    /// Script to run. Reads stdin when omitted.
    script: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Honor `RUST_LOG`; stdout is reserved for the JSON lines.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = load_config(cli.config.as_deref())?;
    let script = read_script(cli.script.as_deref()).await?;
    let commands = script::parse_script(&script)?;

    let console = Arc::new(Console::stdout());
    let collaborators = Collaborators {
        publish: console.clone(),
        upload: console.clone(),
        feed: console.clone(),
        analytics: console.clone(),
    };
    let feed = FeedContext {
        workspace_id: cli.workspace,
        feed_id: cli.feed,
        preferred_language: cli.language,
        is_silent: cli.silent,
        limited_member: cli.limited_member,
    };
    let (composer_event_tx, composer_event_rx) = tokio::sync::mpsc::unbounded_channel();
    let composer = Composer::new(
        config,
        feed,
        collaborators,
        ComposerEventSender::new(composer_event_tx),
    );

    tracing::info!(commands = commands.len(), "running script");
    Driver::new(composer, console, composer_event_rx)
        .run(commands)
        .await;
    Ok(())
}

fn load_config(path: Option<&std::path::Path>) -> anyhow::Result<ComposerConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match feed_composer::default_config_path() {
            Some(path) => path,
            None => {
                tracing::warn!("no home directory; using the default composer config");
                return Ok(ComposerConfig::default());
            }
        },
    };
    feed_composer::load_composer_config(&path)
        .with_context(|| format!("load composer config from {}", path.display()))
}

async fn read_script(path: Option<&std::path::Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("read script {}", path.display())),
        None => {
            let mut script = String::new();
            tokio::io::stdin()
                .read_to_string(&mut script)
                .await
                .context("read script from stdin")?;
            Ok(script)
        }
    }
}

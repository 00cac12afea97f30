//! Deckscout CLI - find pitch decks in a mailbox and save their attachments.

use anyhow::Context;
use clap::Parser;
use deckscout_cli::cli::{ConfigAction, ConfigArgs};
use deckscout_cli::commands;
use deckscout_cli::{Cli, Command, Config, Formatter};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.no_color);

    let config_path = match cli.config {
        Some(path) => path,
        None => Config::path()?,
    };

    // A broken file must not prevent writing a fresh one
    let mut config = match &cli.command {
        Command::Config(ConfigArgs {
            action: ConfigAction::Init { .. },
        }) => Config::default(),
        _ => Config::load_from(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()))?,
    };

    if let Some(token) = cli.gmail_token {
        config.gmail.access_token = Some(token);
    }
    if let Some(token) = cli.huggingface_token {
        config.huggingface.access_token = Some(token);
    }
    if let Some(key) = cli.openai_key {
        config.openai.api_key = Some(key);
    }

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command {
        Command::Scan(args) => commands::execute_scan(args, &config, &formatter).await?,
        Command::Watch(args) => commands::execute_watch(args, &config, &formatter).await?,
        Command::Classify(args) => commands::execute_classify(args, &config, &formatter).await?,
        Command::Decode(args) => commands::execute_decode(args, &config, &formatter).await?,
        Command::Config(args) => {
            commands::execute_config(args, &config, &config_path, &formatter).await?
        }
    }

    Ok(())
}

fn init_tracing(no_color: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("deckscout=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(!no_color)
        .init();
}

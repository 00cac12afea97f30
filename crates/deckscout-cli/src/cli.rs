//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Deckscout - Find pitch decks in a mailbox and save their attachments.
#[derive(Debug, Parser)]
#[command(name = "deckscout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Gmail OAuth access token
    #[arg(long, env = "GMAIL_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub gmail_token: Option<String>,

    /// HuggingFace inference token
    #[arg(long, env = "HUGGINGFACE_ACCESS_TOKEN", global = true, hide_env_values = true)]
    pub huggingface_token: Option<String>,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", global = true, hide_env_values = true)]
    pub openai_key: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (file names / verdicts only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Scan the newest messages once and save pitch-deck attachments
    Scan(ScanArgs),

    /// Scan on an interval until interrupted
    Watch(WatchArgs),

    /// Classify a subject and body without touching the mailbox
    Classify(ClassifyArgs),

    /// Decode a message JSON file as returned by the Gmail API
    Decode(DecodeArgs),

    /// Manage the configuration file
    Config(ConfigArgs),
}

/// Arguments for the scan command.
#[derive(Debug, Parser)]
pub struct ScanArgs {
    /// Number of newest messages to look at
    #[arg(short, long)]
    pub max_results: Option<u32>,

    /// Mailbox address for the self-sent check (defaults to the profile address)
    #[arg(short, long)]
    pub self_address: Option<String>,
}

/// Arguments for the watch command.
#[derive(Debug, Parser)]
pub struct WatchArgs {
    /// Seconds between scans
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Mailbox address for the self-sent check (defaults to the profile address)
    #[arg(short, long)]
    pub self_address: Option<String>,
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Email subject
    #[arg(short, long, default_value = "")]
    pub subject: String,

    /// Email body
    #[arg(short, long, default_value = "")]
    pub body: String,
}

/// Arguments for the decode command.
#[derive(Debug, Parser)]
pub struct DecodeArgs {
    /// Path to the message JSON
    pub file: PathBuf,
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration (secrets redacted)
    Show,

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

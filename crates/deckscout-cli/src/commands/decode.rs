//! Decode command implementation.

use crate::cli::DecodeArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::build_decoder;
use deckscout_domain::{DecodedEmail, MailMessage};
use std::fs;
use std::path::Path;

/// Execute the decode command.
pub async fn execute_decode(
    args: DecodeArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let email = decode_file(&args.file, config)?;
    println!("{}", formatter.format_decoded(&email)?);
    Ok(())
}

/// Decode a Gmail message JSON file.
pub fn decode_file(path: &Path, config: &Config) -> Result<DecodedEmail> {
    let contents = fs::read_to_string(path)?;
    let message: MailMessage = serde_json::from_str(&contents)?;
    Ok(build_decoder(config)?.decode_message(&message))
}

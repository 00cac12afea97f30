//! Scan command implementation.

use crate::cli::ScanArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::build_extractor;
use deckscout_extractor::Scanner;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Execute the scan command.
pub async fn execute_scan(args: ScanArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let mut config = config.clone();
    if let Some(max_results) = args.max_results {
        config.extractor.max_results = max_results;
    }
    config.validate()?;

    let scanner = Scanner::new(build_extractor(&config)?);
    let self_address = args.self_address.or_else(|| config.gmail.self_address.clone());

    let run_id = Uuid::now_v7();
    let report = scanner
        .scan(self_address.as_deref())
        .instrument(info_span!("scan", %run_id))
        .await?;

    println!("{}", formatter.format_report(&report)?);
    Ok(())
}

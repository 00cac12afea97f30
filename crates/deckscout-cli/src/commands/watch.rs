//! Watch command implementation.

use crate::cli::WatchArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use crate::pipeline::build_extractor;
use deckscout_extractor::{ScanWorker, Scanner};
use std::time::Duration;
use tracing::{info_span, Instrument};
use uuid::Uuid;

/// Execute the watch command.
pub async fn execute_watch(args: WatchArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let interval = match args.interval {
        Some(0) => return Err(CliError::InvalidInput("interval must be greater than 0".into())),
        Some(secs) => Duration::from_secs(secs),
        None => config.extractor.poll_interval(),
    };

    let mut worker = ScanWorker::new(Scanner::new(build_extractor(config)?), interval);
    if let Some(address) = args.self_address.or_else(|| config.gmail.self_address.clone()) {
        worker = worker.with_self_address(address);
    }

    println!(
        "{}",
        formatter.info(&format!(
            "Watching mailbox every {}s, press Ctrl+C to stop",
            interval.as_secs()
        ))
    );

    let run_id = Uuid::now_v7();
    worker.run().instrument(info_span!("watch", %run_id)).await?;

    let metrics = worker.metrics();
    println!(
        "{}",
        formatter.success(&format!(
            "Stopped after {} scan(s): {} pitch deck(s), {} attachment(s) saved",
            metrics.scan_count, metrics.decks_found, metrics.attachments_saved
        ))
    );
    Ok(())
}

//! Classify command implementation.

use crate::cli::ClassifyArgs;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use crate::pipeline::build_classifier;

/// Execute the classify command.
pub async fn execute_classify(
    args: ClassifyArgs,
    config: &Config,
    formatter: &Formatter,
) -> Result<()> {
    let classifier = build_classifier(config)?;
    let classification = classifier
        .classify_detailed(&args.subject, &args.body)
        .await;

    println!("{}", formatter.format_classification(&classification)?);
    Ok(())
}

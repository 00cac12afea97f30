//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use deckscout_classifier::Classification;
use deckscout_domain::DecodedEmail;
use deckscout_extractor::ScanReport;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest subject/body excerpt shown in a table cell
const EXCERPT_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a scan.
    pub fn format_report(&self, report: &ScanReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Table => Ok(self.format_report_table(report)),
            OutputFormat::Quiet => Ok(report
                .extracted
                .iter()
                .flat_map(|(_, result)| result.attachments.iter().cloned())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_report_table(&self, report: &ScanReport) -> String {
        if report.extracted.is_empty() {
            return self.colorize(
                &format!("No pitch decks found in {} message(s).", report.scanned),
                "yellow",
            );
        }

        let mut builder = Builder::default();
        builder.push_record(["Message", "From", "Subject", "Attachments"]);

        for (message_id, result) in &report.extracted {
            let subject = excerpt(&result.subject);
            let attachments = result.attachments.join("\n");
            builder.push_record([
                message_id.as_str(),
                result.from.as_str(),
                subject.as_str(),
                attachments.as_str(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        format!(
            "{}\n{}",
            table,
            self.success(&format!(
                "{} pitch deck(s), {} attachment(s) saved from {} message(s)",
                report.extracted.len(),
                report.attachments_saved(),
                report.scanned
            ))
        )
    }

    /// Format a classification outcome.
    pub fn format_classification(&self, classification: &Classification) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "verdict": classification.verdict,
                "tier": classification.tier,
                "score": classification.score.map(|s| s.probability()),
            }))?),
            OutputFormat::Quiet => Ok(classification.verdict.to_string()),
            OutputFormat::Table => {
                let verdict = if classification.verdict {
                    self.colorize("pitch deck", "green")
                } else {
                    self.colorize("no pitch deck", "yellow")
                };
                let score = classification
                    .score
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());

                let mut builder = Builder::default();
                builder.push_record(["Verdict", "Tier", "Score"]);
                builder.push_record([
                    verdict.as_str(),
                    classification.tier.as_str(),
                    score.as_str(),
                ]);

                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a decoded email.
    pub fn format_decoded(&self, email: &DecodedEmail) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(email)?),
            OutputFormat::Quiet => Ok(email.body.clone()),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Value"]);
                builder.push_record(["From", email.from_email.as_str()]);
                builder.push_record(["Subject", email.subject.as_str()]);
                builder.push_record(["Body", email.body.as_str()]);

                let mut table = builder.build();
                table.with(Style::rounded());
                Ok(table.to_string())
            }
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn excerpt(text: &str) -> String {
    if text.chars().count() <= EXCERPT_CHARS {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(EXCERPT_CHARS - 1).collect();
    cut.push('…');
    cut
}

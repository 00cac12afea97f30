//! Metrics collection for scan operations

use crate::scanner::ScanReport;

/// Counters accumulated over the scans a worker has run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanMetrics {
    /// Scans completed
    pub scan_count: usize,

    /// Scans that failed before any message was looked at
    pub failed_scans: usize,

    /// Messages looked at across all scans
    pub messages_scanned: usize,

    /// Messages that yielded a pitch deck
    pub decks_found: usize,

    /// Attachments saved
    pub attachments_saved: usize,

    /// Total runtime in seconds
    pub total_runtime_secs: u64,
}

impl ScanMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed scan
    pub fn record_scan(&mut self, report: &ScanReport) {
        self.scan_count += 1;
        self.messages_scanned += report.scanned;
        self.decks_found += report.extracted.len();
        self.attachments_saved += report.attachments_saved();
    }

    /// Record a failed scan
    pub fn record_failure(&mut self) {
        self.failed_scans += 1;
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Scan Metrics Summary".to_string(),
            "====================".to_string(),
            format!("Scans: {} ({} failed)", self.scan_count, self.failed_scans),
            format!("Messages scanned: {}", self.messages_scanned),
            format!("Pitch decks found: {}", self.decks_found),
            format!("Attachments saved: {}", self.attachments_saved),
            format!("Total runtime: {}s", self.total_runtime_secs),
        ]
        .join("\n")
    }
}

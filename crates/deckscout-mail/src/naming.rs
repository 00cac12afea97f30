//! Generated file names for saved attachments

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Splice a timestamp between a file's base name and its extension
///
/// Path separators in the source name are replaced so the result always
/// names a file directly inside the storage directory.
///
/// # Examples
///
/// ```
/// use deckscout_mail::naming::generate_file_name;
///
/// assert_eq!(generate_file_name("deck.pdf", 1700000000000), "deck1700000000000.pdf");
/// assert_eq!(generate_file_name("deck.v2.pdf", 7), "deck.v27.pdf");
/// assert_eq!(generate_file_name("README", 7), "README7");
/// ```
pub fn generate_file_name(source: &str, timestamp_ms: u64) -> String {
    let source = source.replace(['/', '\\'], "_");

    match source.rsplit_once('.') {
        Some((base, extension)) => format!("{}{}.{}", base, timestamp_ms, extension),
        None => format!("{}{}", source, timestamp_ms),
    }
}

/// Issues file names from a millisecond clock that never repeats a value
///
/// Two names requested within the same millisecond get consecutive
/// timestamps, so repeated source names still map to distinct files.
#[derive(Debug, Default)]
pub struct FileNamer {
    last: AtomicU64,
}

impl FileNamer {
    /// Create a namer
    pub fn new() -> Self {
        Self::default()
    }

    /// Next timestamp, strictly greater than any previously issued
    pub fn next_timestamp(&self) -> u64 {
        let now = now_ms();
        let bump = |last: u64| now.max(last.saturating_add(1));
        let previous = match self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(bump(last)))
        {
            Ok(previous) | Err(previous) => previous,
        };
        bump(previous)
    }

    /// Generate a fresh name for a source file name
    pub fn name(&self, source: &str) -> String {
        generate_file_name(source, self.next_timestamp())
    }
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

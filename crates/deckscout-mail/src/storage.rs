//! Filesystem attachment storage

use crate::error::MailError;
use async_trait::async_trait;
use deckscout_domain::traits::AttachmentStore;
use deckscout_domain::AttachmentRecord;
use std::path::{Path, PathBuf};
use tracing::info;

/// Default directory attachments are written to
pub const DEFAULT_ATTACHMENTS_DIR: &str = "./attachmentsDownloaded";

/// Writes each attachment to `<root>/<generated file name>`
///
/// The root directory is created on first save.
#[derive(Debug, Clone)]
pub struct FilesystemStore {
    root: PathBuf,
}

impl FilesystemStore {
    /// Create a store rooted at the given directory
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Directory attachments are written to
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path a generated file name is stored under
    pub fn path_for(&self, generated_file_name: &str) -> PathBuf {
        self.root.join(generated_file_name)
    }
}

impl Default for FilesystemStore {
    fn default() -> Self {
        Self::new(DEFAULT_ATTACHMENTS_DIR)
    }
}

#[async_trait]
impl AttachmentStore for FilesystemStore {
    type Error = MailError;

    async fn save(&self, record: AttachmentRecord) -> Result<(), Self::Error> {
        tokio::fs::create_dir_all(&self.root).await?;

        let path = self.path_for(&record.generated_file_name);
        tokio::fs::write(&path, &record.bytes).await?;

        info!(
            file = %path.display(),
            source = %record.source_file_name,
            bytes = record.len(),
            "Attachment saved"
        );
        Ok(())
    }
}

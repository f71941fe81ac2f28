pub mod file;
pub mod folder;

pub use file::FileService;
pub use folder::FolderService;

use crate::models::FileRecord;
use crate::storage::BlobStore;

/// Outcome of a blob sweep: which stored filenames were removed from disk and
/// which were not. Callers branch on this instead of an error, since a partial
/// failure is an expected state, not an exception.
#[derive(Debug, Default)]
pub struct RemovalReport {
    pub deleted: Vec<String>,
    pub failed: Vec<String>,
}

impl RemovalReport {
    pub fn any_deleted(&self) -> bool {
        !self.deleted.is_empty()
    }

    /// Split into the deleted list and an `Option` of failures, `None` when
    /// everything went.
    pub fn into_parts(self) -> (Vec<String>, Option<Vec<String>>) {
        let failed = if self.failed.is_empty() {
            None
        } else {
            Some(self.failed)
        };
        (self.deleted, failed)
    }
}

/// Try to remove every record's blob, continuing past individual failures.
/// A blob that is already absent counts as a failed deletion, same as an IO
/// error: the bytes were not removed by this call.
pub(crate) async fn sweep_blobs(blobs: &BlobStore, records: &[FileRecord]) -> RemovalReport {
    let mut report = RemovalReport::default();

    for record in records {
        match blobs.remove(&record.filename).await {
            Ok(true) => {
                tracing::info!("Deleted blob: {}", record.filename);
                report.deleted.push(record.filename.clone());
            }
            Ok(false) => {
                tracing::warn!("Blob already absent: {}", record.filename);
                report.failed.push(record.filename.clone());
            }
            Err(e) => {
                tracing::error!("Error deleting blob {}: {}", record.filename, e);
                report.failed.push(record.filename.clone());
            }
        }
    }

    report
}

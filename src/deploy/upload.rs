use tracing::{error, info, warn};

use super::storage::{PutOutcome, StorageClient};
use super::walk::UploadUnit;

/// Per-file outcome counts for one deploy run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadTally {
    pub succeeded: usize,
    pub failed: usize,
}

impl UploadTally {
    pub fn attempted(&self) -> usize {
        self.succeeded + self.failed
    }
}

/// Upload each unit in order, one at a time.
///
/// A file that cannot be read, is rejected, or errors is logged and counted
/// as failed; the loop always moves on to the next file.
pub async fn upload_all<S>(units: &[UploadUnit], storage: &S) -> UploadTally
where
    S: StorageClient + ?Sized,
{
    let mut tally = UploadTally::default();

    for unit in units {
        info!("Uploading: {} -> {}", unit.relative_path, unit.remote_path);

        let bytes = match tokio::fs::read(&unit.local_path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!("Could not read {}: {}", unit.relative_path, e);
                tally.failed += 1;
                continue;
            }
        };

        match storage.put_file(&unit.remote_path, bytes).await {
            Ok(PutOutcome::Stored) => tally.succeeded += 1,
            Ok(PutOutcome::Rejected(reason)) => {
                warn!("Upload failed (rejected): {}: {}", unit.relative_path, reason);
                tally.failed += 1;
            }
            Err(e) => {
                error!("Upload error for {}: {}", unit.relative_path, e);
                tally.failed += 1;
            }
        }
    }

    tally
}

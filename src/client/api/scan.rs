//! Scan API trait

use std::path::Path;

use async_trait::async_trait;

use crate::client::models::{CreateScanResponse, OsaScanStatus};
use crate::error::Result;

/// Scan submission and status operations
#[async_trait]
pub trait ScanApi: Send + Sync {
    /// Upload a zipped source archive and start an OSA scan.
    ///
    /// Expects `202 Accepted`.
    async fn create_scan(&self, project_id: u64, archive: &Path) -> Result<CreateScanResponse>;

    /// Current status of a scan. Polling is left to the caller.
    async fn get_scan_status(&self, scan_id: &str) -> Result<OsaScanStatus>;
}

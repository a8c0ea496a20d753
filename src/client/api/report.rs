//! Report API trait

use async_trait::async_trait;

use crate::client::models::OsaSummaryResults;
use crate::error::Result;

/// Result retrieval for a project's latest OSA scan
#[async_trait]
pub trait ReportApi: Send + Sync {
    /// Aggregate findings
    async fn get_summary_results(&self, project_id: u64) -> Result<OsaSummaryResults>;

    /// HTML report, returned as-is
    async fn get_html_results(&self, project_id: u64) -> Result<String>;

    /// PDF report, returned as raw bytes
    async fn get_pdf_results(&self, project_id: u64) -> Result<Vec<u8>>;
}

//! Client for the Open Source Analysis (OSA) workflow of the CxRestAPI
//!
//! Log in, submit a zipped source archive, poll the scan status and
//! fetch the summary, HTML and PDF results.
//!
//! ```no_run
//! use std::path::Path;
//!
//! use osa_client::{AuthApi, Credentials, OsaClient, ReportApi, ScanApi};
//!
//! # async fn run() -> osa_client::Result<()> {
//! let client = OsaClient::new("https://cx.example.com")?;
//! client.login(&Credentials::new("admin", "secret")).await?;
//!
//! let scan = client.create_scan(42, Path::new("sources.zip")).await?;
//! let status = client.get_scan_status(&scan.scan_id).await?;
//! if status.status.is_terminal() {
//!     let summary = client.get_summary_results(42).await?;
//!     println!("{} vulnerabilities", summary.total_vulnerabilities());
//! }
//!
//! client.destroy().await;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::{
    AuthApi, CSRF_TOKEN_HEADER, CreateScanResponse, Credentials, OSA_ZIPPED_FILE_KEY_NAME, OsaApi,
    OsaClient, OsaScanStatus, OsaSummaryResults, ReportApi, ScanApi, ScanState, SessionState,
};
pub use config::ClientConfig;
pub use error::{ApiError, ConfigError, Error, Operation, Result};

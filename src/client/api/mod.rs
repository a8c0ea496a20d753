//! API trait definitions split by responsibility
//!
//! This module organizes the OSA API surface into focused sub-traits:
//! - [`AuthApi`] - Session login
//! - [`ScanApi`] - Scan submission and status polling
//! - [`ReportApi`] - Summary and report retrieval
//!
//! The [`OsaApi`](super::OsaApi) super-trait combines all three.

mod auth;
mod report;
mod scan;

pub use auth::AuthApi;
pub use report::ReportApi;
pub use scan::ScanApi;

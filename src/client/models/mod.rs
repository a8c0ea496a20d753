//! OSA REST API data models
//!
//! Transport types sent to and returned by the CxRestAPI OSA endpoints.

mod auth;
mod scan;
mod summary;

pub use auth::Credentials;
pub use scan::{CreateScanResponse, OsaScanStatus, ScanState};
pub use summary::OsaSummaryResults;

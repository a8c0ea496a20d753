//! CxRestAPI OSA client

pub mod api;
pub mod models;
pub mod osa;
pub mod session;

pub use api::{AuthApi, ReportApi, ScanApi};
pub use models::{CreateScanResponse, Credentials, OsaScanStatus, OsaSummaryResults, ScanState};
pub use osa::{OSA_ZIPPED_FILE_KEY_NAME, OsaClient};
pub use session::{CSRF_TOKEN_HEADER, SessionState};

/// Full OSA API surface
///
/// Combines [`AuthApi`], [`ScanApi`] and [`ReportApi`]; implemented for
/// every type that implements all three.
pub trait OsaApi: AuthApi + ScanApi + ReportApi {}

impl<T: AuthApi + ScanApi + ReportApi> OsaApi for T {}

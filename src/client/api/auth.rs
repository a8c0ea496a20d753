//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::Credentials;
use crate::error::Result;

/// Authentication operations for the OSA API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Start a new session.
    ///
    /// Any previous session cookies and CSRF token are discarded before the
    /// request is sent. Succeeds only on `200 OK`.
    async fn login(&self, credentials: &Credentials) -> Result<()>;
}

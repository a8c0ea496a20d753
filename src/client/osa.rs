//! CxRestAPI OSA client implementation

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use reqwest::multipart::{Form, Part};
use reqwest::{Client as HttpClient, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tokio::sync::RwLock;

use super::api::{AuthApi, ReportApi, ScanApi};
use super::models::{CreateScanResponse, Credentials, OsaScanStatus, OsaSummaryResults};
use super::session::SessionState;
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError, Operation, Result};

/// Path segment appended to the host to form the API root
const ROOT_PATH: &str = "CxRestAPI";

/// Multipart field name for the zipped sources
pub const OSA_ZIPPED_FILE_KEY_NAME: &str = "OSAZippedSourceCode";

const OCTET_STREAM: &str = "application/octet-stream";

/// OSA API client.
///
/// Owns its HTTP connection pool and its session. Cookies and the CSRF
/// token captured by one client are never seen by another.
pub struct OsaClient {
    http: RwLock<Option<HttpClient>>,
    api_root: Url,
    session: RwLock<SessionState>,
}

impl fmt::Debug for OsaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // None while destroy() holds the lock
        let destroyed = self.http.try_read().ok().map(|http| http.is_none());
        f.debug_struct("OsaClient")
            .field("api_root", &self.api_root.as_str())
            .field("destroyed", &destroyed)
            .finish_non_exhaustive()
    }
}

impl OsaClient {
    /// Create a client for the given host. No request is sent.
    pub fn new(host: &str) -> Result<Self> {
        Self::from_config(&ClientConfig::new(host))
    }

    /// Create a client from a connection profile
    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        config.validate()?;
        let api_root = api_root(&config.host)?;

        let mut builder = HttpClient::builder();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ConfigError::Invalid(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http: RwLock::new(Some(http)),
            api_root,
            session: RwLock::new(SessionState::default()),
        })
    }

    /// Root URL all endpoint paths are resolved against
    pub fn api_root(&self) -> &Url {
        &self.api_root
    }

    /// Snapshot of the session cookies, in the order they were received
    pub async fn cookies(&self) -> Vec<(String, String)> {
        self.session.read().await.cookies().to_vec()
    }

    /// Current CSRF token, if the server issued one
    pub async fn csrf_token(&self) -> Option<String> {
        self.session.read().await.csrf_token().map(str::to_string)
    }

    /// Release the connection pool and forget the session.
    ///
    /// Later calls on this client fail with [`ApiError::ClientClosed`].
    pub async fn destroy(&self) {
        match self.http.write().await.take() {
            Some(_) => debug!("OSA client destroyed"),
            None => debug!("OSA client already destroyed"),
        }
        self.session.write().await.clear();
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_root.clone();
        // api_root is checked to be a base URL at construction
        if let Ok(mut path) = url.path_segments_mut() {
            path.extend(segments);
        }
        url
    }

    /// Start a request on the live HTTP client
    async fn request(&self, method: Method, url: Url) -> Result<RequestBuilder> {
        let http = self.http.read().await.clone().ok_or(ApiError::ClientClosed)?;
        debug!("{} {}", method, url);
        Ok(http.request(method, url))
    }

    /// Send a request through the session hooks
    async fn execute(&self, operation: Operation, request: RequestBuilder) -> Result<Response> {
        let request = self.session.read().await.apply(request);

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::network(operation, e))?;

        self.session.write().await.absorb(response.headers());
        debug!("{} -> {}", response.url(), response.status());

        Ok(response)
    }

    /// GET an endpoint and require `200 OK`
    async fn get(&self, operation: Operation, segments: &[&str]) -> Result<Response> {
        let request = self.request(Method::GET, self.endpoint(segments)).await?;
        let response = self.execute(operation, request).await?;
        validate_response(&response, StatusCode::OK, operation)?;
        Ok(response)
    }
}

#[async_trait]
impl AuthApi for OsaClient {
    async fn login(&self, credentials: &Credentials) -> Result<()> {
        let request = self
            .request(Method::POST, self.endpoint(&["auth", "login"]))
            .await?
            .json(credentials);

        self.session.write().await.clear();

        let response = self.execute(Operation::Login, request).await?;
        validate_response(&response, StatusCode::OK, Operation::Login)?;

        debug!("Logged in as {}", credentials.username);
        Ok(())
    }
}

#[async_trait]
impl ScanApi for OsaClient {
    async fn create_scan(&self, project_id: u64, archive: &Path) -> Result<CreateScanResponse> {
        let operation = Operation::CreateScan;
        let project_id = project_id.to_string();
        let request = self
            .request(
                Method::POST,
                self.endpoint(&["projects", &project_id, "scans"]),
            )
            .await?;

        let file = tokio::fs::File::open(archive).await?;
        let length = file.metadata().await?.len();
        let file_name = archive
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "sources.zip".to_string());
        debug!("Uploading {} ({} bytes)", file_name, length);

        // The part reads from the file as the body is sent
        let part = Part::stream_with_length(file, length)
            .file_name(file_name)
            .mime_str(OCTET_STREAM)
            .map_err(|e| ApiError::network(operation, e))?;
        let form = Form::new().part(OSA_ZIPPED_FILE_KEY_NAME, part);

        let request = request.header(ACCEPT, "application/json").multipart(form);
        let response = self.execute(operation, request).await?;
        validate_response(&response, StatusCode::ACCEPTED, operation)?;

        decode(response, operation).await
    }

    async fn get_scan_status(&self, scan_id: &str) -> Result<OsaScanStatus> {
        let operation = Operation::ScanStatus;
        let response = self.get(operation, &["scans", scan_id]).await?;
        decode(response, operation).await
    }
}

#[async_trait]
impl ReportApi for OsaClient {
    async fn get_summary_results(&self, project_id: u64) -> Result<OsaSummaryResults> {
        let operation = Operation::SummaryResults;
        let project_id = project_id.to_string();
        let response = self
            .get(operation, &["projects", &project_id, "summaryresults"])
            .await?;
        decode(response, operation).await
    }

    async fn get_html_results(&self, project_id: u64) -> Result<String> {
        let operation = Operation::HtmlResults;
        let project_id = project_id.to_string();
        let response = self
            .get(
                operation,
                &["projects", &project_id, "opensourceanalysis", "htmlresults"],
            )
            .await?;

        let html = response
            .text()
            .await
            .map_err(|e| ApiError::network(operation, e))?;
        Ok(html)
    }

    async fn get_pdf_results(&self, project_id: u64) -> Result<Vec<u8>> {
        let operation = Operation::PdfResults;
        let project_id = project_id.to_string();
        let response = self
            .get(
                operation,
                &["projects", &project_id, "opensourceanalysis", "pdfresults"],
            )
            .await?;

        let pdf = response
            .bytes()
            .await
            .map_err(|e| ApiError::network(operation, e))?;
        Ok(pdf.to_vec())
    }
}

/// Build `<host>/CxRestAPI` from the configured host URL
fn api_root(host: &str) -> Result<Url> {
    let mut url = Url::parse(host.trim())
        .map_err(|e| ConfigError::Invalid(format!("Invalid host URL '{}': {}", host, e)))?;
    url.set_query(None);
    url.set_fragment(None);

    url.path_segments_mut()
        .map_err(|_| ConfigError::Invalid(format!("Host URL '{}' cannot be a base", host)))?
        .pop_if_empty()
        .push(ROOT_PATH);

    Ok(url)
}

/// Require exactly one expected status code
fn validate_response(response: &Response, expected: StatusCode, operation: Operation) -> Result<()> {
    let status = response.status();
    if status != expected {
        return Err(ApiError::UnexpectedStatus { operation, status }.into());
    }
    Ok(())
}

/// Read the full body and parse it as JSON.
///
/// The raw body only goes to the debug log, never into the error.
async fn decode<T: DeserializeOwned>(response: Response, operation: Operation) -> Result<T> {
    let body = response
        .text()
        .await
        .map_err(|e| ApiError::network(operation, e))?;

    serde_json::from_str(&body).map_err(|e| {
        debug!("fail to parse json response: [{}]: {}", body, e);
        ApiError::Decode {
            operation,
            reason: e.to_string(),
        }
        .into()
    })
}

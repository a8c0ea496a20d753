//! Error types for the OSA client

use std::fmt;

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for OSA client operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the crate
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// REST operations exposed by the client.
///
/// The `Display` form is the label that prefixes every failure message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Login,
    CreateScan,
    ScanStatus,
    SummaryResults,
    HtmlResults,
    PdfResults,
}

impl Operation {
    /// Human-readable failure label for this operation
    pub fn label(self) -> &'static str {
        match self {
            Operation::Login => "fail to perform login",
            Operation::CreateScan => "fail create OSA scan",
            Operation::ScanStatus => "fail get OSA scan status",
            Operation::SummaryResults => "fail get OSA scan summary results",
            Operation::HtmlResults => "fail get OSA scan html results",
            Operation::PdfResults => "fail get OSA scan pdf results",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// API-related errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{operation}: {status}")]
    UnexpectedStatus {
        operation: Operation,
        status: StatusCode,
    },

    #[error("{operation}: fail to parse json response: {reason}")]
    Decode { operation: Operation, reason: String },

    #[error("{operation}: {reason}")]
    Network { operation: Operation, reason: String },

    #[error("Client has been destroyed and can no longer send requests")]
    ClientClosed,
}

impl ApiError {
    /// Wrap a transport failure for the given operation
    pub(crate) fn network(operation: Operation, err: reqwest::Error) -> Self {
        let reason = if err.is_timeout() {
            "Request timed out".to_string()
        } else if err.is_connect() {
            "Failed to connect to API".to_string()
        } else {
            err.to_string()
        };
        ApiError::Network { operation, reason }
    }

    /// The operation that failed, if the error is tied to one
    pub fn operation(&self) -> Option<Operation> {
        match self {
            ApiError::UnexpectedStatus { operation, .. }
            | ApiError::Decode { operation, .. }
            | ApiError::Network { operation, .. } => Some(*operation),
            ApiError::ClientClosed => None,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found")]
    NotFound,

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error("Username and password must both be configured to log in")]
    MissingCredentials,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

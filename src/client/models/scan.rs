//! Scan models

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Response to a successful OSA scan submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateScanResponse {
    /// Identifier used to poll the scan status
    pub scan_id: String,

    /// Server link to the scan resource
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Status of an OSA scan as reported by the server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsaScanStatus {
    pub status: ScanState,

    /// Server message, typically set when the scan failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Analysis start time, as formatted by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_analyze_time: Option<String>,

    /// Analysis end time, as formatted by the server
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_analyze_time: Option<String>,
}

/// Lifecycle state of an OSA scan.
///
/// The server reports it either as a numeric code, as a name, or as an
/// `{ "id": .., "value": .. }` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanState {
    NotStarted,
    InProgress,
    Finished,
    Failed,
    Unknown(String),
}

impl ScanState {
    fn from_code(code: i64) -> Self {
        match code {
            0 => ScanState::NotStarted,
            1 => ScanState::InProgress,
            2 => ScanState::Finished,
            3 => ScanState::Failed,
            other => ScanState::Unknown(other.to_string()),
        }
    }

    fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "none" | "notstarted" => ScanState::NotStarted,
            "inprogress" => ScanState::InProgress,
            "finished" => ScanState::Finished,
            "failed" => ScanState::Failed,
            _ => ScanState::Unknown(name.to_string()),
        }
    }

    /// Name used when serializing the state
    pub fn as_str(&self) -> &str {
        match self {
            ScanState::NotStarted => "NotStarted",
            ScanState::InProgress => "InProgress",
            ScanState::Finished => "Finished",
            ScanState::Failed => "Failed",
            ScanState::Unknown(raw) => raw,
        }
    }

    /// Whether the scan will not change state any further
    pub fn is_terminal(&self) -> bool {
        matches!(self, ScanState::Finished | ScanState::Failed)
    }
}

impl Serialize for ScanState {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ScanState {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum StateValue {
            Code(i64),
            Name(String),
            Pair {
                id: Option<i64>,
                value: Option<String>,
            },
        }

        Ok(match StateValue::deserialize(deserializer)? {
            StateValue::Code(code) => ScanState::from_code(code),
            StateValue::Name(name) => ScanState::from_name(&name),
            StateValue::Pair {
                value: Some(name), ..
            } => ScanState::from_name(&name),
            StateValue::Pair {
                id: Some(code),
                value: None,
            } => ScanState::from_code(code),
            StateValue::Pair {
                id: None,
                value: None,
            } => ScanState::Unknown(String::new()),
        })
    }
}

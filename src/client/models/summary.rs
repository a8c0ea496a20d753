//! Summary result models

use serde::{Deserialize, Serialize};

/// Aggregate OSA findings for a project
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OsaSummaryResults {
    /// Number of third-party libraries detected
    #[serde(default)]
    pub total_libraries: u32,

    #[serde(default)]
    pub high_vulnerability_libraries: u32,

    #[serde(default)]
    pub medium_vulnerability_libraries: u32,

    #[serde(default)]
    pub low_vulnerability_libraries: u32,

    #[serde(default)]
    pub non_vulnerable_libraries: u32,

    /// Vulnerable libraries already on their latest version
    #[serde(default)]
    pub vulnerable_and_updated: u32,

    /// Vulnerable libraries with a newer version available
    #[serde(default)]
    pub vulnerable_and_outdated: u32,

    /// Overall risk score as reported by the server (e.g. "High")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vulnerability_score: Option<String>,

    #[serde(default)]
    pub high_vulnerabilities: u32,

    #[serde(default)]
    pub medium_vulnerabilities: u32,

    #[serde(default)]
    pub low_vulnerabilities: u32,
}

impl OsaSummaryResults {
    /// Sum of high, medium and low vulnerabilities
    pub fn total_vulnerabilities(&self) -> u64 {
        u64::from(self.high_vulnerabilities)
            + u64::from(self.medium_vulnerabilities)
            + u64::from(self.low_vulnerabilities)
    }
}

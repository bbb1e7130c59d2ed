// Synology storage models

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageVolume {
    pub volume: String,
    pub total: u64,
    pub used: u64,
    pub available: u64,
    /// Two-decimal string, e.g. "25.00".
    pub percent_used: String,
    pub total_human: String,
    pub used_human: String,
    pub available_human: String,
}

/// Volumes plus system identity and utilization, all fetched under one login.
/// `system` and `utilization` are passed through as the NAS reports them (`{}` on failure).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynologyOverview {
    pub host: String,
    pub system: serde_json::Value,
    pub utilization: serde_json::Value,
    pub volumes: Vec<StorageVolume>,
}

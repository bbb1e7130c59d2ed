// Synology DSM Web API wire types

use serde::{Deserialize, Deserializer};

use crate::metrics;
use crate::models::StorageVolume;

pub(super) const AUTH_PATH: &str = "/webapi/auth.cgi";
pub(super) const ENTRY_PATH: &str = "/webapi/entry.cgi";

pub(super) const API_AUTH: &str = "SYNO.API.Auth";
pub(super) const API_STORAGE: &str = "SYNO.Storage.CGI.Storage";
pub(super) const API_SYSTEM: &str = "SYNO.Core.System";
pub(super) const API_UTILIZATION: &str = "SYNO.Core.System.Utilization";

/// Every DSM API answers `{success, data?, error?: {code}}`.
#[derive(Debug, Deserialize)]
pub(super) struct SynoResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<SynoError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct SynoError {
    pub code: i64,
}

impl<T> SynoResponse<T> {
    /// DSM error code for logs, or "unknown".
    pub fn error_code(&self) -> String {
        self.error
            .as_ref()
            .map(|e| e.code.to_string())
            .unwrap_or_else(|| "unknown".into())
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct LoginData {
    pub sid: String,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct StorageData {
    #[serde(default)]
    pub volumes: Vec<RawVolume>,
}

/// One entry of `SYNO.Storage.CGI.Storage load_info`. DSM reports byte counts as strings
/// on most firmware, as numbers on some.
#[derive(Debug, Default, Deserialize)]
pub(super) struct RawVolume {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub volume_path: Option<String>,
    #[serde(default, deserialize_with = "byte_count")]
    pub size_total_byte: Option<u64>,
    #[serde(default, deserialize_with = "byte_count")]
    pub size_used_byte: Option<u64>,
    #[serde(default, deserialize_with = "byte_count")]
    pub size_free_byte: Option<u64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ByteCount {
    Int(u64),
    Float(f64),
    Text(String),
}

fn byte_count<'de, D: Deserializer<'de>>(d: D) -> Result<Option<u64>, D::Error> {
    match Option::<ByteCount>::deserialize(d)? {
        None => Ok(None),
        Some(ByteCount::Int(n)) => Ok(Some(n)),
        Some(ByteCount::Float(f)) if f >= 0.0 => Ok(Some(f as u64)),
        Some(ByteCount::Float(f)) => Err(serde::de::Error::custom(format!(
            "negative byte count {}",
            f
        ))),
        Some(ByteCount::Text(s)) => s
            .trim()
            .parse::<u64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

impl RawVolume {
    pub fn into_volume(self) -> StorageVolume {
        let total = self.size_total_byte.unwrap_or(0);
        let used = self.size_used_byte.unwrap_or(0);
        let available = self
            .size_free_byte
            .unwrap_or_else(|| total.saturating_sub(used));
        StorageVolume {
            volume: self.volume_path.or(self.id).unwrap_or_default(),
            total,
            used,
            available,
            percent_used: format!("{:.2}", metrics::percent_of(used, total)),
            total_human: metrics::human_terabytes(total),
            used_human: metrics::human_terabytes(used),
            available_human: metrics::human_terabytes(available),
        }
    }
}

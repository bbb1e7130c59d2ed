// UniFi network models

use serde::{Deserialize, Serialize};
use std::fmt;

/// UniFi reports state 1 for a connected device.
pub const DEVICE_STATE_ONLINE: i64 = 1;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UptimeBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

impl fmt::Display for UptimeBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d {}h", self.days, self.hours)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDevice {
    pub name: String,
    pub mac: String,
    pub ip: String,
    pub model: String,
    pub state: i64,
    pub online: bool,
    /// Seconds.
    pub uptime: u64,
    pub uptime_display: String,
    pub clients: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubsystemHealth {
    pub subsystem: String,
    pub status: String,
    pub ok: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkSummary {
    pub total: usize,
    pub online: usize,
    pub clients: u64,
}

impl NetworkSummary {
    pub fn from_devices(devices: &[NetworkDevice]) -> Self {
        Self {
            total: devices.len(),
            online: devices.iter().filter(|d| d.online).count(),
            clients: devices.iter().map(|d| d.clients).sum(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkReport {
    pub host: String,
    pub devices: Vec<NetworkDevice>,
    pub health: Vec<SubsystemHealth>,
    pub summary: NetworkSummary,
}

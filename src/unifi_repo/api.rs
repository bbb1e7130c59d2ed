// UniFi Network controller wire types

use serde::Deserialize;

use crate::metrics;
use crate::models::{DEVICE_STATE_ONLINE, NetworkDevice, SubsystemHealth};

/// `{meta: {rc, msg?}, data: [...]}` envelope of the controller's stat endpoints.
#[derive(Debug, Deserialize)]
pub(super) struct UnifiResponse<T> {
    #[serde(default)]
    pub meta: Option<Meta>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

impl<T> UnifiResponse<T> {
    /// `Err(msg)` when the controller flagged the call as failed.
    pub fn check(self) -> Result<Vec<T>, String> {
        match self.meta {
            Some(Meta { rc, msg }) if rc != "ok" => {
                Err(msg.unwrap_or_else(|| format!("rc={}", rc)))
            }
            _ => Ok(self.data),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct RawDevice {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub mac: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub state: Option<i64>,
    #[serde(default)]
    pub uptime: Option<u64>,
    #[serde(default)]
    pub num_sta: Option<u64>,
}

impl RawDevice {
    pub fn into_device(self) -> NetworkDevice {
        let model = self.model.unwrap_or_default();
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| model.clone());
        let state = self.state.unwrap_or(0);
        let uptime = self.uptime.unwrap_or(0);
        NetworkDevice {
            name,
            mac: self.mac.unwrap_or_default(),
            ip: self.ip.unwrap_or_default(),
            model,
            state,
            online: state == DEVICE_STATE_ONLINE,
            uptime,
            uptime_display: metrics::uptime_breakdown(uptime).to_string(),
            clients: self.num_sta.unwrap_or(0),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct RawHealth {
    pub subsystem: String,
    #[serde(default)]
    pub status: Option<String>,
}

impl RawHealth {
    pub fn into_health(self) -> SubsystemHealth {
        let status = self.status.unwrap_or_else(|| "unknown".into());
        SubsystemHealth {
            ok: status == "ok",
            subsystem: self.subsystem,
            status,
        }
    }
}

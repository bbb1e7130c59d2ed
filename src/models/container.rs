// Docker container models

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label carrying the Traefik HTTPS router rule, e.g. ``Host(`jellyfin.example.com`)``.
pub const TRAEFIK_HTTPS_RULE_LABEL: &str = "traefik.http.routers.https.rule";

/// Docker container state; serializes to lowercase JSON (e.g. "running").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainerState {
    Created,
    Running,
    Paused,
    Restarting,
    Removing,
    Exited,
    Dead,
    #[serde(other)]
    Unknown,
}

impl ContainerState {
    /// Parse from Docker API state string (e.g. "running", "exited").
    pub fn from_docker(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "created" => ContainerState::Created,
            "running" => ContainerState::Running,
            "paused" => ContainerState::Paused,
            "restarting" => ContainerState::Restarting,
            "removing" => ContainerState::Removing,
            "exited" => ContainerState::Exited,
            "dead" => ContainerState::Dead,
            _ => ContainerState::Unknown,
        }
    }

    pub fn is_running(self) -> bool {
        self == ContainerState::Running
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortMapping {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    pub private_port: u16,
    /// None when the port is not published on the host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_port: Option<u16>,
    #[serde(rename = "type")]
    pub type_: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MemoryUsage {
    /// MiB
    pub used: u64,
    /// MiB
    pub limit: u64,
    pub percent: f64,
}

/// One container as shown on the board. Built fresh on every poll.
///
/// Usage fields are only present for running containers; they fall back to zeroes when the
/// stats call fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerRecord {
    pub id: String,
    pub name: String,
    pub image: String,
    pub state: ContainerState,
    pub status: String,
    /// Seconds since epoch.
    pub created: i64,
    pub ports: Vec<PortMapping>,
    pub published_ports: Vec<u16>,
    pub ports_summary: String,
    pub labels: HashMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_usage: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_usage: Option<MemoryUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_rx: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_tx: Option<u64>,
}

/// A named category and the containers matching it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerGroup {
    pub name: String,
    pub containers: Vec<ContainerRecord>,
}

/// Strip exactly one leading `/` from a Docker container name.
pub fn normalize_name(raw: &str) -> String {
    raw.strip_prefix('/').unwrap_or(raw).to_string()
}

/// Public ports of published mappings, in listing order, without duplicates
/// (Docker lists the same binding once per address family).
pub fn published_ports(ports: &[PortMapping]) -> Vec<u16> {
    let mut out: Vec<u16> = Vec::new();
    for p in ports {
        if let Some(public) = p.public_port
            && !out.contains(&public)
        {
            out.push(public);
        }
    }
    out
}

/// Comma-joined published ports, or "Internal" when nothing is published.
pub fn ports_summary(published: &[u16]) -> String {
    if published.is_empty() {
        return "Internal".to_string();
    }
    published
        .iter()
        .map(|p| p.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// `https://<host>` from a Traefik ``Host(`<host>`)`` router rule label, if present.
pub fn traefik_url(labels: &HashMap<String, String>) -> Option<String> {
    let rule = labels.get(TRAEFIK_HTTPS_RULE_LABEL)?;
    let start = rule.find("Host(`")? + "Host(`".len();
    let len = rule[start..].find('`')?;
    let host = &rule[start..start + len];
    if host.is_empty() {
        return None;
    }
    Some(format!("https://{}", host))
}

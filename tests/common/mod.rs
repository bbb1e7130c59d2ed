// Shared test helpers

#![allow(dead_code)]

use async_trait::async_trait;
use bollard::models::{ContainerStatsResponse, ContainerSummary};
use serde_json::json;
use statusboard::config::{AppConfig, HttpConfig};
use statusboard::docker_repo::{ContainerAction, ContainerRuntime, DockerRepo};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Docker list entry as the Engine API returns it (names carry a leading '/').
pub fn summary(id: &str, name: &str, state: &str, image: &str) -> ContainerSummary {
    let status = if state == "running" {
        "Up 2 hours"
    } else {
        "Exited (0) 1 hour ago"
    };
    serde_json::from_value(json!({
        "Id": id,
        "Names": [format!("/{}", name)],
        "Image": image,
        "State": state,
        "Status": status,
        "Created": 1_700_000_000i64,
        "Ports": [
            { "PrivatePort": 80, "Type": "tcp" },
            { "IP": "0.0.0.0", "PrivatePort": 443, "PublicPort": 8443, "Type": "tcp" },
            { "IP": "::", "PrivatePort": 443, "PublicPort": 8443, "Type": "tcp" }
        ],
        "Labels": { "com.example.source": "list" }
    }))
    .expect("container summary fixture")
}

/// Stats sample: 20% of one CPU's worth across 2 CPUs, 256/512 MiB, two interfaces.
pub fn stats_sample() -> ContainerStatsResponse {
    serde_json::from_value(json!({
        "cpu_stats": {
            "cpu_usage": { "total_usage": 200 },
            "system_cpu_usage": 2000,
            "online_cpus": 2
        },
        "precpu_stats": {
            "cpu_usage": { "total_usage": 100 },
            "system_cpu_usage": 1000,
            "online_cpus": 2
        },
        "memory_stats": { "usage": 268_435_456u64, "limit": 536_870_912u64 },
        "networks": {
            "eth0": { "rx_bytes": 1000, "tx_bytes": 2000 },
            "eth1": { "rx_bytes": 10, "tx_bytes": 20 }
        }
    }))
    .expect("stats fixture")
}

/// In-memory runtime. Records every call so tests can assert what was (not) contacted.
#[derive(Default)]
pub struct FakeRuntime {
    pub containers: Vec<ContainerSummary>,
    pub labels: HashMap<String, HashMap<String, String>>,
    pub failing_stats: HashSet<String>,
    /// Stats calls for these ids never answer within any test timeout.
    pub stalled_stats: HashSet<String>,
    pub failing_inspect: HashSet<String>,
    pub fail_list: bool,
    pub fail_actions: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeRuntime {
    pub fn with(containers: Vec<ContainerSummary>) -> Self {
        Self {
            containers,
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ContainerRuntime for FakeRuntime {
    async fn list(&self, include_stopped: bool) -> anyhow::Result<Vec<ContainerSummary>> {
        self.record(format!("list all={}", include_stopped));
        if self.fail_list {
            anyhow::bail!("connection refused");
        }
        Ok(self
            .containers
            .iter()
            .filter(|c| {
                include_stopped
                    || c.state.as_ref().map(|s| s.to_string()).as_deref() == Some("running")
            })
            .cloned()
            .collect())
    }

    async fn stats(&self, id: &str) -> anyhow::Result<ContainerStatsResponse> {
        self.record(format!("stats {}", id));
        if self.failing_stats.contains(id) {
            anyhow::bail!("no such container: {}", id);
        }
        if self.stalled_stats.contains(id) {
            tokio::time::sleep(std::time::Duration::from_secs(30)).await;
        }
        Ok(stats_sample())
    }

    async fn labels(&self, id: &str) -> anyhow::Result<HashMap<String, String>> {
        self.record(format!("inspect {}", id));
        if self.failing_inspect.contains(id) {
            anyhow::bail!("inspect failed: {}", id);
        }
        Ok(self.labels.get(id).cloned().unwrap_or_default())
    }

    async fn apply(&self, id: &str, action: ContainerAction) -> anyhow::Result<()> {
        self.record(format!("{} {}", action, id));
        if self.fail_actions {
            anyhow::bail!("container {} is not running", id);
        }
        Ok(())
    }
}

pub fn docker_repo(runtime: Arc<FakeRuntime>) -> DockerRepo {
    DockerRepo::new(runtime, &HttpConfig::default())
}

pub fn docker_repo_with_timeout(runtime: Arc<FakeRuntime>, timeout_secs: u64) -> DockerRepo {
    DockerRepo::new(runtime, &HttpConfig { timeout_secs })
}

/// Config with no providers configured and the default category table.
pub fn unconfigured() -> AppConfig {
    AppConfig::default()
}

/// Split a mockito `host_with_port()` into the host and port config fields.
pub fn host_and_port(host_with_port: &str) -> (String, u16) {
    let (host, port) = host_with_port
        .rsplit_once(':')
        .expect("mockito address has a port");
    (host.to_string(), port.parse().expect("numeric port"))
}

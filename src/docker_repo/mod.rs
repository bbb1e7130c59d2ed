// Docker containers: list with per-container stats + labels, and lifecycle actions

mod runtime;
mod stats;

pub use runtime::BollardRuntime;
pub use stats::UsageSample;

use async_trait::async_trait;
use bollard::models::{ContainerStatsResponse, ContainerSummary};
use futures_util::future::join_all;
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use tracing::{instrument, warn};

use crate::config::{DockerConfig, HttpConfig};
use crate::error::ProviderError;
use crate::models::{
    ContainerRecord, ContainerState, PortMapping, normalize_name, ports_summary, published_ports,
    traefik_url,
};

const PROVIDER: &str = "Docker";

/// Bound for lifecycle actions; `docker stop` alone may wait 10s for a graceful exit.
pub const ACTION_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerAction {
    Start,
    Stop,
    Restart,
    Pause,
    Unpause,
}

impl ContainerAction {
    pub fn past_tense(self) -> &'static str {
        match self {
            Self::Start => "started",
            Self::Stop => "stopped",
            Self::Restart => "restarted",
            Self::Pause => "paused",
            Self::Unpause => "unpaused",
        }
    }
}

impl FromStr for ContainerAction {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Self::Start),
            "stop" => Ok(Self::Stop),
            "restart" => Ok(Self::Restart),
            "pause" => Ok(Self::Pause),
            "unpause" => Ok(Self::Unpause),
            other => Err(ProviderError::InvalidAction(other.to_string())),
        }
    }
}

impl fmt::Display for ContainerAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
            Self::Pause => "pause",
            Self::Unpause => "unpause",
        };
        f.write_str(s)
    }
}

/// The container runtime calls the board needs. Implemented over bollard in production
/// and by in-memory doubles in tests.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Running containers only unless `include_stopped`.
    async fn list(&self, include_stopped: bool) -> anyhow::Result<Vec<ContainerSummary>>;

    /// One non-streaming stats sample (current + previous CPU counters).
    async fn stats(&self, id: &str) -> anyhow::Result<ContainerStatsResponse>;

    /// Labels from the container's inspect/config.
    async fn labels(&self, id: &str) -> anyhow::Result<HashMap<String, String>>;

    async fn apply(&self, id: &str, action: ContainerAction) -> anyhow::Result<()>;
}

pub struct DockerRepo {
    runtime: Arc<dyn ContainerRuntime>,
    timeout: Duration,
}

impl DockerRepo {
    pub fn new(runtime: Arc<dyn ContainerRuntime>, http: &HttpConfig) -> Self {
        Self {
            runtime,
            timeout: http.timeout(),
        }
    }

    pub fn connect(docker: &DockerConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        let runtime = BollardRuntime::connect(docker)?;
        Ok(Self::new(Arc::new(runtime), http))
    }

    async fn bounded<T>(
        limit: Duration,
        fut: impl Future<Output = anyhow::Result<T>>,
    ) -> anyhow::Result<T> {
        match tokio::time::timeout(limit, fut).await {
            Ok(r) => r,
            Err(_) => Err(anyhow::anyhow!("timed out after {}s", limit.as_secs())),
        }
    }

    /// All containers (or running only), each enriched with stats (running only) and labels.
    /// Stats and inspect failures degrade that container's fields; only a failed list call
    /// fails the whole request. Sorted by name.
    #[instrument(skip(self), fields(repo = "docker", operation = "list_containers"))]
    pub async fn list_containers(
        &self,
        include_stopped: bool,
    ) -> Result<Vec<ContainerRecord>, ProviderError> {
        let summaries = Self::bounded(self.timeout, self.runtime.list(include_stopped))
            .await
            .map_err(|e| ProviderError::upstream(PROVIDER, e))?;

        let mut records = join_all(summaries.into_iter().map(|s| self.enrich(s))).await;
        records.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(records)
    }

    async fn enrich(&self, summary: ContainerSummary) -> ContainerRecord {
        let id = summary.id.clone().unwrap_or_default();
        let state = ContainerState::from_docker(
            &summary
                .state
                .as_ref()
                .map(|s| s.to_string())
                .unwrap_or_default(),
        );

        let usage_fut = async {
            if !state.is_running() {
                return None;
            }
            match Self::bounded(self.timeout, self.runtime.stats(&id)).await {
                Ok(s) => Some(stats::process_statistics(&s)),
                Err(e) => {
                    warn!(error = %e, container = %id, operation = "stats", "container stats unavailable");
                    Some(UsageSample::default())
                }
            }
        };
        let labels_fut = async {
            match Self::bounded(self.timeout, self.runtime.labels(&id)).await {
                Ok(l) => Some(l),
                Err(e) => {
                    warn!(error = %e, container = %id, operation = "inspect", "container inspect unavailable");
                    None
                }
            }
        };
        let (usage, labels) = tokio::join!(usage_fut, labels_fut);

        to_record(summary, state, usage, labels)
    }

    /// Run one lifecycle action. Unknown actions are rejected before the runtime is contacted.
    /// Success means the runtime call returned without error; callers re-poll to see the new state.
    #[instrument(skip(self), fields(repo = "docker", operation = "perform_action"))]
    pub async fn perform_action(&self, id: &str, action: &str) -> Result<String, ProviderError> {
        let action: ContainerAction = action.parse()?;
        Self::bounded(ACTION_TIMEOUT, self.runtime.apply(id, action))
            .await
            .map_err(|e| ProviderError::upstream(PROVIDER, e))?;
        tracing::info!(container = %id, %action, "container action applied");
        Ok(format!("Container {} successfully", action.past_tense()))
    }
}

fn to_record(
    summary: ContainerSummary,
    state: ContainerState,
    usage: Option<UsageSample>,
    labels: Option<HashMap<String, String>>,
) -> ContainerRecord {
    let id = summary.id.unwrap_or_default();
    let name = summary
        .names
        .as_ref()
        .and_then(|n| n.first())
        .map(|n| normalize_name(n))
        .unwrap_or_else(|| id.clone());
    let ports: Vec<PortMapping> = summary
        .ports
        .unwrap_or_default()
        .into_iter()
        .map(|p| PortMapping {
            ip: p.ip,
            private_port: p.private_port,
            public_port: p.public_port,
            type_: p.typ.map(|t| t.to_string()).unwrap_or_default(),
        })
        .collect();
    let published = published_ports(&ports);
    let labels = labels.or(summary.labels).unwrap_or_default();

    ContainerRecord {
        url: traefik_url(&labels),
        id,
        name,
        image: summary.image.unwrap_or_default(),
        state,
        status: summary.status.unwrap_or_default(),
        created: summary.created.unwrap_or(0),
        ports_summary: ports_summary(&published),
        published_ports: published,
        ports,
        labels,
        cpu_usage: usage.map(|u| u.cpu_usage),
        memory_usage: usage.map(|u| u.memory_usage),
        network_rx: usage.map(|u| u.network_rx),
        network_tx: usage.map(|u| u.network_tx),
    }
}

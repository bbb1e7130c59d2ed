// ContainerRuntime backed by the Docker Engine API (bollard)

use async_trait::async_trait;
use bollard::query_parameters::{
    InspectContainerOptions, ListContainersOptions, RestartContainerOptions,
    StartContainerOptions, StatsOptions, StopContainerOptions,
};
use bollard::models::{ContainerStatsResponse, ContainerSummary};
use bollard::{API_DEFAULT_VERSION, Docker};
use futures_util::StreamExt;
use std::collections::HashMap;

use super::{ACTION_TIMEOUT, ContainerAction, ContainerRuntime};
use crate::config::DockerConfig;

pub struct BollardRuntime {
    docker: Docker,
}

impl BollardRuntime {
    /// Connect per `[docker] host`: unset uses local defaults (honours `DOCKER_HOST`),
    /// `tcp://` / `http://` uses HTTP, anything else is a unix socket path.
    /// The client-wide timeout is the action bound; reads are bounded tighter by the caller.
    pub fn connect(config: &DockerConfig) -> anyhow::Result<Self> {
        let secs = ACTION_TIMEOUT.as_secs();
        let docker = match config.host.as_deref().map(str::trim) {
            None | Some("") => Docker::connect_with_local_defaults()?,
            Some(h) if h.starts_with("tcp://") || h.starts_with("http://") => {
                Docker::connect_with_http(h, secs, API_DEFAULT_VERSION)?
            }
            Some(h) => Docker::connect_with_unix(h, secs, API_DEFAULT_VERSION)?,
        };
        Ok(Self { docker })
    }
}

#[async_trait]
impl ContainerRuntime for BollardRuntime {
    async fn list(&self, include_stopped: bool) -> anyhow::Result<Vec<ContainerSummary>> {
        let filters = if include_stopped {
            None
        } else {
            let mut filters = HashMap::new();
            filters.insert("status".to_string(), vec!["running".to_string()]);
            Some(filters)
        };
        let options = ListContainersOptions {
            all: include_stopped,
            filters,
            ..Default::default()
        };
        Ok(self.docker.list_containers(Some(options)).await?)
    }

    async fn stats(&self, id: &str) -> anyhow::Result<ContainerStatsResponse> {
        // Non-streaming: the daemon waits for a second sample so precpu_stats is populated.
        let options = StatsOptions {
            stream: false,
            ..Default::default()
        };
        let mut stream = self.docker.stats(id, Some(options));
        match stream.next().await {
            Some(result) => Ok(result?),
            None => anyhow::bail!("empty stats response for {}", id),
        }
    }

    async fn labels(&self, id: &str) -> anyhow::Result<HashMap<String, String>> {
        let inspect = self
            .docker
            .inspect_container(id, None::<InspectContainerOptions>)
            .await?;
        Ok(inspect.config.and_then(|c| c.labels).unwrap_or_default())
    }

    async fn apply(&self, id: &str, action: ContainerAction) -> anyhow::Result<()> {
        match action {
            ContainerAction::Start => {
                self.docker
                    .start_container(id, None::<StartContainerOptions>)
                    .await?
            }
            ContainerAction::Stop => {
                self.docker
                    .stop_container(id, None::<StopContainerOptions>)
                    .await?
            }
            ContainerAction::Restart => {
                self.docker
                    .restart_container(id, None::<RestartContainerOptions>)
                    .await?
            }
            ContainerAction::Pause => self.docker.pause_container(id).await?,
            ContainerAction::Unpause => self.docker.unpause_container(id).await?,
        }
        Ok(())
    }
}

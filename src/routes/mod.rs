// HTTP routes

mod docker;
mod http;
mod providers;

use axum::{
    Router,
    routing::{get, post},
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::AppConfig;
use crate::docker_repo::DockerRepo;
use crate::error::ProviderError;
use crate::synology_repo::SynologyRepo;
use crate::sysinfo_repo::SysinfoRepo;
use crate::unifi_repo::UnifiRepo;

/// One adapter per provider. `docker` is None when the runtime client could not be built.
pub struct Repos {
    pub docker: Option<Arc<DockerRepo>>,
    pub synology: Arc<SynologyRepo>,
    pub unifi: Arc<UnifiRepo>,
    pub sysinfo: Arc<SysinfoRepo>,
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) docker: Option<Arc<DockerRepo>>,
    pub(crate) synology: Arc<SynologyRepo>,
    pub(crate) unifi: Arc<UnifiRepo>,
    pub(crate) sysinfo: Arc<SysinfoRepo>,
    pub(crate) config: Arc<AppConfig>,
}

impl AppState {
    pub(crate) fn docker(&self) -> Result<&DockerRepo, ProviderError> {
        self.docker
            .as_deref()
            .ok_or_else(|| ProviderError::upstream("Docker", "runtime not connected"))
    }
}

/// Log a provider failure once at the edge; the body carries the message to the client.
pub(crate) fn log_failure<T>(provider: &str, result: &Result<T, ProviderError>) {
    if let Err(e) = result {
        tracing::warn!(provider, error = %e, "provider unavailable");
    }
}

pub fn app(repos: Repos, config: Arc<AppConfig>) -> Router {
    let state = AppState {
        docker: repos.docker,
        synology: repos.synology,
        unifi: repos.unifi,
        sysinfo: repos.sysinfo,
        config,
    };
    Router::new()
        .route("/", get(|| async { "statusboard is running" })) // GET /
        .route("/version", get(http::version_handler)) // GET /version
        .route("/api/config", get(http::config_handler)) // GET /api/config
        .route("/api/overview", get(http::overview_handler)) // GET /api/overview
        .route("/api/docker/containers", get(docker::containers_handler)) // GET /api/docker/containers?all=
        .route("/api/docker/groups", get(docker::groups_handler)) // GET /api/docker/groups?q=
        .route(
            "/api/docker/container/{id}/{action}",
            post(docker::action_handler),
        ) // POST /api/docker/container/{id}/{action}
        .route("/api/synology/storage", get(providers::synology_storage_handler)) // GET /api/synology/storage
        .route("/api/synology/info", get(providers::synology_info_handler)) // GET /api/synology/info
        .route("/api/unifi/devices", get(providers::unifi_devices_handler)) // GET /api/unifi/devices
        .route("/api/system/info", get(providers::system_info_handler)) // GET /api/system/info
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(state)
}

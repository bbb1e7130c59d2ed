// GET handlers: version, sanitized config, overview

use axum::{Json, extract::State, response::IntoResponse};

use super::{AppState, log_failure, providers};
use crate::models::{ContainerListResponse, OverviewResponse};
use crate::version::{NAME, VERSION};

/// GET /version: returns service name and version (from Cargo.toml at build time).
pub(super) async fn version_handler() -> impl IntoResponse {
    Json(serde_json::json!({
        "name": NAME,
        "version": VERSION,
    }))
}

/// GET /api/config: which providers are configured, with host and port only.
pub(super) async fn config_handler(State(state): State<AppState>) -> impl IntoResponse {
    let cfg = &state.config;
    Json(serde_json::json!({
        "success": true,
        "config": {
            "synology": {
                "configured": cfg.synology.is_configured(),
                "host": cfg.synology.host,
                "port": cfg.synology.port,
            },
            "unifi": {
                "configured": cfg.unifi.is_configured(),
                "host": cfg.unifi.host,
                "port": cfg.unifi.port(),
                "site": cfg.unifi.site,
            },
            "docker": {
                "connected": state.docker.is_some(),
                "host": cfg.docker.host,
            },
        },
    }))
}

/// GET /api/overview: every provider polled concurrently; one failing provider
/// does not affect the others.
pub(super) async fn overview_handler(State(state): State<AppState>) -> Json<OverviewResponse> {
    let containers = async {
        let result = match state.docker() {
            Ok(repo) => repo.list_containers(true).await,
            Err(e) => Err(e),
        };
        log_failure("docker", &result);
        ContainerListResponse::from(result)
    };
    let (containers, synology, unifi, system) = tokio::join!(
        containers,
        providers::synology_overview(&state),
        providers::unifi_devices(&state),
        providers::system_snapshot(&state),
    );
    Json(OverviewResponse {
        containers,
        synology,
        unifi,
        system,
    })
}

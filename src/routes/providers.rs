// Synology, UniFi and host handlers

use axum::{Json, extract::State};

use super::{AppState, log_failure};
use crate::error::ProviderError;
use crate::models::{ApiResponse, NetworkReport, StorageVolume, SynologyOverview, SystemSnapshot};

/// GET /api/synology/storage
pub(super) async fn synology_storage_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<StorageVolume>>> {
    let result = state.synology.get_storage().await;
    log_failure("synology", &result);
    Json(result.into())
}

/// GET /api/synology/info: system, utilization and volumes under one login.
pub(super) async fn synology_info_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<SynologyOverview>> {
    Json(synology_overview(&state).await)
}

/// GET /api/unifi/devices
pub(super) async fn unifi_devices_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<NetworkReport>> {
    Json(unifi_devices(&state).await)
}

/// GET /api/system/info
pub(super) async fn system_info_handler(
    State(state): State<AppState>,
) -> Json<ApiResponse<SystemSnapshot>> {
    Json(system_snapshot(&state).await)
}

pub(super) async fn synology_overview(state: &AppState) -> ApiResponse<SynologyOverview> {
    let result = state.synology.get_overview().await;
    log_failure("synology", &result);
    result.into()
}

pub(super) async fn unifi_devices(state: &AppState) -> ApiResponse<NetworkReport> {
    let result = state.unifi.get_devices().await;
    log_failure("unifi", &result);
    result.into()
}

pub(super) async fn system_snapshot(state: &AppState) -> ApiResponse<SystemSnapshot> {
    let result = state
        .sysinfo
        .get_system_snapshot()
        .await
        .map_err(|e| ProviderError::upstream("host", e));
    log_failure("system", &result);
    result.into()
}

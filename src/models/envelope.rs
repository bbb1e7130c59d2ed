// Response envelopes: every provider endpoint answers 200 with `success` in the body.

use serde::{Deserialize, Serialize};

use super::{
    ContainerGroup, ContainerRecord, ContainerState, NetworkReport, SynologyOverview,
    SystemSnapshot,
};
use crate::error::ProviderError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> From<Result<T, ProviderError>> for ApiResponse<T> {
    fn from(result: Result<T, ProviderError>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                error: None,
            },
            Err(e) => Self {
                success: false,
                data: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContainerListResponse {
    pub success: bool,
    pub total: usize,
    pub running: usize,
    pub containers: Vec<ContainerRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<Vec<ContainerRecord>, ProviderError>> for ContainerListResponse {
    fn from(result: Result<Vec<ContainerRecord>, ProviderError>) -> Self {
        match result {
            Ok(containers) => Self {
                success: true,
                total: containers.len(),
                running: containers
                    .iter()
                    .filter(|c| c.state == ContainerState::Running)
                    .count(),
                containers,
                error: None,
            },
            Err(e) => Self {
                success: false,
                total: 0,
                running: 0,
                containers: vec![],
                error: Some(e.to_string()),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupsResponse {
    pub success: bool,
    pub groups: Vec<ContainerGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// All four providers, polled concurrently.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverviewResponse {
    pub containers: ContainerListResponse,
    pub synology: ApiResponse<SynologyOverview>,
    pub unifi: ApiResponse<NetworkReport>,
    pub system: ApiResponse<SystemSnapshot>,
}

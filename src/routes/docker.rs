// Container list, grouping and lifecycle actions

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::{AppState, log_failure};
use crate::categories;
use crate::docker_repo::ContainerAction;
use crate::models::{ActionResponse, ContainerListResponse, GroupsResponse};

#[derive(Debug, Deserialize)]
pub(super) struct ListQuery {
    /// Include stopped containers (default true).
    all: Option<bool>,
    /// Case-insensitive filter on name or image.
    q: Option<String>,
}

impl ListQuery {
    fn include_stopped(&self) -> bool {
        self.all.unwrap_or(true)
    }
}

/// GET /api/docker/containers: `{success, total, running, containers}`.
pub(super) async fn containers_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<ContainerListResponse> {
    let result = match state.docker() {
        Ok(repo) => repo.list_containers(query.include_stopped()).await,
        Err(e) => Err(e),
    };
    log_failure("docker", &result);
    let result = result.map(|containers| {
        let q = query.q.as_deref().unwrap_or_default();
        containers
            .into_iter()
            .filter(|c| categories::matches_query(c, q))
            .collect()
    });
    Json(result.into())
}

/// GET /api/docker/groups: containers grouped by the configured category table.
pub(super) async fn groups_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<GroupsResponse> {
    let result = match state.docker() {
        Ok(repo) => repo.list_containers(query.include_stopped()).await,
        Err(e) => Err(e),
    };
    log_failure("docker", &result);
    Json(match result {
        Ok(containers) => {
            let q = query.q.as_deref().unwrap_or_default();
            let filtered: Vec<_> = containers
                .into_iter()
                .filter(|c| categories::matches_query(c, q))
                .collect();
            GroupsResponse {
                success: true,
                groups: categories::group(&state.config.categories, &filtered),
                error: None,
            }
        }
        Err(e) => GroupsResponse {
            success: false,
            groups: vec![],
            error: Some(e.to_string()),
        },
    })
}

/// POST /api/docker/container/{id}/{action}: 400 for an unknown action, otherwise 200
/// with `success` reflecting the runtime call.
pub(super) async fn action_handler(
    State(state): State<AppState>,
    Path((id, action)): Path<(String, String)>,
) -> (StatusCode, Json<ActionResponse>) {
    if let Err(e) = action.parse::<ContainerAction>() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ActionResponse {
                success: false,
                message: None,
                error: Some(e.to_string()),
            }),
        );
    }
    let result = match state.docker() {
        Ok(repo) => repo.perform_action(&id, &action).await,
        Err(e) => Err(e),
    };
    log_failure("docker", &result);
    let body = match result {
        Ok(message) => ActionResponse {
            success: true,
            message: Some(message),
            error: None,
        },
        Err(e) => ActionResponse {
            success: false,
            message: None,
            error: Some(e.to_string()),
        },
    };
    (StatusCode::OK, Json(body))
}

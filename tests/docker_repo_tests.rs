// Docker adapter tests over an in-memory runtime

mod common;

use common::{FakeRuntime, docker_repo, docker_repo_with_timeout, summary};
use statusboard::error::ProviderError;
use statusboard::models::{ContainerState, MemoryUsage, TRAEFIK_HTTPS_RULE_LABEL};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

fn two_containers() -> FakeRuntime {
    FakeRuntime::with(vec![
        summary("bbb", "sonarr", "running", "linuxserver/sonarr"),
        summary("aaa", "/postgres", "exited", "postgres:16"),
    ])
}

#[tokio::test]
async fn test_list_sorted_by_name_and_normalized() {
    let runtime = Arc::new(two_containers());
    let repo = docker_repo(runtime.clone());

    let records = repo.list_containers(true).await.unwrap();
    let names: Vec<_> = records.iter().map(|c| c.name.as_str()).collect();
    // "/postgres" was listed as "//postgres": exactly one slash is stripped.
    assert_eq!(names, vec!["/postgres", "sonarr"]);
    assert_eq!(records[1].state, ContainerState::Running);
    assert_eq!(records[0].state, ContainerState::Exited);
}

#[tokio::test]
async fn test_running_container_gets_usage() {
    let repo = docker_repo(Arc::new(two_containers()));
    let records = repo.list_containers(true).await.unwrap();
    let sonarr = records.iter().find(|c| c.name == "sonarr").unwrap();

    assert_eq!(sonarr.cpu_usage, Some(20.0));
    assert_eq!(
        sonarr.memory_usage,
        Some(MemoryUsage {
            used: 256,
            limit: 512,
            percent: 50.0
        })
    );
    assert_eq!(sonarr.network_rx, Some(1010));
    assert_eq!(sonarr.network_tx, Some(2020));
}

#[tokio::test]
async fn test_stats_only_fetched_for_running_containers() {
    let runtime = Arc::new(two_containers());
    let repo = docker_repo(runtime.clone());
    let records = repo.list_containers(true).await.unwrap();

    let calls = runtime.calls();
    assert!(calls.contains(&"stats bbb".to_string()));
    assert!(!calls.contains(&"stats aaa".to_string()));
    assert!(calls.contains(&"inspect aaa".to_string()));

    let stopped = records.iter().find(|c| c.id == "aaa").unwrap();
    assert!(stopped.cpu_usage.is_none());
    assert!(stopped.memory_usage.is_none());
}

#[tokio::test]
async fn test_stats_failure_degrades_to_zero_usage() {
    let mut runtime = FakeRuntime::with(vec![
        summary("a1", "radarr", "running", "linuxserver/radarr"),
        summary("b2", "sonarr", "running", "linuxserver/sonarr"),
    ]);
    runtime.failing_stats.insert("a1".to_string());
    let repo = docker_repo(Arc::new(runtime));

    let records = repo.list_containers(true).await.unwrap();
    assert_eq!(records.len(), 2);
    let radarr = records.iter().find(|c| c.id == "a1").unwrap();
    assert_eq!(radarr.cpu_usage, Some(0.0));
    assert_eq!(radarr.memory_usage, Some(MemoryUsage::default()));
    let sonarr = records.iter().find(|c| c.id == "b2").unwrap();
    assert_eq!(sonarr.cpu_usage, Some(20.0));
}

#[tokio::test]
async fn test_stalled_stats_time_out_to_zero_usage() {
    let mut runtime = FakeRuntime::with(vec![
        summary("a1", "radarr", "running", "linuxserver/radarr"),
        summary("b2", "sonarr", "running", "linuxserver/sonarr"),
    ]);
    runtime.stalled_stats.insert("a1".to_string());
    let repo = docker_repo_with_timeout(Arc::new(runtime), 1);

    let started = Instant::now();
    let records = repo.list_containers(true).await.unwrap();
    assert!(started.elapsed() < Duration::from_secs(10));

    assert_eq!(records.len(), 2);
    let radarr = records.iter().find(|c| c.id == "a1").unwrap();
    assert_eq!(radarr.cpu_usage, Some(0.0));
    assert_eq!(radarr.memory_usage, Some(MemoryUsage::default()));
    assert_eq!(radarr.network_rx, Some(0));
    let sonarr = records.iter().find(|c| c.id == "b2").unwrap();
    assert_eq!(sonarr.cpu_usage, Some(20.0));
}

#[tokio::test]
async fn test_list_failure_is_upstream_error() {
    let mut runtime = two_containers();
    runtime.fail_list = true;
    let repo = docker_repo(Arc::new(runtime));

    let err = repo.list_containers(true).await.unwrap_err();
    assert!(matches!(err, ProviderError::Upstream { .. }));
    assert!(err.to_string().contains("connection refused"));
}

#[tokio::test]
async fn test_running_only_listing() {
    let runtime = Arc::new(two_containers());
    let repo = docker_repo(runtime.clone());
    let records = repo.list_containers(false).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "sonarr");
    assert_eq!(runtime.calls()[0], "list all=false");
}

#[tokio::test]
async fn test_ports_and_summary() {
    let repo = docker_repo(Arc::new(two_containers()));
    let records = repo.list_containers(true).await.unwrap();
    let sonarr = records.iter().find(|c| c.name == "sonarr").unwrap();

    assert_eq!(sonarr.ports.len(), 3);
    assert_eq!(sonarr.published_ports, vec![8443]);
    assert_eq!(sonarr.ports_summary, "8443");
}

#[tokio::test]
async fn test_inspect_labels_win_and_traefik_url() {
    let mut runtime = two_containers();
    runtime.labels.insert(
        "bbb".to_string(),
        HashMap::from([(
            TRAEFIK_HTTPS_RULE_LABEL.to_string(),
            "Host(`sonarr.home.example`)".to_string(),
        )]),
    );
    runtime.failing_inspect.insert("aaa".to_string());
    let repo = docker_repo(Arc::new(runtime));

    let records = repo.list_containers(true).await.unwrap();
    let sonarr = records.iter().find(|c| c.id == "bbb").unwrap();
    assert_eq!(sonarr.url.as_deref(), Some("https://sonarr.home.example"));
    // Inspect failed: labels fall back to those on the list entry.
    let postgres = records.iter().find(|c| c.id == "aaa").unwrap();
    assert_eq!(
        postgres.labels.get("com.example.source").map(String::as_str),
        Some("list")
    );
    assert!(postgres.url.is_none());
}

#[tokio::test]
async fn test_action_success_message() {
    let runtime = Arc::new(two_containers());
    let repo = docker_repo(runtime.clone());

    let msg = repo.perform_action("bbb", "restart").await.unwrap();
    assert_eq!(msg, "Container restarted successfully");
    assert_eq!(runtime.calls(), vec!["restart bbb".to_string()]);
}

#[tokio::test]
async fn test_invalid_action_never_contacts_runtime() {
    let runtime = Arc::new(two_containers());
    let repo = docker_repo(runtime.clone());

    let err = repo.perform_action("bbb", "destroy").await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidAction(ref a) if a == "destroy"));
    assert!(err.is_client_error());
    assert!(runtime.calls().is_empty());
}

#[tokio::test]
async fn test_action_failure_is_upstream_error() {
    let mut runtime = two_containers();
    runtime.fail_actions = true;
    let repo = docker_repo(Arc::new(runtime));

    let err = repo.perform_action("aaa", "pause").await.unwrap_err();
    assert!(matches!(err, ProviderError::Upstream { .. }));
    assert!(!err.is_client_error());
}

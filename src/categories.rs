// Container grouping by keyword table and free-text search

use crate::config::CategoryRule;
use crate::models::{ContainerGroup, ContainerRecord};

/// Group for containers that match no category.
pub const OTHER_GROUP: &str = "other";

const DEFAULT_TABLE: &[(&str, &[&str])] = &[
    (
        "media",
        &[
            "sonarr",
            "radarr",
            "lidarr",
            "whisparr",
            "prowlarr",
            "bazarr",
            "tautulli",
            "overseerr",
            "ombi",
            "jellyfin",
            "plex",
            "audiobookshelf",
            "lazylibrarian",
        ],
    ),
    (
        "download",
        &[
            "qbittorrent",
            "transmission",
            "sabnzbd",
            "nzbget",
            "deluge",
            "gluetun",
            "flaresolverr",
        ],
    ),
    (
        "infrastructure",
        &[
            "traefik",
            "portainer",
            "heimdall",
            "homepage",
            "nginx",
            "caddy",
            "pihole",
            "adguard",
            "unbound",
            "mosquitto",
        ],
    ),
    (
        "monitoring",
        &[
            "grafana",
            "prometheus",
            "cadvisor",
            "node-exporter",
            "dozzle",
            "uptime-kuma",
            "beszel",
            "dockmon",
            "docker-stats-exporter",
            "diun",
            "container-census",
        ],
    ),
    (
        "automation",
        &[
            "homeassistant",
            "home-assistant",
            "n8n",
            "nodered",
            "node-red",
            "duplicati",
        ],
    ),
    (
        "productivity",
        &[
            "nextcloud",
            "openproject",
            "gitea",
            "gitlab",
            "code-server",
            "vscode",
        ],
    ),
    ("media_processing", &["tdarr"]),
    (
        "ai",
        &["openwebui", "open-webui", "ollama", "stable-diffusion", "mcp"],
    ),
    ("photos", &["immich"]),
    (
        "databases",
        &["postgres", "mariadb", "mysql", "mongo", "redis", "db"],
    ),
];

/// Built-in table used when the config has no `[[categories]]`.
pub fn default_rules() -> Vec<CategoryRule> {
    DEFAULT_TABLE
        .iter()
        .map(|(name, keywords)| CategoryRule {
            name: (*name).to_string(),
            keywords: keywords.iter().map(|k| (*k).to_string()).collect(),
        })
        .collect()
}

fn matches_rule(rule: &CategoryRule, name_lower: &str) -> bool {
    rule.keywords
        .iter()
        .any(|k| name_lower.contains(&k.to_lowercase()))
}

/// Case-insensitive substring match on name or image. Empty query matches everything.
pub fn matches_query(c: &ContainerRecord, query: &str) -> bool {
    let q = query.trim().to_lowercase();
    q.is_empty() || c.name.to_lowercase().contains(&q) || c.image.to_lowercase().contains(&q)
}

/// Groups in table order. A container lands in every category it matches, or in `other`.
/// Empty groups are omitted.
pub fn group(rules: &[CategoryRule], containers: &[ContainerRecord]) -> Vec<ContainerGroup> {
    let mut groups: Vec<ContainerGroup> = rules
        .iter()
        .map(|r| ContainerGroup {
            name: r.name.clone(),
            containers: Vec::new(),
        })
        .collect();
    let mut other = Vec::new();

    for c in containers {
        let name_lower = c.name.to_lowercase();
        let mut matched = false;
        for (rule, g) in rules.iter().zip(groups.iter_mut()) {
            if matches_rule(rule, &name_lower) {
                g.containers.push(c.clone());
                matched = true;
            }
        }
        if !matched {
            other.push(c.clone());
        }
    }

    groups.push(ContainerGroup {
        name: OTHER_GROUP.to_string(),
        containers: other,
    });
    groups.retain(|g| !g.containers.is_empty());
    groups
}

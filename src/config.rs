use serde::Deserialize;
use std::fmt;

use crate::categories;
use crate::error::ProviderError;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub http: HttpConfig,
    pub docker: DockerConfig,
    pub synology: SynologyConfig,
    pub unifi: UnifiConfig,
    pub categories: Vec<CategoryRule>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            http: HttpConfig::default(),
            docker: DockerConfig::default(),
            synology: SynologyConfig::default(),
            unifi: UnifiConfig::default(),
            categories: categories::default_rules(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 3001,
            host: "0.0.0.0".into(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Upper bound for every outbound call (Docker, Synology, UniFi).
    pub timeout_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self { timeout_secs: 5 }
    }
}

impl HttpConfig {
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DockerConfig {
    /// `unix:///path/docker.sock`, a bare socket path, or `tcp://` / `http://host:port`.
    /// Local defaults (incl. `DOCKER_HOST`) when unset.
    pub host: Option<String>,
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct SynologyConfig {
    pub host: Option<String>,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    pub https: bool,
    pub trust_self_signed: bool,
}

impl Default for SynologyConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: 5000,
            username: None,
            password: None,
            https: false,
            trust_self_signed: false,
        }
    }
}

#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct UnifiConfig {
    pub host: Option<String>,
    /// Unset means 443 for a UniFi OS console and 8443 for a legacy controller.
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub https: bool,
    /// Controllers ship with a self-signed certificate; set false once a trusted one is installed.
    pub trust_self_signed: bool,
    /// UniFi OS console (`/api/auth/login`, `/proxy/network` prefix) vs. legacy controller.
    pub unifi_os: bool,
    pub site: String,
}

impl Default for UnifiConfig {
    fn default() -> Self {
        Self {
            host: None,
            port: None,
            username: None,
            password: None,
            https: true,
            trust_self_signed: true,
            unifi_os: true,
            site: "default".into(),
        }
    }
}

/// One `{category -> keywords}` row of the container grouping table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryRule {
    pub name: String,
    pub keywords: Vec<String>,
}

/// Host, port and credentials checked present; built per request, never stored.
#[derive(Clone)]
pub struct Credentials {
    pub base_url: String,
    pub host: String,
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn credentials(
    provider: &'static str,
    host: &Option<String>,
    port: u16,
    https: bool,
    username: &Option<String>,
    password: &Option<String>,
) -> Result<Credentials, ProviderError> {
    let missing = |missing| ProviderError::Config { provider, missing };
    let host = present(host).ok_or_else(|| missing("host"))?;
    let username = present(username).ok_or_else(|| missing("username"))?;
    let password = password
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| missing("password"))?;
    let scheme = if https { "https" } else { "http" };
    Ok(Credentials {
        base_url: format!("{}://{}:{}", scheme, host, port),
        host: host.to_string(),
        username: username.to_string(),
        password: password.to_string(),
    })
}

impl SynologyConfig {
    pub fn credentials(&self) -> Result<Credentials, ProviderError> {
        credentials(
            "Synology",
            &self.host,
            self.port,
            self.https,
            &self.username,
            &self.password,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}

impl UnifiConfig {
    pub fn port(&self) -> u16 {
        self.port.unwrap_or(if self.unifi_os { 443 } else { 8443 })
    }

    pub fn credentials(&self) -> Result<Credentials, ProviderError> {
        credentials(
            "UniFi",
            &self.host,
            self.port(),
            self.https,
            &self.username,
            &self.password,
        )
    }

    pub fn is_configured(&self) -> bool {
        self.credentials().is_ok()
    }
}

impl fmt::Debug for SynologyConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SynologyConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("https", &self.https)
            .field("trust_self_signed", &self.trust_self_signed)
            .finish()
    }
}

impl fmt::Debug for UnifiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnifiConfig")
            .field("host", &self.host)
            .field("port", &self.port())
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("https", &self.https)
            .field("trust_self_signed", &self.trust_self_signed)
            .field("unifi_os", &self.unifi_os)
            .field("site", &self.site)
            .finish()
    }
}

impl AppConfig {
    /// Load from `CONFIG_FILE` (default `config.toml`), then apply environment overrides.
    /// A missing default `config.toml` falls back to built-in defaults; a missing explicit
    /// `CONFIG_FILE` is an error.
    pub fn load() -> anyhow::Result<Self> {
        let explicit = std::env::var("CONFIG_FILE").ok();
        let path = explicit.clone().unwrap_or_else(|| "config.toml".into());
        let mut config = match std::fs::read_to_string(&path) {
            Ok(s) => toml::from_str(&s)?,
            Err(e) if explicit.is_none() && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("{} not found, using defaults and environment", path);
                AppConfig::default()
            }
            Err(e) => return Err(anyhow::anyhow!("reading {}: {}", path, e)),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Override provider settings from environment-style lookups (`SYNOLOGY_HOST`, `UNIFI_PORT`, ...).
    pub fn apply_env_overrides<F>(&mut self, lookup: F) -> anyhow::Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = |key: &str| -> anyhow::Result<Option<u16>> {
            lookup(key)
                .map(|v| {
                    v.trim()
                        .parse::<u16>()
                        .map_err(|e| anyhow::anyhow!("{} must be a port number: {}", key, e))
                })
                .transpose()
        };

        if let Some(p) = port("PORT")? {
            self.server.port = p;
        }
        if let Some(h) = lookup("DOCKER_HOST") {
            self.docker.host = Some(h);
        }

        if let Some(h) = lookup("SYNOLOGY_HOST") {
            self.synology.host = Some(h);
        }
        if let Some(p) = port("SYNOLOGY_PORT")? {
            self.synology.port = p;
        }
        if let Some(u) = lookup("SYNOLOGY_USERNAME") {
            self.synology.username = Some(u);
        }
        if let Some(pw) = lookup("SYNOLOGY_PASSWORD") {
            self.synology.password = Some(pw);
        }

        if let Some(h) = lookup("UNIFI_HOST") {
            self.unifi.host = Some(h);
        }
        if let Some(p) = port("UNIFI_PORT")? {
            self.unifi.port = Some(p);
        }
        if let Some(u) = lookup("UNIFI_USERNAME") {
            self.unifi.username = Some(u);
        }
        if let Some(pw) = lookup("UNIFI_PASSWORD") {
            self.unifi.password = Some(pw);
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            self.http.timeout_secs > 0,
            "http.timeout_secs must be > 0, got {}",
            self.http.timeout_secs
        );
        anyhow::ensure!(
            self.synology.port > 0,
            "synology.port must be between 1 and 65535, got {}",
            self.synology.port
        );
        anyhow::ensure!(
            self.unifi.port() > 0,
            "unifi.port must be between 1 and 65535, got {}",
            self.unifi.port()
        );
        anyhow::ensure!(!self.unifi.site.is_empty(), "unifi.site must be non-empty");
        for rule in &self.categories {
            anyhow::ensure!(
                !rule.name.trim().is_empty(),
                "categories.name must be non-empty"
            );
            anyhow::ensure!(
                !rule.keywords.is_empty(),
                "categories.keywords must be non-empty for category {}",
                rule.name
            );
        }
        Ok(())
    }
}

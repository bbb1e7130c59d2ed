// UniFi Network controller: login, device list and site health

mod api;

use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{instrument, warn};

use crate::config::{Credentials, HttpConfig, UnifiConfig};
use crate::error::{ProviderError, redact};
use crate::models::{NetworkReport, NetworkSummary};
use crate::version;
use api::{RawDevice, RawHealth, UnifiResponse};

const PROVIDER: &str = "UniFi";

pub struct UnifiRepo {
    config: UnifiConfig,
    timeout: Duration,
}

/// Logged-in controller session: a cookie-holding client scoped to one request.
struct Session<'a> {
    client: Client,
    creds: Credentials,
    config: &'a UnifiConfig,
}

impl UnifiRepo {
    pub fn new(config: &UnifiConfig, http: &HttpConfig) -> Self {
        Self {
            config: config.clone(),
            timeout: http.timeout(),
        }
    }

    fn login_path(&self) -> &'static str {
        if self.config.unifi_os {
            "/api/auth/login"
        } else {
            "/api/login"
        }
    }

    /// Certificate validation follows `trust_self_signed`; controllers ship self-signed certs.
    async fn login(&self) -> Result<Session<'_>, ProviderError> {
        let creds = self.config.credentials()?;
        let client = Client::builder()
            .cookie_store(true)
            .user_agent(version::user_agent())
            .timeout(self.timeout)
            .danger_accept_invalid_certs(self.config.trust_self_signed)
            .build()
            .map_err(|e| ProviderError::auth(PROVIDER, e))?;

        let response = client
            .post(format!("{}{}", creds.base_url, self.login_path()))
            .json(&serde_json::json!({
                "username": creds.username,
                "password": creds.password,
            }))
            .send()
            .await
            .map_err(|e| ProviderError::auth(PROVIDER, redact(e)))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::auth(
                PROVIDER,
                format!("login rejected (HTTP {})", status.as_u16()),
            ));
        }

        Ok(Session {
            client,
            creds,
            config: &self.config,
        })
    }

    /// Devices, per-subsystem health and an online/clients summary for the configured site.
    /// A failed health call degrades to an empty list; a failed device call fails the request.
    #[instrument(skip(self), fields(repo = "unifi", operation = "get_devices"))]
    pub async fn get_devices(&self) -> Result<NetworkReport, ProviderError> {
        let session = self.login().await?;

        let (devices, health) = tokio::join!(
            session.stat::<RawDevice>("device"),
            session.stat::<RawHealth>("health"),
        );
        let devices: Vec<_> = devices?.into_iter().map(RawDevice::into_device).collect();
        let health = health
            .map(|h| h.into_iter().map(RawHealth::into_health).collect())
            .unwrap_or_else(|e| {
                warn!(error = %e, operation = "site_health", "UniFi site health unavailable");
                Vec::new()
            });

        Ok(NetworkReport {
            host: session.creds.host.clone(),
            summary: NetworkSummary::from_devices(&devices),
            devices,
            health,
        })
    }
}

impl Session<'_> {
    fn site_url(&self, endpoint: &str) -> String {
        let prefix = if self.config.unifi_os {
            "/proxy/network"
        } else {
            ""
        };
        format!(
            "{}{}/api/s/{}/stat/{}",
            self.creds.base_url, prefix, self.config.site, endpoint
        )
    }

    async fn stat<T: DeserializeOwned>(&self, endpoint: &str) -> Result<Vec<T>, ProviderError> {
        let body: UnifiResponse<T> = self
            .client
            .get(self.site_url(endpoint))
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::upstream(PROVIDER, redact(e)))?
            .json()
            .await
            .map_err(|e| ProviderError::upstream(PROVIDER, redact(e)))?;
        body.check()
            .map_err(|msg| ProviderError::upstream(PROVIDER, format!("stat/{}: {}", endpoint, msg)))
    }
}

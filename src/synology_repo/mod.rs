// Synology NAS: session login, storage volumes, system info and utilization

mod api;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{instrument, warn};

use crate::config::{Credentials, HttpConfig, SynologyConfig};
use crate::error::{ProviderError, redact};
use crate::models::{StorageVolume, SynologyOverview};
use crate::version;
use api::{LoginData, StorageData, SynoResponse};

const PROVIDER: &str = "Synology";

pub struct SynologyRepo {
    config: SynologyConfig,
    client: Client,
}

impl SynologyRepo {
    pub fn new(config: &SynologyConfig, http: &HttpConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(version::user_agent())
            .timeout(http.timeout())
            .danger_accept_invalid_certs(config.trust_self_signed)
            .build()?;
        Ok(Self {
            config: config.clone(),
            client,
        })
    }

    /// Log in and return the session id. The sid lives only for the current request.
    async fn login(&self, creds: &Credentials) -> Result<String, ProviderError> {
        let response = self
            .client
            .get(format!("{}{}", creds.base_url, api::AUTH_PATH))
            .query(&[
                ("api", api::API_AUTH),
                ("version", "3"),
                ("method", "login"),
                ("account", creds.username.as_str()),
                ("passwd", creds.password.as_str()),
                ("session", "FileStation"),
                ("format", "sid"),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::auth(PROVIDER, redact(e)))?;
        let body: SynoResponse<LoginData> = response
            .json()
            .await
            .map_err(|e| ProviderError::auth(PROVIDER, redact(e)))?;

        match body {
            SynoResponse {
                success: true,
                data: Some(LoginData { sid }),
                ..
            } => Ok(sid),
            other => Err(ProviderError::auth(
                PROVIDER,
                format!("login rejected (code {})", other.error_code()),
            )),
        }
    }

    /// One authenticated `entry.cgi` call; returns the `data` member.
    async fn call<T: DeserializeOwned>(
        &self,
        creds: &Credentials,
        sid: &str,
        api_name: &str,
        method: &str,
    ) -> Result<T, ProviderError> {
        let body: SynoResponse<T> = self
            .client
            .get(format!("{}{}", creds.base_url, api::ENTRY_PATH))
            .query(&[
                ("api", api_name),
                ("version", "1"),
                ("method", method),
                ("_sid", sid),
            ])
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| ProviderError::upstream(PROVIDER, redact(e)))?
            .json()
            .await
            .map_err(|e| ProviderError::upstream(PROVIDER, redact(e)))?;

        if !body.success {
            return Err(ProviderError::upstream(
                PROVIDER,
                format!("{} {} failed (code {})", api_name, method, body.error_code()),
            ));
        }
        body.data.ok_or_else(|| {
            ProviderError::upstream(PROVIDER, format!("{} {} returned no data", api_name, method))
        })
    }

    async fn fetch_volumes(
        &self,
        creds: &Credentials,
        sid: &str,
    ) -> Result<Vec<StorageVolume>, ProviderError> {
        let data: StorageData = self.call(creds, sid, api::API_STORAGE, "load_info").await?;
        Ok(data
            .volumes
            .into_iter()
            .map(api::RawVolume::into_volume)
            .collect())
    }

    /// Volumes with used/available totals and percent used.
    #[instrument(skip(self), fields(repo = "synology", operation = "get_storage"))]
    pub async fn get_storage(&self) -> Result<Vec<StorageVolume>, ProviderError> {
        let creds = self.config.credentials()?;
        let sid = self.login(&creds).await?;
        self.fetch_volumes(&creds, &sid).await
    }

    /// System identity, utilization and volumes after a single login. Each of the three
    /// sub-fetches degrades to empty on its own failure; only config and login errors fail
    /// the whole call.
    #[instrument(skip(self), fields(repo = "synology", operation = "get_overview"))]
    pub async fn get_overview(&self) -> Result<SynologyOverview, ProviderError> {
        let creds = self.config.credentials()?;
        let sid = self.login(&creds).await?;

        let (system, utilization, volumes) = tokio::join!(
            self.call::<serde_json::Value>(&creds, &sid, api::API_SYSTEM, "info"),
            self.call::<serde_json::Value>(&creds, &sid, api::API_UTILIZATION, "get"),
            self.fetch_volumes(&creds, &sid),
        );

        let empty = || serde_json::Value::Object(Default::default());
        Ok(SynologyOverview {
            host: creds.host.clone(),
            system: system.unwrap_or_else(|e| {
                warn!(error = %e, operation = "system_info", "Synology system info unavailable");
                empty()
            }),
            utilization: utilization.unwrap_or_else(|e| {
                warn!(error = %e, operation = "utilization", "Synology utilization unavailable");
                empty()
            }),
            volumes: volumes.unwrap_or_else(|e| {
                warn!(error = %e, operation = "storage", "Synology storage unavailable");
                Vec::new()
            }),
        })
    }
}

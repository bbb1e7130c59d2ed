// Provider-level failures surfaced to the endpoint layer

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    /// Host or credentials missing; no network call was attempted.
    #[error("{provider} not configured: missing {missing}")]
    Config {
        provider: &'static str,
        missing: &'static str,
    },

    /// Login rejected, or the login call itself failed or timed out.
    #[error("Failed to authenticate with {provider}: {reason}")]
    Auth {
        provider: &'static str,
        reason: String,
    },

    /// A call after login failed, timed out, or returned malformed data.
    #[error("{provider} request failed: {reason}")]
    Upstream {
        provider: &'static str,
        reason: String,
    },

    #[error("Invalid action: {0}")]
    InvalidAction(String),
}

impl ProviderError {
    pub fn auth(provider: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Auth {
            provider,
            reason: reason.to_string(),
        }
    }

    pub fn upstream(provider: &'static str, reason: impl std::fmt::Display) -> Self {
        Self::Upstream {
            provider,
            reason: reason.to_string(),
        }
    }

    /// True when the caller sent a malformed request (maps to a 4xx instead of a body-level failure).
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAction(_))
    }
}

/// Drop the request URL from a reqwest error before it is displayed.
/// The Synology login carries the password in its query string.
pub(crate) fn redact(e: reqwest::Error) -> reqwest::Error {
    e.without_url()
}

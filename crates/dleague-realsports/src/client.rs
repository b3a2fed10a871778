// Real Sports draft lookup client.
//
// Fetches a single user's draft entry for a contest from the web app's JSON
// endpoint, forwarding the static auth headers the web app sends.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use dleague_core::config::{Config, CredentialsConfig, RealSportsSettings};
use dleague_core::model::RealSportsDraft;
use dleague_core::source::{DraftSource, FetchError};

use crate::token::current_request_token;
use crate::wire::parse_draft;

// ---------------------------------------------------------------------------
// ApiClient
// ---------------------------------------------------------------------------

/// Low-level client holding credentials and endpoint settings.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    origin: String,
    version: String,
    device_type: String,
    timeout: Duration,
    auth_info: String,
    device_uuid: String,
}

impl ApiClient {
    pub fn new(settings: &RealSportsSettings, auth_info: String, device_uuid: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: settings.base_url.clone(),
            origin: settings.origin.trim_end_matches('/').to_string(),
            version: settings.version.clone(),
            device_type: settings.device_type.clone(),
            timeout: Duration::from_millis(settings.timeout_ms),
            auth_info,
            device_uuid,
        }
    }

    /// `{base}/games/playerratingcontest/{id}/view/{code}?contestType=sport`,
    /// with the code percent-encoded as a single path segment.
    pub fn draft_url(&self, draft_id: u64, user_code: &str) -> Result<reqwest::Url, FetchError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| FetchError::Transport(format!("invalid base url {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::Transport(format!("base url {} cannot take a path", self.base_url)))?
            .pop_if_empty()
            .extend([
                "games",
                "playerratingcontest",
                &draft_id.to_string(),
                "view",
                user_code,
            ]);
        url.set_query(Some("contestType=sport"));
        Ok(url)
    }

    pub async fn fetch_draft(
        &self,
        draft_id: u64,
        user_code: &str,
    ) -> Result<RealSportsDraft, FetchError> {
        let url = self.draft_url(draft_id, user_code)?;
        debug!(draft_id, user_code, "fetching Real Sports draft");

        let response = self
            .http
            .get(url)
            .timeout(self.timeout)
            .header("real-auth-info", &self.auth_info)
            .header("real-device-type", &self.device_type)
            .header("real-device-uuid", &self.device_uuid)
            .header("real-request-token", current_request_token())
            .header("real-version", &self.version)
            .header("Origin", &self.origin)
            .header("Referer", format!("{}/", self.origin))
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(draft_id, user_code, %status, "Real Sports API error");
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| FetchError::Decode(e.to_string()))?;
        Ok(parse_draft(&body, draft_id))
    }
}

// ---------------------------------------------------------------------------
// RealSportsClient wrapper
// ---------------------------------------------------------------------------

/// Either a configured API client, or disabled when credentials are missing.
pub enum RealSportsClient {
    Active(ApiClient),
    Disabled,
}

impl RealSportsClient {
    /// `Active` only when both the auth info and device UUID are non-empty.
    pub fn new(settings: &RealSportsSettings, credentials: &CredentialsConfig) -> Self {
        let present = |v: &Option<String>| v.as_deref().map(str::trim).filter(|s| !s.is_empty()).map(str::to_string);
        match (
            present(&credentials.real_auth_info),
            present(&credentials.real_device_uuid),
        ) {
            (Some(auth), Some(uuid)) => RealSportsClient::Active(ApiClient::new(settings, auth, uuid)),
            _ => RealSportsClient::Disabled,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.site.real_sports, &config.credentials)
    }

    pub fn is_active(&self) -> bool {
        matches!(self, RealSportsClient::Active(_))
    }
}

#[async_trait]
impl DraftSource for RealSportsClient {
    async fn fetch_draft(
        &self,
        draft_id: u64,
        user_code: &str,
    ) -> Result<RealSportsDraft, FetchError> {
        match self {
            RealSportsClient::Active(client) => client.fetch_draft(draft_id, user_code).await,
            RealSportsClient::Disabled => {
                warn!("Real Sports API credentials not configured");
                Err(FetchError::NotConfigured)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

//! Matrix client-server API delivery.
//!
//! [`MatrixNotifier`] posts a plain-text `m.room.message` to a single room.
//! A failed delivery is logged and reported as `false`; it never fails the
//! request that triggered it, and it is never retried.

use std::time::Duration;

/// HTTP request timeout for a single delivery attempt.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct MatrixConfig {
    pub homeserver: String,
    pub access_token: Option<String>,
    pub room_id: Option<String>,
}

impl MatrixConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var               | Default              |
    /// |-----------------------|----------------------|
    /// | `MATRIX_HOMESERVER`   | `https://matrix.org` |
    /// | `MATRIX_ACCESS_TOKEN` | unset                |
    /// | `MATRIX_ROOM_ID`      | unset                |
    pub fn from_env() -> Self {
        let non_empty = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
        Self {
            homeserver: std::env::var("MATRIX_HOMESERVER")
                .unwrap_or_else(|_| "https://matrix.org".into()),
            access_token: non_empty("MATRIX_ACCESS_TOKEN"),
            room_id: non_empty("MATRIX_ROOM_ID"),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.access_token.is_some() && self.room_id.is_some()
    }
}

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Matrix is not configured")]
    NotConfigured,

    #[error("Invalid homeserver URL: {0}")]
    InvalidUrl(String),

    /// The underlying HTTP request failed (network, DNS, timeout, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Matrix returned HTTP {0}")]
    HttpStatus(u16),
}

// ---------------------------------------------------------------------------
// MatrixNotifier
// ---------------------------------------------------------------------------

pub struct MatrixNotifier {
    client: reqwest::Client,
    config: MatrixConfig,
}

impl MatrixNotifier {
    pub fn new(config: MatrixConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { client, config })
    }

    pub fn is_configured(&self) -> bool {
        self.config.is_configured()
    }

    /// `{homeserver}/_matrix/client/r0/rooms/{room}/send/m.room.message`
    /// with the room id as a single path segment.
    fn send_url(&self, room_id: &str) -> Result<reqwest::Url, NotifyError> {
        let mut url = reqwest::Url::parse(&self.config.homeserver)
            .map_err(|e| NotifyError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| NotifyError::InvalidUrl(self.config.homeserver.clone()))?
            .pop_if_empty()
            .extend(["_matrix", "client", "r0", "rooms", room_id, "send", "m.room.message"]);
        Ok(url)
    }

    /// Post `body` to the room. Returns whether the homeserver accepted it.
    pub async fn send(&self, body: &str) -> bool {
        match self.try_send(body).await {
            Ok(()) => {
                tracing::info!("Matrix message delivered");
                true
            }
            Err(NotifyError::NotConfigured) => {
                tracing::warn!("Matrix not configured, message skipped");
                false
            }
            Err(e) => {
                tracing::error!(error = %e, "Matrix delivery failed");
                false
            }
        }
    }

    /// Execute a single POST request and check the response status.
    pub async fn try_send(&self, body: &str) -> Result<(), NotifyError> {
        let (Some(token), Some(room_id)) = (&self.config.access_token, &self.config.room_id) else {
            return Err(NotifyError::NotConfigured);
        };

        let payload = serde_json::json!({
            "msgtype": "m.text",
            "body": body,
        });
        let response = self
            .client
            .post(self.send_url(room_id)?)
            .bearer_auth(token)
            .json(&payload)
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(NotifyError::HttpStatus(response.status().as_u16()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

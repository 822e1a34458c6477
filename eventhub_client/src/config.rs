use std::time::Duration;

use url::Url;

use crate::{ClientError, ClientResult};

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(30_000);
pub const DEFAULT_KEYRING_SERVICE: &str = "eventhub";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
    pub keyring_service: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: concat!("eventhub/", env!("CARGO_PKG_VERSION")).to_owned(),
            keyring_service: DEFAULT_KEYRING_SERVICE.to_owned(),
        }
    }
}

impl ClientConfig {
    pub fn validate(&self) -> ClientResult<()> {
        if self.base_url.trim().is_empty() {
            return Err(ClientError::InvalidConfig("EVENTHUB_API_URL must be set"));
        }
        let parsed = Url::parse(self.base_url.trim())
            .map_err(|_| ClientError::InvalidConfig("EVENTHUB_API_URL must be an absolute url"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidConfig(
                "EVENTHUB_API_URL must use http or https",
            ));
        }
        if self.timeout.is_zero() {
            return Err(ClientError::InvalidConfig("timeout must be greater than zero"));
        }
        if self.user_agent.trim().is_empty() {
            return Err(ClientError::InvalidConfig("user_agent must be set"));
        }
        if self.keyring_service.trim().is_empty() {
            return Err(ClientError::InvalidConfig("keyring_service must be set"));
        }
        Ok(())
    }

    /// Base url without a trailing slash, ready for endpoint concatenation.
    pub fn normalized_base_url(&self) -> String {
        self.base_url.trim().trim_end_matches('/').to_owned()
    }

    /// Scheme, host and port of the API; sessions are stored per origin.
    pub fn origin(&self) -> ClientResult<String> {
        let parsed = Url::parse(self.base_url.trim())?;
        Ok(parsed.origin().ascii_serialization())
    }
}

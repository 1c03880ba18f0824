//! Process-wide Loops configuration.
//!
//! Load once at startup and hand to [`LoopsSender::from_config`](crate::providers::LoopsSender::from_config).
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `LOOPS_API_KEY` | Loops API key (empty means not configured) |
//! | `LOOPS_BASE_URL` | API base URL (default: `https://app.loops.so/api/v1`) |

use std::env;
use std::time::Duration;

/// Default Loops API base URL.
pub const DEFAULT_BASE_URL: &str = "https://app.loops.so/api/v1";

/// Timeout applied to every delivery request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Loops API configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct LoopsConfig {
    /// API key used as the bearer token
    pub api_key: Option<String>,
    /// API base URL, without trailing slash
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl LoopsConfig {
    /// Create a configuration with the given API key and default endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().api_key(api_key)
    }

    /// Read configuration from `LOOPS_API_KEY` and `LOOPS_BASE_URL`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(key) = env::var("LOOPS_API_KEY") {
            config = config.api_key(key);
        }
        if let Ok(url) = env::var("LOOPS_BASE_URL") {
            config = config.base_url(url);
        }

        tracing::debug!(
            configured = config.is_configured(),
            base_url = %config.base_url,
            "Loaded Loops configuration"
        );

        config
    }

    /// Set the API key. Blank keys count as not configured.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = if key.trim().is_empty() { None } else { Some(key) };
        self
    }

    /// Set a custom base URL (for testing).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for LoopsConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for LoopsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoopsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

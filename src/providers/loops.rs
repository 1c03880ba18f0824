//! Loops.so transactional API provider.
//!
//! # Example
//!
//! ```rust,ignore
//! use loops_action::LoopsConfig;
//! use loops_action::providers::LoopsSender;
//!
//! let sender = LoopsSender::from_config(&LoopsConfig::from_env());
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::LoopsConfig;
use crate::error::DeliveryError;
use crate::payload::EmailPayload;
use crate::sender::{DeliveryResult, Sender};

/// Loops.so transactional email sender.
///
/// Endpoint, key and timeout all come from [`LoopsConfig`].
pub struct LoopsSender {
    config: LoopsConfig,
    client: Client,
}

impl LoopsSender {
    /// Create a new Loops sender with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::from_config(&LoopsConfig::new(api_key))
    }

    /// Create a sender from process configuration.
    ///
    /// A config without an API key yields a sender whose
    /// [`validate_config`](Sender::validate_config) fails.
    pub fn from_config(config: &LoopsConfig) -> Self {
        Self::with_client(config, Client::new())
    }

    /// Create with a custom reqwest client.
    pub fn with_client(config: &LoopsConfig, client: Client) -> Self {
        Self {
            config: config.clone(),
            client,
        }
    }

    /// The configuration this sender was built from.
    pub fn config(&self) -> &LoopsConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/transactional", self.config.base_url)
    }
}

impl Default for LoopsSender {
    fn default() -> Self {
        Self::from_config(&LoopsConfig::default())
    }
}

#[async_trait]
impl Sender for LoopsSender {
    async fn send(&self, payload: &EmailPayload) -> Result<DeliveryResult, DeliveryError> {
        let api_key = self.config.api_key.as_deref().ok_or(DeliveryError::NotConfigured)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .header("User-Agent", format!("loops-action/{}", crate::VERSION))
            .timeout(self.config.timeout)
            .json(payload)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if status == StatusCode::OK {
            // Any body counts as success; keep it when it's JSON.
            let mut result = DeliveryResult::empty();
            if let Ok(json) = serde_json::from_str(&body) {
                result = result.with_response(json);
            }
            Ok(result)
        } else {
            Err(DeliveryError::rejected(status.as_u16(), body))
        }
    }

    fn provider_name(&self) -> &'static str {
        "loops"
    }

    fn validate_config(&self) -> Result<(), DeliveryError> {
        if self.config.is_configured() {
            Ok(())
        } else {
            Err(DeliveryError::NotConfigured)
        }
    }
}

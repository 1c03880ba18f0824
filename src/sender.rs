//! Sender trait and delivery result types.
//!
//! `#[async_trait]` is used so senders can be held as `Arc<dyn Sender>`,
//! letting a host pick the real Loops sender in production and the local or
//! logger sender elsewhere without recompiling.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DeliveryError;
use crate::payload::EmailPayload;

/// Result of a successful delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResult {
    /// Message ID, when the provider assigns one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_id: Option<String>,
    /// Optional provider-specific response data
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider_response: Option<serde_json::Value>,
}

impl DeliveryResult {
    /// A result with nothing but success.
    pub fn empty() -> Self {
        Self {
            message_id: None,
            provider_response: None,
        }
    }

    /// Create a delivery result with a message ID.
    pub fn new(message_id: impl Into<String>) -> Self {
        Self {
            message_id: Some(message_id.into()),
            provider_response: None,
        }
    }

    /// Attach the provider's response body.
    pub fn with_response(mut self, response: serde_json::Value) -> Self {
        self.provider_response = Some(response);
        self
    }
}

/// Trait for transactional email senders.
///
/// # Example
///
/// ```ignore
/// use loops_action::{LoopsConfig, Sender};
/// use loops_action::providers::LoopsSender;
///
/// let sender = LoopsSender::from_config(&LoopsConfig::from_env());
/// sender.validate_config()?;
///
/// let result = sender.send(&payload).await?;
/// ```
#[async_trait]
pub trait Sender: Send + Sync {
    /// Deliver one payload. No retries.
    async fn send(&self, payload: &EmailPayload) -> Result<DeliveryResult, DeliveryError>;

    /// Get the provider name (for logging/debugging).
    fn provider_name(&self) -> &'static str {
        "unknown"
    }

    /// Verify the sender can be used at all.
    ///
    /// Callers check this before building payloads; a sender that fails here
    /// must not be asked to send.
    fn validate_config(&self) -> Result<(), DeliveryError> {
        Ok(())
    }
}

#[async_trait]
impl<S: Sender + ?Sized> Sender for std::sync::Arc<S> {
    async fn send(&self, payload: &EmailPayload) -> Result<DeliveryResult, DeliveryError> {
        (**self).send(payload).await
    }

    fn provider_name(&self) -> &'static str {
        (**self).provider_name()
    }

    fn validate_config(&self) -> Result<(), DeliveryError> {
        (**self).validate_config()
    }
}

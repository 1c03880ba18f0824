//! Logger sender that only logs payloads.
//!
//! Useful for staging environments or when you want to see what would be
//! sent without calling the API.

use async_trait::async_trait;

use crate::error::DeliveryError;
use crate::payload::EmailPayload;
use crate::sender::{DeliveryResult, Sender};

/// Sender that emits tracing events instead of delivering.
pub struct LoggerSender {
    /// If true, log every variable. If false, just the recipient summary.
    log_full: bool,
}

impl LoggerSender {
    /// Create a logger sender with brief output.
    pub fn new() -> Self {
        Self { log_full: false }
    }

    /// Create a logger sender that logs all variables.
    pub fn full() -> Self {
        Self { log_full: true }
    }

    /// Set whether to log all variables.
    pub fn log_full(mut self, full: bool) -> Self {
        self.log_full = full;
        self
    }
}

impl Default for LoggerSender {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Sender for LoggerSender {
    async fn send(&self, payload: &EmailPayload) -> Result<DeliveryResult, DeliveryError> {
        let message_id = uuid::Uuid::new_v4().to_string();

        if self.log_full {
            tracing::info!(
                message_id = %message_id,
                transactional_id = %payload.transactional_id,
                to = %payload.email,
                subject = ?payload.subject(),
                variables = payload.data_variables.len(),
                "Transactional email logged (full)"
            );

            for (name, value) in payload.data_variables.iter() {
                tracing::debug!(name, value, "Data variable");
            }
        } else {
            tracing::info!(
                message_id = %message_id,
                transactional_id = %payload.transactional_id,
                to = %payload.email,
                "Transactional email logged"
            );
        }

        Ok(DeliveryResult::new(message_id))
    }

    fn provider_name(&self) -> &'static str {
        "logger"
    }
}

//! Local sender for development and testing.
//!
//! Captures payloads in memory instead of calling the API, for programmatic
//! assertions in tests.
//!
//! ```rust,ignore
//! use loops_action::providers::LocalSender;
//! use loops_action::testing::*;
//!
//! #[tokio::test]
//! async fn test_sends_confirmation() {
//!     let sender = LocalSender::new();
//!
//!     // Code under test
//!     dispatcher_with(&sender).on_entry_created(1, 7).await;
//!
//!     assert_payload_sent(&sender);
//!     assert_payload_to(&sender, "user@example.com");
//! }
//! ```

use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::DeliveryError;
use crate::payload::EmailPayload;
use crate::sender::{DeliveryResult, Sender};
use crate::storage::{MemoryStorage, StoredPayload};

/// Sender that stores payloads in memory.
pub struct LocalSender {
    storage: Arc<MemoryStorage>,
    /// If set, send() returns this error (for testing error paths).
    fail_with: RwLock<Option<DeliveryError>>,
    configured: bool,
}

impl LocalSender {
    /// Create a new local sender with fresh storage.
    pub fn new() -> Self {
        Self::with_storage(MemoryStorage::shared())
    }

    /// Create a local sender with existing storage.
    pub fn with_storage(storage: Arc<MemoryStorage>) -> Self {
        Self {
            storage,
            fail_with: RwLock::new(None),
            configured: true,
        }
    }

    /// Create a sender that reports itself as not configured.
    ///
    /// Mirrors a Loops sender without an API key.
    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::new()
        }
    }

    /// Get a reference to the underlying storage.
    pub fn storage(&self) -> Arc<MemoryStorage> {
        Arc::clone(&self.storage)
    }

    // =========================================================================
    // Failure Simulation (for testing)
    // =========================================================================

    /// Make every send fail with `error` until cleared.
    pub fn set_failure(&self, error: DeliveryError) {
        *self.fail_with.write() = Some(error);
    }

    /// Make every send fail as if the API answered `status` with `body`.
    pub fn set_rejection(&self, status: u16, body: impl Into<String>) {
        self.set_failure(DeliveryError::rejected(status, body));
    }

    /// Clear the failure state.
    pub fn clear_failure(&self) {
        *self.fail_with.write() = None;
    }

    // =========================================================================
    // Payload Access (for testing assertions)
    // =========================================================================

    /// Get all captured payloads (newest first).
    pub fn payloads(&self) -> Vec<StoredPayload> {
        self.storage.all()
    }

    /// Get the most recently sent payload.
    pub fn last_payload(&self) -> Option<StoredPayload> {
        self.storage.all().into_iter().next()
    }

    /// Get the count of sent payloads.
    pub fn payload_count(&self) -> usize {
        self.storage.count()
    }

    /// Check if anything was sent.
    pub fn has_payloads(&self) -> bool {
        self.storage.count() > 0
    }

    /// Clear all captured payloads.
    pub fn clear(&self) {
        self.storage.clear();
    }

    /// Remove and return all captured payloads.
    pub fn flush(&self) -> Vec<StoredPayload> {
        self.storage.flush()
    }

    /// Check if a payload was sent to a specific address.
    pub fn sent_to(&self, email: &str) -> bool {
        self.storage
            .all()
            .iter()
            .any(|stored| stored.payload.email.eq_ignore_ascii_case(email))
    }

    /// Check if a payload with the given rendered subject was sent.
    pub fn sent_with_subject(&self, subject: &str) -> bool {
        self.storage
            .all()
            .iter()
            .any(|stored| stored.payload.subject() == Some(subject))
    }

    /// Find payloads matching a predicate.
    pub fn find_payloads<F>(&self, predicate: F) -> Vec<StoredPayload>
    where
        F: Fn(&EmailPayload) -> bool,
    {
        self.storage
            .all()
            .into_iter()
            .filter(|stored| predicate(&stored.payload))
            .collect()
    }
}

impl Default for LocalSender {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for LocalSender {
    fn clone(&self) -> Self {
        Self {
            storage: Arc::clone(&self.storage),
            fail_with: RwLock::new(self.fail_with.read().clone()),
            configured: self.configured,
        }
    }
}

#[async_trait]
impl Sender for LocalSender {
    async fn send(&self, payload: &EmailPayload) -> Result<DeliveryResult, DeliveryError> {
        if let Some(ref error) = *self.fail_with.read() {
            return Err(error.clone());
        }

        let message_id = self.storage.push(payload.clone());
        Ok(DeliveryResult::new(message_id))
    }

    fn provider_name(&self) -> &'static str {
        "local"
    }

    fn validate_config(&self) -> Result<(), DeliveryError> {
        if self.configured {
            Ok(())
        } else {
            Err(DeliveryError::NotConfigured)
        }
    }
}

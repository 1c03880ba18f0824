//! In-memory payload storage for the local sender.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::payload::EmailPayload;

/// A captured payload with metadata.
#[derive(Debug, Clone)]
pub struct StoredPayload {
    /// Unique identifier for this send.
    pub id: String,
    /// The payload as it would have been sent.
    pub payload: EmailPayload,
    /// When the payload was captured.
    pub sent_at: DateTime<Utc>,
}

/// Thread-safe in-memory storage, kept in send order.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    payloads: RwLock<Vec<StoredPayload>>,
}

impl MemoryStorage {
    /// Create a new empty storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create storage wrapped in an Arc for sharing.
    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Store a payload and return its ID.
    pub fn push(&self, payload: EmailPayload) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        self.payloads.write().push(StoredPayload {
            id: id.clone(),
            payload,
            sent_at: Utc::now(),
        });
        id
    }

    /// Get a payload by ID.
    pub fn get(&self, id: &str) -> Option<StoredPayload> {
        self.payloads.read().iter().find(|p| p.id == id).cloned()
    }

    /// All stored payloads, newest first.
    pub fn all(&self) -> Vec<StoredPayload> {
        self.payloads.read().iter().rev().cloned().collect()
    }

    /// Number of stored payloads.
    pub fn count(&self) -> usize {
        self.payloads.read().len()
    }

    /// Clear all stored payloads.
    pub fn clear(&self) {
        self.payloads.write().clear();
    }

    /// Remove and return all stored payloads, newest first.
    pub fn flush(&self) -> Vec<StoredPayload> {
        let mut payloads = std::mem::take(&mut *self.payloads.write());
        payloads.reverse();
        payloads
    }
}

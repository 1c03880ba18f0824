//! Error types for loops-action.

use thiserror::Error;

/// Errors returned by a [`Sender`](crate::Sender) when delivering a payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeliveryError {
    /// The sender has no API credential configured.
    #[error("Transactional email sender not configured")]
    NotConfigured,

    /// Network-level failure (DNS, TLS, connection refused, timeout).
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-200 status.
    #[error("Remote API rejected request (HTTP {status}): {body}")]
    RemoteRejected {
        /// HTTP status code returned by the API
        status: u16,
        /// Raw response body, kept for diagnosis
        body: String,
    },
}

impl DeliveryError {
    /// Create a rejection error from a status code and response body.
    pub fn rejected(status: u16, body: impl Into<String>) -> Self {
        Self::RemoteRejected {
            status,
            body: body.into(),
        }
    }

    /// HTTP status of a remote rejection, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::RemoteRejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(feature = "loops")]
impl From<reqwest::Error> for DeliveryError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors that abort a single action run.
///
/// None of these propagate into the entry create/update flow; the
/// [`Dispatcher`](crate::Dispatcher) records them per action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    /// No API credential configured.
    #[error("Loops API key not configured")]
    ConfigurationMissing,

    /// Resolved recipient is empty or not a valid email address.
    #[error("Invalid recipient email: '{0}'")]
    InvalidRecipient(String),

    /// The host could not find the entry.
    #[error("Entry {0} not found")]
    EntryNotFound(u64),

    /// Delivery to the remote API failed.
    #[error(transparent)]
    Delivery(DeliveryError),
}

impl From<DeliveryError> for ActionError {
    fn from(err: DeliveryError) -> Self {
        match err {
            DeliveryError::NotConfigured => Self::ConfigurationMissing,
            other => Self::Delivery(other),
        }
    }
}

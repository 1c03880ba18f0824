//! # loops-action
//!
//! Send Loops.so transactional emails when form entries are created or
//! updated.
//!
//! A host form framework stores entries and per-form action settings. When
//! an entry is saved it tells the [`Dispatcher`], which runs every
//! configured Loops action on that form:
//!
//! 1. the event filter ([`should_fire`]) decides whether the action runs,
//! 2. the recipient comes from a form field or a fixed address,
//! 3. entry metadata and field values become template variables,
//! 4. an optional subject line is rendered from those variables,
//! 5. the payload is POSTed to the Loops transactional endpoint.
//!
//! Failures are logged and recorded in the returned [`DispatchReport`]; they
//! never fail the entry save.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use loops_action::{Dispatcher, LoopsConfig, MemoryHost};
//! use loops_action::providers::LoopsSender;
//!
//! let config = LoopsConfig::from_env();
//! let dispatcher = Dispatcher::loops(host, LoopsSender::from_config(&config));
//!
//! // After the host saves an entry:
//! let report = dispatcher.on_entry_created(entry_id, form_id).await;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Description |
//! |----------|-------------|
//! | `LOOPS_API_KEY` | Loops API key; without it nothing is sent |
//! | `LOOPS_BASE_URL` | API base URL override |
//!
//! ## Feature Flags
//!
//! - `loops` - Loops.so HTTP sender (default)
//! - `local` - LocalSender and test assertions (default)
//! - `metrics` - Prometheus-style metrics (counters/histograms)
//!
//! ## Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `loops_action_sends_total` | Counter | provider, status | Total sends attempted |
//! | `loops_action_send_duration_seconds` | Histogram | provider | Send duration |

/// The version of the loops-action crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod action;
mod config;
mod dispatch;
mod entry;
mod error;
mod host;
mod payload;
mod recipient;
mod sender;
mod settings;
mod template;
mod trigger;
mod variables;

pub mod providers;

#[cfg(feature = "local")]
mod storage;

#[cfg(feature = "local")]
pub mod testing;

// Re-exports
pub use action::{FormAction, LoopsAction};
pub use config::{LoopsConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use dispatch::{ActionOutcome, DispatchReport, Dispatcher};
pub use entry::{Entry, FieldValue, FieldValues};
pub use error::{ActionError, DeliveryError};
pub use host::{ConfiguredAction, FormHost, MemoryHost};
pub use payload::{assemble, prepare_payload, EmailPayload, SUBJECT_VARIABLE};
pub use recipient::{recipient_for, resolve_recipient, Recipient};
pub use sender::{DeliveryResult, Sender};
pub use settings::{config_fields, ActionMeta, ActionSettings, ConfigField, FieldInput, LOOPS_ACTION};
pub use template::render;
pub use trigger::{should_fire, EventSelection, Trigger};
pub use variables::{build_variables, sanitize_key, TemplateVariables, SYSTEM_VARIABLES};

#[cfg(feature = "local")]
pub use storage::{MemoryStorage, StoredPayload};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::{
        ActionError, ActionSettings, DeliveryError, DeliveryResult, Dispatcher, EmailPayload,
        Entry, FieldValue, FormAction, FormHost, LoopsConfig, Sender, Trigger,
    };
}

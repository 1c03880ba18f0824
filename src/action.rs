//! The form-action capability and its Loops implementation.
//!
//! Hosts register a [`FormAction`] for an action type and call
//! [`FormAction::execute`] once per configured action whose event filter
//! passes. [`Dispatcher`](crate::Dispatcher) does that loop for you.

use async_trait::async_trait;
use tracing::Instrument;

#[cfg(feature = "metrics")]
use std::time::Instant;

use crate::entry::Entry;
use crate::error::{ActionError, DeliveryError};
use crate::payload::prepare_payload;
use crate::sender::{DeliveryResult, Sender};
use crate::settings::{config_fields, ActionMeta, ActionSettings, ConfigField, LOOPS_ACTION};
use crate::trigger::Trigger;

/// What a host needs from a pluggable form action.
#[async_trait]
pub trait FormAction: Send + Sync {
    /// Registration metadata.
    fn meta(&self) -> ActionMeta;

    /// Settings for a newly added action.
    fn defaults(&self) -> ActionSettings;

    /// Fields of the action's configuration form.
    fn config_form(&self) -> Vec<ConfigField>;

    /// Whether the action can run at all.
    ///
    /// Checked once per event before any entry lookups.
    fn ready(&self) -> Result<(), ActionError> {
        Ok(())
    }

    /// Run the action for one entry.
    async fn execute(
        &self,
        trigger: Trigger,
        entry: &Entry,
        settings: &ActionSettings,
    ) -> Result<DeliveryResult, ActionError>;
}

/// Sends a Loops transactional email for each entry event.
pub struct LoopsAction<S> {
    sender: S,
}

impl<S: Sender> LoopsAction<S> {
    /// Create the action around a sender.
    pub fn new(sender: S) -> Self {
        Self { sender }
    }

    /// The underlying sender.
    pub fn sender(&self) -> &S {
        &self.sender
    }

    async fn run(
        &self,
        trigger: Trigger,
        entry: &Entry,
        settings: &ActionSettings,
    ) -> Result<DeliveryResult, ActionError> {
        let provider = self.sender.provider_name();

        let payload = match prepare_payload(entry, settings, trigger) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(error = %e, "Invalid recipient email, send aborted");
                return Err(e);
            }
        };

        tracing::debug!(to = %payload.email, "Sending transactional email");

        #[cfg(feature = "metrics")]
        let start = Instant::now();

        let result = self.sender.send(&payload).await;

        #[cfg(feature = "metrics")]
        {
            let duration = start.elapsed().as_secs_f64();
            let status = if result.is_ok() { "success" } else { "error" };
            metrics::counter!("loops_action_sends_total", "provider" => provider, "status" => status)
                .increment(1);
            metrics::histogram!("loops_action_send_duration_seconds", "provider" => provider)
                .record(duration);
        }

        match &result {
            Ok(_) => tracing::info!(provider, to = %payload.email, "Transactional email sent"),
            Err(DeliveryError::RemoteRejected { status, body }) => {
                tracing::error!(provider, status, body = %body, "Loops API rejected request")
            }
            Err(e) => tracing::error!(provider, error = %e, "Loops API error"),
        }

        result.map_err(ActionError::from)
    }
}

#[async_trait]
impl<S: Sender> FormAction for LoopsAction<S> {
    fn meta(&self) -> ActionMeta {
        LOOPS_ACTION
    }

    fn defaults(&self) -> ActionSettings {
        ActionSettings::default()
    }

    fn config_form(&self) -> Vec<ConfigField> {
        config_fields()
    }

    fn ready(&self) -> Result<(), ActionError> {
        self.sender.validate_config().map_err(ActionError::from)
    }

    async fn execute(
        &self,
        trigger: Trigger,
        entry: &Entry,
        settings: &ActionSettings,
    ) -> Result<DeliveryResult, ActionError> {
        if let Err(e) = self.ready() {
            tracing::debug!(error = %e, "Loops action skipped");
            return Err(e);
        }

        let span = tracing::info_span!(
            "loops_action.execute",
            provider = self.sender.provider_name(),
            trigger = %trigger,
            entry_id = entry.id,
            form_id = entry.form_id,
            template_id = %settings.template_id,
        );

        self.run(trigger, entry, settings).instrument(span).await
    }
}

#[cfg(all(test, feature = "local"))]
mod tests {
    use super::*;
    use crate::providers::LocalSender;

    fn entry() -> Entry {
        Entry::new(1, 7)
            .item_key("abc")
            .field("name", "Sam")
            .field("email", "sam@x.com")
    }

    fn settings() -> ActionSettings {
        ActionSettings::new("tmpl1")
            .to_field("email")
            .subject_line("Hi {{ name }}")
    }

    #[tokio::test]
    async fn test_execute_sends() {
        let action = LoopsAction::new(LocalSender::new());

        let result = action.execute(Trigger::Create, &entry(), &settings()).await;
        assert!(result.is_ok());

        let stored = action.sender().last_payload().unwrap();
        assert_eq!(stored.payload.email, "sam@x.com");
        assert_eq!(stored.payload.subject(), Some("Hi Sam"));
        assert_eq!(stored.payload.data_variables.get("trigger_type"), Some("create"));
    }

    #[tokio::test]
    async fn test_execute_invalid_recipient() {
        let action = LoopsAction::new(LocalSender::new());
        let settings = settings().to_field("name");

        let result = action.execute(Trigger::Create, &entry(), &settings).await;
        assert_eq!(result.unwrap_err(), ActionError::InvalidRecipient("Sam".into()));
        assert!(!action.sender().has_payloads());
    }

    #[tokio::test]
    async fn test_execute_not_configured() {
        let action = LoopsAction::new(LocalSender::unconfigured());

        let result = action.execute(Trigger::Create, &entry(), &settings()).await;
        assert_eq!(result.unwrap_err(), ActionError::ConfigurationMissing);
        assert!(!action.sender().has_payloads());
    }

    #[tokio::test]
    async fn test_execute_rejected() {
        let action = LoopsAction::new(LocalSender::new());
        action.sender().set_rejection(500, "server error");

        let result = action.execute(Trigger::Update, &entry(), &settings()).await;
        assert_eq!(
            result.unwrap_err(),
            ActionError::Delivery(DeliveryError::rejected(500, "server error"))
        );
    }

    #[test]
    fn test_capabilities() {
        let action = LoopsAction::new(LocalSender::new());
        assert_eq!(action.meta().slug, "loops");
        assert_eq!(action.defaults(), ActionSettings::default());
        assert_eq!(action.config_form().len(), 5);
    }
}

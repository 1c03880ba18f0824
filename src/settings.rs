//! Per-action settings and the configuration form description.

use serde::{Deserialize, Serialize};

use crate::trigger::{EventSelection, Trigger};

/// Settings for one configured Loops action.
///
/// Created and edited by the host's admin UI; read-only here. Deserializes
/// from the host's stored record, filling missing keys with defaults.
///
/// # Example
///
/// ```
/// use loops_action::ActionSettings;
///
/// let settings: ActionSettings = serde_json::from_str(
///     r#"{"template_id": "tmpl1", "to_field": "5", "event": "update"}"#,
/// ).unwrap();
///
/// assert_eq!(settings.template_id, "tmpl1");
/// assert_eq!(settings.to_email, "");
/// assert_eq!(settings.event.as_slice(), ["update"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    /// Loops transactional template ID
    pub template_id: String,
    /// Field key whose value is the recipient address
    pub to_field: String,
    /// Fixed recipient address, used when `to_field` yields nothing
    pub to_email: String,
    /// Subject template, rendered into the `subject` variable
    pub subject_line: String,
    /// Comma-separated CC list. Stored but not used for delivery.
    pub cc_emails: String,
    /// Events this action fires on
    pub event: EventSelection,
}

impl ActionSettings {
    /// Create settings for a template with defaults everywhere else.
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: template_id.into(),
            ..Self::default()
        }
    }

    /// Set the recipient field key.
    pub fn to_field(mut self, key: impl Into<String>) -> Self {
        self.to_field = key.into();
        self
    }

    /// Set the fixed recipient address.
    pub fn to_email(mut self, email: impl Into<String>) -> Self {
        self.to_email = email.into();
        self
    }

    /// Set the subject template.
    pub fn subject_line(mut self, subject: impl Into<String>) -> Self {
        self.subject_line = subject.into();
        self
    }

    /// Set the CC list.
    pub fn cc_emails(mut self, cc: impl Into<String>) -> Self {
        self.cc_emails = cc.into();
        self
    }

    /// Set the events this action fires on.
    pub fn events(mut self, triggers: &[Trigger]) -> Self {
        self.event = EventSelection::new(triggers.iter().map(Trigger::as_str));
        self
    }
}

/// Registration metadata the host needs to list the action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ActionMeta {
    /// Action type slug
    pub slug: &'static str,
    /// Human-readable name
    pub label: &'static str,
    /// Maximum actions of this type per form
    pub limit: u32,
    /// Execution priority relative to other action types
    pub priority: u32,
    /// Events offered in the action's event selector
    pub events: &'static [Trigger],
}

/// Metadata for the Loops action.
pub const LOOPS_ACTION: ActionMeta = ActionMeta {
    slug: "loops",
    label: "Loops.so Email",
    limit: 99,
    priority: 30,
    events: &[Trigger::Create, Trigger::Update],
};

/// Input widget for a configuration field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldInput {
    /// Free text input
    Text,
    /// Email address input
    Email,
    /// Select from the form's fields
    FormFieldSelect,
}

/// One field of the action's configuration form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigField {
    /// Settings key the field writes to
    pub key: &'static str,
    /// Label shown next to the input
    pub label: &'static str,
    /// Widget kind
    pub input: FieldInput,
    /// Placeholder text
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<&'static str>,
    /// Help text shown under the input
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help: Option<&'static str>,
}

/// Describe the action's configuration form.
///
/// Hosts render this however their admin UI works.
pub fn config_fields() -> Vec<ConfigField> {
    vec![
        ConfigField {
            key: "template_id",
            label: "Loops Template ID",
            input: FieldInput::Text,
            placeholder: None,
            help: Some("Enter your transactional template ID from Loops.so"),
        },
        ConfigField {
            key: "to_field",
            label: "Send To: form field",
            input: FieldInput::FormFieldSelect,
            placeholder: Some("Select a field..."),
            help: None,
        },
        ConfigField {
            key: "to_email",
            label: "Send To: fixed email address",
            input: FieldInput::Email,
            placeholder: None,
            help: None,
        },
        ConfigField {
            key: "subject_line",
            label: "Dynamic Subject Line",
            input: FieldInput::Text,
            placeholder: Some("New submission from {{ name }}"),
            help: Some("Use {{ field_id }} variables. Leave empty to use template default."),
        },
        ConfigField {
            key: "cc_emails",
            label: "CC Emails",
            input: FieldInput::Text,
            placeholder: Some("admin@example.com, manager@example.com"),
            help: Some("Comma-separated list of additional recipients"),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = ActionSettings::default();
        assert!(settings.template_id.is_empty());
        assert!(settings.to_field.is_empty());
        assert!(settings.cc_emails.is_empty());
        assert_eq!(settings.event.as_slice(), ["create"]);
    }

    #[test]
    fn test_deserialize_empty_record() {
        let settings: ActionSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, ActionSettings::default());
    }

    #[test]
    fn test_deserialize_ignores_unknown_keys() {
        let settings: ActionSettings =
            serde_json::from_str(r#"{"template_id": "t", "legacy": 1, "event": ["both"]}"#)
                .unwrap();
        assert_eq!(settings.template_id, "t");
        assert!(settings.event.fires_on(Trigger::Update));
    }

    #[test]
    fn test_builder() {
        let settings = ActionSettings::new("tmpl1")
            .to_field("email-field")
            .subject_line("Hi {{ name }}")
            .events(&[Trigger::Create, Trigger::Update]);

        assert_eq!(settings.to_field, "email-field");
        assert_eq!(settings.event.as_slice(), ["create", "update"]);
    }

    #[test]
    fn test_config_fields_cover_settings() {
        let keys: Vec<_> = config_fields().iter().map(|f| f.key).collect();
        assert_eq!(
            keys,
            ["template_id", "to_field", "to_email", "subject_line", "cc_emails"]
        );
    }

    #[test]
    fn test_meta() {
        assert_eq!(LOOPS_ACTION.slug, "loops");
        assert_eq!(LOOPS_ACTION.limit, 99);
    }
}

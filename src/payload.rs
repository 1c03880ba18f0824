//! The request body sent to the Loops transactional endpoint.

use serde::{Deserialize, Serialize};

use crate::entry::Entry;
use crate::error::ActionError;
use crate::recipient::{recipient_for, Recipient};
use crate::settings::ActionSettings;
use crate::template::render;
use crate::trigger::Trigger;
use crate::variables::{build_variables, TemplateVariables};

/// Variable name the rendered subject line is stored under.
pub const SUBJECT_VARIABLE: &str = "subject";

/// A transactional email request.
///
/// Serializes to the wire format:
///
/// ```json
/// {"transactionalId": "...", "email": "...", "dataVariables": {"key": "value"}}
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailPayload {
    /// Loops template ID; may be empty, the API rejects unknown IDs
    pub transactional_id: String,
    /// Recipient address
    pub email: String,
    /// Template variables
    pub data_variables: TemplateVariables,
}

impl EmailPayload {
    /// The rendered subject, when one was configured.
    pub fn subject(&self) -> Option<&str> {
        self.data_variables.get(SUBJECT_VARIABLE)
    }
}

/// Compose the payload for a validated recipient.
///
/// When `settings.subject_line` is set it is rendered against `variables`
/// and added as the `subject` variable.
pub fn assemble(
    settings: &ActionSettings,
    mut variables: TemplateVariables,
    recipient: &Recipient,
) -> EmailPayload {
    if !settings.subject_line.is_empty() {
        let subject = render(&settings.subject_line, &variables);
        variables.insert(SUBJECT_VARIABLE, subject);
    }

    EmailPayload {
        transactional_id: settings.template_id.clone(),
        email: recipient.as_str().to_string(),
        data_variables: variables,
    }
}

/// Run recipient resolution, variable building and assembly for an entry.
///
/// Fails with [`ActionError::InvalidRecipient`] before anything is built
/// when the recipient is missing or malformed.
pub fn prepare_payload(
    entry: &Entry,
    settings: &ActionSettings,
    trigger: Trigger,
) -> Result<EmailPayload, ActionError> {
    let recipient = recipient_for(&entry.field_values, settings)?;
    let variables = build_variables(entry, &entry.field_values, trigger);
    Ok(assemble(settings, variables, &recipient))
}

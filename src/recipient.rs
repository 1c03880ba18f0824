//! Recipient resolution and validation.

use email_address::{EmailAddress, Options};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::entry::{FieldValue, FieldValues};
use crate::error::ActionError;
use crate::settings::ActionSettings;

/// A syntactically valid recipient email address.
///
/// # Examples
///
/// ```
/// use loops_action::Recipient;
///
/// let recipient = Recipient::parse("user@example.com").unwrap();
/// assert_eq!(recipient.as_str(), "user@example.com");
///
/// assert!(Recipient::parse("not-an-email").is_err());
/// assert!(Recipient::parse("Sam <sam@example.com>").is_err());
/// assert!(Recipient::parse("").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Recipient(String);

impl Recipient {
    /// Parse and validate a bare email address.
    ///
    /// Display names (`Sam <sam@x.com>`), domain literals (`sam@[127.0.0.1]`)
    /// and domains without a TLD are rejected.
    pub fn parse(email: &str) -> Result<Self, ActionError> {
        if email.is_empty() || EmailAddress::parse_with_options(email, strict_options()).is_err() {
            return Err(ActionError::InvalidRecipient(email.to_string()));
        }
        Ok(Self(email.to_string()))
    }

    /// The address as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the owned address.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Recipient {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

fn strict_options() -> Options {
    Options::default()
        .without_display_text()
        .without_domain_literal()
        .with_required_tld()
}

/// Pick the raw recipient address for an action.
///
/// Prefers the value of `settings.to_field` when that key is set and holds a
/// non-null value in `field_values` (an empty string still counts), otherwise
/// falls back to `settings.to_email`. Returns
/// `None` when neither yields anything. The result is not validated; see
/// [`Recipient::parse`].
pub fn resolve_recipient(field_values: &FieldValues, settings: &ActionSettings) -> Option<String> {
    if !settings.to_field.is_empty() {
        match field_values.get(&settings.to_field) {
            Some(FieldValue::Null) | None => {}
            Some(value) => return Some(value.to_string()),
        }
    }

    if settings.to_email.is_empty() {
        None
    } else {
        Some(settings.to_email.clone())
    }
}

/// Resolve and validate the recipient in one step.
pub fn recipient_for(
    field_values: &FieldValues,
    settings: &ActionSettings,
) -> Result<Recipient, ActionError> {
    let raw = resolve_recipient(field_values, settings).unwrap_or_default();
    Recipient::parse(&raw)
}

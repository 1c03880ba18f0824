//! Template variables built from an entry.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::entry::{Entry, FieldValues};
use crate::trigger::Trigger;

/// Variable names always present, in insertion order.
pub const SYSTEM_VARIABLES: [&str; 6] = [
    "trigger_type",
    "entry_id",
    "entry_key",
    "form_id",
    "created_date",
    "updated_date",
];

/// Ordered mapping of variable name to string value.
///
/// Inserting an existing name replaces the value and keeps the original
/// position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateVariables(IndexMap<String, String>);

impl TemplateVariables {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.0.insert(name.into(), value.into());
    }

    /// Look up a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    /// Whether a variable is present.
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Iterate in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of variables.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TemplateVariables {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut vars = Self::new();
        for (k, v) in iter {
            vars.insert(k, v);
        }
        vars
    }
}

/// Turn a field key into a variable name.
///
/// Every character outside `[A-Za-z0-9_]` becomes `_`.
///
/// ```
/// use loops_action::sanitize_key;
///
/// assert_eq!(sanitize_key("email-field"), "email_field");
/// assert_eq!(sanitize_key("first name!"), "first_name_");
/// ```
pub fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Build the variables sent with every email.
///
/// Seeds the system variables from the entry, then adds every field under
/// its sanitized key in field order. Colliding names are last-write-wins,
/// including collisions with system variables.
pub fn build_variables(entry: &Entry, field_values: &FieldValues, trigger: Trigger) -> TemplateVariables {
    let mut vars = TemplateVariables::new();
    vars.insert("trigger_type", trigger.as_str());
    vars.insert("entry_id", entry.id.to_string());
    vars.insert("entry_key", entry.item_key.as_str());
    vars.insert("form_id", entry.form_id.to_string());
    vars.insert("created_date", entry.created_at.as_str());
    vars.insert("updated_date", entry.updated_at.as_str());

    for (key, value) in field_values {
        vars.insert(sanitize_key(key), value.to_string());
    }

    vars
}

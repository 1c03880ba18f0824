//! Form entries as seen by the action.
//!
//! Entries are owned by the host form framework; this crate only reads them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Field values keyed by field key, in the form's natural field order.
pub type FieldValues = IndexMap<String, FieldValue>;

/// A single submitted field value.
///
/// Hosts store either a scalar or a list of scalars (checkboxes,
/// multi-selects).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Empty value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Numeric value.
    Number(serde_json::Number),
    /// Text value.
    Text(String),
    /// Multiple values, joined with `", "` when stringified.
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns true for `Null`, an empty string, or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                Ok(())
            }
        }
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        Self::Number(n.into())
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// One form submission.
///
/// # Example
///
/// ```
/// use loops_action::Entry;
///
/// let entry = Entry::new(1, 7)
///     .item_key("abc")
///     .field("name", "Sam")
///     .field("interests", vec!["rust", "email"]);
///
/// assert_eq!(entry.field_values["interests"].to_string(), "rust, email");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Entry ID
    pub id: u64,
    /// Unique entry key
    #[serde(default)]
    pub item_key: String,
    /// Form this entry belongs to
    pub form_id: u64,
    /// Creation timestamp, as formatted by the host
    #[serde(default)]
    pub created_at: String,
    /// Last update timestamp, as formatted by the host
    #[serde(default)]
    pub updated_at: String,
    /// Submitted field values
    #[serde(default)]
    pub field_values: FieldValues,
}

impl Entry {
    /// Create an empty entry for a form.
    pub fn new(id: u64, form_id: u64) -> Self {
        Self {
            id,
            form_id,
            ..Self::default()
        }
    }

    /// Set the entry key.
    pub fn item_key(mut self, key: impl Into<String>) -> Self {
        self.item_key = key.into();
        self
    }

    /// Set the creation timestamp.
    pub fn created_at(mut self, at: impl Into<String>) -> Self {
        self.created_at = at.into();
        self
    }

    /// Set the update timestamp.
    pub fn updated_at(mut self, at: impl Into<String>) -> Self {
        self.updated_at = at.into();
        self
    }

    /// Add a field value. Re-adding a key replaces the value in place.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.field_values.insert(key.into(), value.into());
        self
    }
}

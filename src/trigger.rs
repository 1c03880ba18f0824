//! Trigger kinds and the per-action event filter.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Legacy event value meaning "fire on every trigger".
pub const BOTH: &str = "both";

/// The entry event that caused the pipeline to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    /// A new entry was submitted.
    Create,
    /// An existing entry was edited.
    Update,
}

impl Trigger {
    /// Wire name of the trigger (`"create"` / `"update"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The set of events an action is configured to fire on.
///
/// Deserializes from either a single string or a list of strings. A missing
/// or empty selection behaves as `["create"]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct EventSelection(Vec<String>);

impl EventSelection {
    /// Build a selection from event names.
    pub fn new<I, S>(events: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(events.into_iter().map(Into::into).collect())
    }

    /// The configured event names, as stored.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Whether an action with this selection fires for `trigger`.
    pub fn fires_on(&self, trigger: Trigger) -> bool {
        should_fire(&self.0, trigger)
    }
}

impl Default for EventSelection {
    fn default() -> Self {
        Self(vec![Trigger::Create.as_str().to_string()])
    }
}

impl<'de> Deserialize<'de> for EventSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum OneOrMany {
            One(String),
            Many(Vec<String>),
        }

        Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
            Some(OneOrMany::One(event)) => Self(vec![event]),
            Some(OneOrMany::Many(events)) => Self(events),
            None => Self::default(),
        })
    }
}

/// Decide whether an action configured for `configured_events` fires on `trigger`.
///
/// An empty selection is treated as `["create"]`. The legacy value `"both"`
/// always fires.
pub fn should_fire(configured_events: &[String], trigger: Trigger) -> bool {
    if configured_events.is_empty() {
        return trigger == Trigger::Create;
    }

    configured_events
        .iter()
        .any(|event| event == trigger.as_str() || event == BOTH)
}

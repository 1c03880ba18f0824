//! The host form framework, as seen from the action.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::entry::Entry;
use crate::settings::ActionSettings;

/// One action attached to a form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfiguredAction {
    /// Host-assigned action ID
    pub id: u64,
    /// The action's settings
    pub settings: ActionSettings,
}

impl ConfiguredAction {
    /// Pair an action ID with its settings.
    pub fn new(id: u64, settings: ActionSettings) -> Self {
        Self { id, settings }
    }
}

/// Read access to entries and action configuration owned by the host.
pub trait FormHost: Send + Sync {
    /// Look up an entry with its field values.
    fn entry(&self, entry_id: u64) -> Option<Entry>;

    /// Loops actions attached to a form, in the host's order.
    fn actions_for_form(&self, form_id: u64) -> Vec<ConfiguredAction>;
}

/// An in-memory [`FormHost`].
///
/// ```
/// use loops_action::{ActionSettings, ConfiguredAction, Entry, FormHost, MemoryHost};
///
/// let host = MemoryHost::new();
/// host.insert_entry(Entry::new(1, 7).field("email", "sam@x.com"));
/// host.add_action(7, ConfiguredAction::new(10, ActionSettings::new("tmpl1").to_field("email")));
///
/// assert!(host.entry(1).is_some());
/// assert_eq!(host.actions_for_form(7).len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryHost {
    entries: RwLock<HashMap<u64, Entry>>,
    actions: RwLock<HashMap<u64, Vec<ConfiguredAction>>>,
}

impl MemoryHost {
    /// Create an empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or replace an entry.
    pub fn insert_entry(&self, entry: Entry) {
        self.entries.write().insert(entry.id, entry);
    }

    /// Remove an entry.
    pub fn remove_entry(&self, entry_id: u64) -> Option<Entry> {
        self.entries.write().remove(&entry_id)
    }

    /// Attach an action to a form, after any existing ones.
    pub fn add_action(&self, form_id: u64, action: ConfiguredAction) {
        self.actions.write().entry(form_id).or_default().push(action);
    }
}

impl FormHost for MemoryHost {
    fn entry(&self, entry_id: u64) -> Option<Entry> {
        self.entries.read().get(&entry_id).cloned()
    }

    fn actions_for_form(&self, form_id: u64) -> Vec<ConfiguredAction> {
        self.actions.read().get(&form_id).cloned().unwrap_or_default()
    }
}

impl<H: FormHost + ?Sized> FormHost for std::sync::Arc<H> {
    fn entry(&self, entry_id: u64) -> Option<Entry> {
        (**self).entry(entry_id)
    }

    fn actions_for_form(&self, form_id: u64) -> Vec<ConfiguredAction> {
        (**self).actions_for_form(form_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actions_keep_order() {
        let host = MemoryHost::new();
        host.add_action(7, ConfiguredAction::new(2, ActionSettings::new("b")));
        host.add_action(7, ConfiguredAction::new(1, ActionSettings::new("a")));
        host.add_action(8, ConfiguredAction::new(3, ActionSettings::new("c")));

        let ids: Vec<_> = host.actions_for_form(7).iter().map(|a| a.id).collect();
        assert_eq!(ids, [2, 1]);
        assert!(host.actions_for_form(9).is_empty());
    }

    #[test]
    fn test_entries() {
        let host = MemoryHost::new();
        host.insert_entry(Entry::new(1, 7).item_key("abc"));

        assert_eq!(host.entry(1).unwrap().item_key, "abc");
        assert!(host.entry(2).is_none());

        host.remove_entry(1);
        assert!(host.entry(1).is_none());
    }

    #[test]
    fn test_configured_action_from_host_record() {
        let action: ConfiguredAction = serde_json::from_str(
            r#"{"id": 4, "settings": {"template_id": "t", "event": ["create", "update"]}}"#,
        )
        .unwrap();
        assert_eq!(action.id, 4);
        assert_eq!(action.settings.event.as_slice().len(), 2);
    }
}

//! Entry event dispatch.
//!
//! The host calls [`Dispatcher::on_entry_created`] or
//! [`Dispatcher::on_entry_updated`] after saving an entry. Every configured
//! action on the form is filtered and executed in order; failures are
//! logged and recorded per action, never returned to the host.

use crate::action::{FormAction, LoopsAction};
use crate::error::ActionError;
use crate::host::FormHost;
use crate::sender::{DeliveryResult, Sender};
use crate::trigger::Trigger;

/// What happened to one configured action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// The email was accepted by the sender.
    Sent(DeliveryResult),
    /// The action's event filter did not match.
    Skipped,
    /// The action ran and failed.
    Failed(ActionError),
}

/// Per-event summary of action outcomes.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReport {
    /// Entry the event was for
    pub entry_id: u64,
    /// Form the entry belongs to
    pub form_id: u64,
    /// Event kind
    pub trigger: Trigger,
    /// Set when the whole event was skipped before looking at actions
    pub aborted: Option<ActionError>,
    /// Outcome per action ID, in host order
    pub outcomes: Vec<(u64, ActionOutcome)>,
}

impl DispatchReport {
    fn new(entry_id: u64, form_id: u64, trigger: Trigger) -> Self {
        Self {
            entry_id,
            form_id,
            trigger,
            aborted: None,
            outcomes: Vec::new(),
        }
    }

    /// Number of actions that sent.
    pub fn sent(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Sent(_)))
    }

    /// Number of actions that failed.
    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Failed(_)))
    }

    /// Number of actions filtered out.
    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, ActionOutcome::Skipped))
    }

    /// Outcome for a given action ID.
    pub fn outcome(&self, action_id: u64) -> Option<&ActionOutcome> {
        self.outcomes
            .iter()
            .find(|(id, _)| *id == action_id)
            .map(|(_, outcome)| outcome)
    }

    fn count(&self, f: impl Fn(&ActionOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| f(o)).count()
    }
}

/// Runs a form action for every entry event the host reports.
pub struct Dispatcher<H, A> {
    host: H,
    action: A,
}

impl<H: FormHost, S: Sender> Dispatcher<H, LoopsAction<S>> {
    /// Dispatcher for the Loops action over `sender`.
    pub fn loops(host: H, sender: S) -> Self {
        Self::new(host, LoopsAction::new(sender))
    }
}

impl<H: FormHost, A: FormAction> Dispatcher<H, A> {
    /// Create a dispatcher for `action` on `host`.
    pub fn new(host: H, action: A) -> Self {
        Self { host, action }
    }

    /// The host collaborator.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// The dispatched action.
    pub fn action(&self) -> &A {
        &self.action
    }

    /// Handle a newly created entry.
    pub async fn on_entry_created(&self, entry_id: u64, form_id: u64) -> DispatchReport {
        self.dispatch(entry_id, form_id, Trigger::Create).await
    }

    /// Handle an updated entry.
    pub async fn on_entry_updated(&self, entry_id: u64, form_id: u64) -> DispatchReport {
        self.dispatch(entry_id, form_id, Trigger::Update).await
    }

    /// Run every action configured on `form_id` for one entry event.
    ///
    /// Actions run one after another in host order. One action failing does
    /// not stop the rest.
    pub async fn dispatch(&self, entry_id: u64, form_id: u64, trigger: Trigger) -> DispatchReport {
        let mut report = DispatchReport::new(entry_id, form_id, trigger);

        if let Err(e) = self.action.ready() {
            tracing::debug!(error = %e, entry_id, form_id, "Skipping entry event");
            report.aborted = Some(e);
            return report;
        }

        let actions = self.host.actions_for_form(form_id);
        if actions.is_empty() {
            return report;
        }

        // Looked up once, on the first action that fires.
        let mut cached = None;

        for configured in actions {
            if !configured.settings.event.fires_on(trigger) {
                report.outcomes.push((configured.id, ActionOutcome::Skipped));
                continue;
            }

            let entry = match cached.get_or_insert_with(|| self.host.entry(entry_id)) {
                Some(entry) => entry,
                None => {
                    tracing::warn!(entry_id, form_id, action_id = configured.id, "Entry not found");
                    report.outcomes.push((
                        configured.id,
                        ActionOutcome::Failed(ActionError::EntryNotFound(entry_id)),
                    ));
                    continue;
                }
            };

            let outcome = match self.action.execute(trigger, entry, &configured.settings).await {
                Ok(result) => ActionOutcome::Sent(result),
                Err(e) => ActionOutcome::Failed(e),
            };
            report.outcomes.push((configured.id, outcome));
        }

        tracing::debug!(
            entry_id,
            form_id,
            trigger = %trigger,
            sent = report.sent(),
            failed = report.failed(),
            skipped = report.skipped(),
            "Entry event dispatched"
        );

        report
    }
}

//! Yes/no gate for destructive transitions. One pending confirmation at a
//! time; a new request silently replaces whatever was pending. The earlier
//! action is dropped, never queued.

use serde::{Deserialize, Serialize};

/// The destructive actions that must pass through the gate. A closed enum
/// rather than a stored closure, so the engine can execute the confirmed
/// action asynchronously.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PendingAction {
    RefineAeo { instructions: String },
    RefineBrand { instructions: String },
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingConfirmation {
    pub title: String,
    pub message: String,
    pub action: PendingAction,
}

#[derive(Debug, Default)]
pub struct ConfirmationGate {
    pending: Option<PendingConfirmation>,
}

impl ConfirmationGate {
    pub fn request(
        &mut self,
        title: impl Into<String>,
        message: impl Into<String>,
        action: PendingAction,
    ) {
        self.pending = Some(PendingConfirmation {
            title: title.into(),
            message: message.into(),
            action,
        });
    }

    /// Removes and returns the pending action for the caller to execute.
    pub fn confirm(&mut self) -> Option<PendingAction> {
        self.pending.take().map(|pending| pending.action)
    }

    /// Discards the pending confirmation without executing anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn pending(&self) -> Option<&PendingConfirmation> {
        self.pending.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirm_hands_back_the_action_once() {
        let mut gate = ConfirmationGate::default();
        gate.request("Start Over?", "Everything will be lost.", PendingAction::Reset);

        assert_eq!(gate.confirm(), Some(PendingAction::Reset));
        assert_eq!(gate.confirm(), None);
        assert!(gate.pending().is_none());
    }

    #[test]
    fn test_cancel_drops_the_action() {
        let mut gate = ConfirmationGate::default();
        gate.request("Start Over?", "Everything will be lost.", PendingAction::Reset);
        gate.cancel();
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn test_second_request_replaces_the_first() {
        let mut gate = ConfirmationGate::default();
        gate.request(
            "Regenerate Content?",
            "Manual edits will be overwritten.",
            PendingAction::RefineAeo {
                instructions: "add pricing".to_string(),
            },
        );
        gate.request("Start Over?", "Everything will be lost.", PendingAction::Reset);

        assert_eq!(gate.pending().map(|p| p.title.as_str()), Some("Start Over?"));
        assert_eq!(gate.confirm(), Some(PendingAction::Reset));
        assert_eq!(gate.confirm(), None);
    }
}

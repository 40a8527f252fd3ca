// Wizard workflow: the step/state record, pure transition functions, the
// confirmation gate for destructive actions, and the async engine that ties
// them to the generation client.

pub mod confirm;
pub mod engine;
pub mod state;

pub use confirm::{ConfirmationGate, PendingAction, PendingConfirmation};
pub use engine::WorkflowEngine;
pub use state::{CallTicket, TransitionError, WorkflowEvent, WorkflowState, WorkflowStep};

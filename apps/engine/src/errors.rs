use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::workflow::state::TransitionError;

/// The three pipeline stages, numbered the way the shell presents them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stage {
    Aeo,
    Brand,
    Audit,
}

impl Stage {
    pub fn number(self) -> u8 {
        match self {
            Stage::Aeo => 1,
            Stage::Brand => 2,
            Stage::Audit => 3,
        }
    }
}

/// The single user-visible failure for a generation call. Transport, API,
/// and extraction problems all collapse into this at the generation-client
/// boundary; only the failing stage is exposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Stage {} encountered an error, please try again.", .stage.number())]
pub struct StageError {
    pub stage: Stage,
}

impl StageError {
    pub fn new(stage: Stage) -> Self {
        StageError { stage }
    }
}

/// Error surface of `WorkflowEngine` action methods. `Display` is the
/// message the shell shows.
#[derive(Debug, Clone, Error)]
pub enum EngineError {
    #[error(transparent)]
    Rejected(#[from] TransitionError),

    #[error(transparent)]
    Stage(#[from] StageError),
}

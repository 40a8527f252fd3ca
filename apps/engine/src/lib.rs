//! Core engine for the three-stage landing-page wizard.
//!
//! Stage 1 generates answer-engine-optimized HTML from a product brief,
//! Stage 2 restyles it to match a brand profile, Stage 3 audits the branded
//! page and returns a structured score report. The presentation shell renders
//! `WorkflowEngine::snapshot()` and drives the wizard through the engine's
//! action methods; everything else (previews, forms, downloads) lives outside
//! this crate.

pub mod config;
pub mod errors;
pub mod export;
pub mod generation;
pub mod ingest;
pub mod llm_client;
pub mod models;
pub mod telemetry;
pub mod workflow;

pub use config::Config;
pub use errors::{EngineError, Stage, StageError};
pub use workflow::engine::WorkflowEngine;
pub use workflow::state::{WorkflowState, WorkflowStep};

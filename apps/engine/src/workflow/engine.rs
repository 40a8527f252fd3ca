//! The async workflow engine: translates shell actions into event sequences
//! around generation calls.
//!
//! Lock discipline: the state mutex is held only to validate-and-transition,
//! never across an await. Every call is tagged with a [`CallTicket`] before
//! the await; a completion whose ticket no longer matches (the session was
//! reset mid-flight) is logged and discarded rather than applied.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::EngineError;
use crate::export::{self, HtmlExport};
use crate::generation::GenerationClient;
use crate::llm_client::GeminiClient;
use crate::models::{BrandProfile, ProductBrief};
use crate::workflow::confirm::{ConfirmationGate, PendingAction, PendingConfirmation};
use crate::workflow::state::{
    CallTicket, TransitionError, WorkflowEvent, WorkflowState, WorkflowStep,
};

/// Shared engine handle. Clones see the same session, the same way every
/// shell surface shares one state.
#[derive(Clone)]
pub struct WorkflowEngine {
    client: GenerationClient,
    state: Arc<Mutex<WorkflowState>>,
    gate: Arc<Mutex<ConfirmationGate>>,
}

impl WorkflowEngine {
    pub fn new(client: GenerationClient) -> Self {
        WorkflowEngine {
            client,
            state: Arc::new(Mutex::new(WorkflowState::default())),
            gate: Arc::new(Mutex::new(ConfirmationGate::default())),
        }
    }

    /// Engine wired to the real backend adapter.
    pub fn from_config(config: &Config) -> Self {
        let backend = Arc::new(GeminiClient::new(config.gemini_api_key.clone()));
        WorkflowEngine::new(GenerationClient::new(backend))
    }

    /// Current session state, cloned for rendering.
    pub fn snapshot(&self) -> WorkflowState {
        self.state.lock().clone()
    }

    pub fn pending_confirmation(&self) -> Option<PendingConfirmation> {
        self.gate.lock().pending().cloned()
    }

    /// Connectivity status for the shell's badge. A misconfigured backend
    /// never crashes the engine; calls just fail with the stage error.
    pub fn backend_configured(&self) -> bool {
        self.client.backend_configured()
    }

    /// Download payload for the current step, if one is available.
    pub fn export(&self) -> Option<HtmlExport> {
        export::export_html(&self.state.lock())
    }

    // ────────────────────────────────────────────────────────────────────
    // Actions
    // ────────────────────────────────────────────────────────────────────

    /// Submits the brief and brand profile and runs Stage 1. On failure the
    /// step returns to `Input` and both inputs are discarded for re-entry.
    pub async fn submit_brief(
        &self,
        brief: ProductBrief,
        profile: BrandProfile,
    ) -> Result<(), EngineError> {
        let ticket = CallTicket::issue(WorkflowStep::AeoWorking);
        self.dispatch(WorkflowEvent::BriefSubmitted {
            brief: brief.clone(),
            profile,
            ticket,
        })?;
        info!("stage 1 generation started");

        match self.client.generate_aeo(&brief).await {
            Ok(artifact) => {
                self.complete(WorkflowEvent::AeoSucceeded { artifact, ticket });
                Ok(())
            }
            Err(err) => {
                self.complete(WorkflowEvent::AeoFailed { ticket });
                Err(err.into())
            }
        }
    }

    /// Requests confirmation for a Stage-1 refine. Blank instructions are a
    /// silent no-op: no call is issued and nothing changes.
    pub fn refine_aeo(&self, instructions: &str) -> Result<(), EngineError> {
        self.request_refine(
            WorkflowStep::AeoReview,
            "Regenerate Content?",
            "This will rebuild the webpage based on your new instructions. Any manual \
             code edits you've made to the current version will be overwritten.",
            instructions,
            |instructions| PendingAction::RefineAeo { instructions },
        )
    }

    /// Requests confirmation for a Stage-2 refine. Mirrors [`Self::refine_aeo`].
    pub fn refine_brand(&self, instructions: &str) -> Result<(), EngineError> {
        self.request_refine(
            WorkflowStep::BrandReview,
            "Refine Brand Polish?",
            "This will regenerate the branded page based on your instructions. Any \
             manual code edits will be overwritten.",
            instructions,
            |instructions| PendingAction::RefineBrand { instructions },
        )
    }

    /// Hands Stage-1 HTML to Stage 2. On failure the step returns to
    /// `AeoReview` with the Stage-1 artifact untouched.
    pub async fn advance_to_brand(&self) -> Result<(), EngineError> {
        let ticket = CallTicket::issue(WorkflowStep::BrandWorking);
        let snapshot = self.dispatch(WorkflowEvent::BrandStarted { ticket })?;
        let html = snapshot
            .aeo_artifact
            .ok_or(TransitionError::MissingInput("Stage 1 HTML"))?
            .html;
        let profile = snapshot
            .profile
            .ok_or(TransitionError::MissingInput("brand profile"))?;
        let brief = snapshot
            .brief
            .ok_or(TransitionError::MissingInput("product brief"))?;
        info!("stage 2 generation started");

        match self.client.generate_brand(&html, &profile, &brief).await {
            Ok(artifact) => {
                self.complete(WorkflowEvent::BrandSucceeded { artifact, ticket });
                Ok(())
            }
            Err(err) => {
                self.complete(WorkflowEvent::BrandFailed { ticket });
                Err(err.into())
            }
        }
    }

    /// Audits the branded HTML. On failure the step returns to `BrandReview`.
    pub async fn run_audit(&self) -> Result<(), EngineError> {
        let ticket = CallTicket::issue(WorkflowStep::AuditWorking);
        let snapshot = self.dispatch(WorkflowEvent::AuditStarted { ticket })?;
        let html = snapshot
            .brand_artifact
            .ok_or(TransitionError::MissingInput("Stage 2 HTML"))?
            .html;
        info!("audit started");

        match self.client.run_audit(&html).await {
            Ok(outcome) => {
                self.complete(WorkflowEvent::AuditSucceeded { outcome, ticket });
                Ok(())
            }
            Err(err) => {
                self.complete(WorkflowEvent::AuditFailed { ticket });
                Err(err.into())
            }
        }
    }

    /// Returns from the audit report to the branded-page review. The report
    /// is kept until the next successful audit overwrites it.
    pub fn back_to_editor(&self) -> Result<(), EngineError> {
        self.dispatch(WorkflowEvent::BackToEditor)?;
        Ok(())
    }

    /// Applies a manual edit to the current review step's HTML. The stored
    /// prompt intentionally goes stale.
    pub fn edit_html(&self, html: String) -> Result<(), EngineError> {
        self.dispatch(WorkflowEvent::HtmlEdited { html })?;
        Ok(())
    }

    /// Requests confirmation for a full reset. Valid from any step.
    pub fn reset(&self) {
        self.gate.lock().request(
            "Start Over?",
            "Are you sure you want to start over? All current progress, generated \
             content, and customizations will be lost.",
            PendingAction::Reset,
        );
    }

    /// Executes whatever action is pending on the gate. No pending
    /// confirmation is a no-op.
    pub async fn confirm(&self) -> Result<(), EngineError> {
        let action = self.gate.lock().confirm();
        match action {
            None => Ok(()),
            Some(PendingAction::RefineAeo { instructions }) => {
                self.execute_refine(WorkflowStep::AeoReview, instructions).await
            }
            Some(PendingAction::RefineBrand { instructions }) => {
                self.execute_refine(WorkflowStep::BrandReview, instructions)
                    .await
            }
            Some(PendingAction::Reset) => {
                self.dispatch(WorkflowEvent::ResetConfirmed)?;
                info!("session reset");
                Ok(())
            }
        }
    }

    /// Dismisses the pending confirmation without executing it.
    pub fn cancel(&self) {
        self.gate.lock().cancel();
    }

    // ────────────────────────────────────────────────────────────────────
    // Internals
    // ────────────────────────────────────────────────────────────────────

    fn request_refine(
        &self,
        review_step: WorkflowStep,
        title: &str,
        message: &str,
        instructions: &str,
        action: impl FnOnce(String) -> PendingAction,
    ) -> Result<(), EngineError> {
        let instructions = instructions.trim();
        if instructions.is_empty() {
            return Ok(());
        }
        let step = self.state.lock().step;
        if step != review_step {
            return Err(TransitionError::WrongStep { step }.into());
        }
        self.gate
            .lock()
            .request(title, message, action(instructions.to_string()));
        Ok(())
    }

    async fn execute_refine(
        &self,
        review_step: WorkflowStep,
        instructions: String,
    ) -> Result<(), EngineError> {
        let ticket = CallTicket::issue(review_step);
        let snapshot = self.dispatch(WorkflowEvent::RefineStarted { ticket })?;
        info!(step = ?review_step, "refinement started");

        let result = match review_step {
            WorkflowStep::BrandReview => {
                let html = snapshot
                    .brand_artifact
                    .ok_or(TransitionError::MissingInput("generated HTML"))?
                    .html;
                let profile = snapshot
                    .profile
                    .ok_or(TransitionError::MissingInput("brand profile"))?;
                self.client.refine_brand(&html, &instructions, &profile).await
            }
            _ => {
                let html = snapshot
                    .aeo_artifact
                    .ok_or(TransitionError::MissingInput("generated HTML"))?
                    .html;
                self.client.refine_aeo(&html, &instructions).await
            }
        };

        match result {
            Ok(artifact) => {
                self.complete(WorkflowEvent::RefineSucceeded { artifact, ticket });
                Ok(())
            }
            Err(err) => {
                self.complete(WorkflowEvent::RefineFailed { ticket });
                Err(err.into())
            }
        }
    }

    /// Validates and applies one event, returning the new state snapshot.
    fn dispatch(&self, event: WorkflowEvent) -> Result<WorkflowState, TransitionError> {
        let mut state = self.state.lock();
        let next = state.clone().apply(event)?;
        *state = next.clone();
        Ok(next)
    }

    /// Applies a completion event; a mismatched ticket means the session
    /// moved on mid-flight, so the result is dropped.
    fn complete(&self, event: WorkflowEvent) {
        if let Err(err) = self.dispatch(event) {
            warn!(%err, "discarding completion for a superseded call");
        }
    }
}

//! The workflow state record and its transitions.
//!
//! All step/artifact bookkeeping lives in one `WorkflowState` value, and
//! every transition is a pure function from (state, event) to a new state,
//! so event sequences replay deterministically in tests. The async engine is
//! the only writer; the shell only ever sees cloned snapshots.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::generation::client::AuditOutcome;
use crate::models::{BrandProfile, ProductBrief, StageArtifact};

/// The single point of truth for what the shell renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkflowStep {
    Input,
    AeoWorking,
    AeoReview,
    BrandWorking,
    BrandReview,
    AuditWorking,
    AuditReview,
}

impl WorkflowStep {
    pub fn is_working(self) -> bool {
        matches!(
            self,
            WorkflowStep::AeoWorking | WorkflowStep::BrandWorking | WorkflowStep::AuditWorking
        )
    }

    pub fn is_review(self) -> bool {
        matches!(self, WorkflowStep::AeoReview | WorkflowStep::BrandReview)
    }
}

/// Tag for one issued backend call: a fresh id plus the step the call was
/// issued for. A completion whose ticket no longer matches the state's
/// recorded ticket is discarded instead of applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallTicket {
    pub id: Uuid,
    pub step: WorkflowStep,
}

impl CallTicket {
    pub fn issue(step: WorkflowStep) -> Self {
        CallTicket {
            id: Uuid::new_v4(),
            step,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("action is not valid in the current step")]
    WrongStep { step: WorkflowStep },

    #[error("{0} is required before this action can run")]
    MissingInput(&'static str),

    #[error("a backend call is already in flight")]
    CallInFlight,

    #[error("completion does not match the current in-flight call")]
    StaleCompletion,
}

/// Everything the engine tracks for one session. `Default` is the fresh
/// `Input` state a full reset returns to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkflowState {
    pub step: WorkflowStep,
    pub brief: Option<ProductBrief>,
    pub profile: Option<BrandProfile>,
    pub aeo_artifact: Option<StageArtifact>,
    pub brand_artifact: Option<StageArtifact>,
    pub audit: Option<AuditOutcome>,
    /// A refine call is running; the step stays on the review screen.
    pub refining: bool,
    pub in_flight: Option<CallTicket>,
}

impl Default for WorkflowStep {
    fn default() -> Self {
        WorkflowStep::Input
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowEvent {
    /// `Input` → `AeoWorking`; records brief and profile, starts Stage 1.
    BriefSubmitted {
        brief: ProductBrief,
        profile: BrandProfile,
        ticket: CallTicket,
    },
    AeoSucceeded {
        artifact: StageArtifact,
        ticket: CallTicket,
    },
    /// Back to `Input`; brief and profile are discarded for re-entry.
    AeoFailed { ticket: CallTicket },

    /// Starts a refine call for the review step named by `ticket.step`.
    RefineStarted { ticket: CallTicket },
    RefineSucceeded {
        artifact: StageArtifact,
        ticket: CallTicket,
    },
    RefineFailed { ticket: CallTicket },

    /// `AeoReview` → `BrandWorking`.
    BrandStarted { ticket: CallTicket },
    BrandSucceeded {
        artifact: StageArtifact,
        ticket: CallTicket,
    },
    /// Back to `AeoReview`; the Stage-1 artifact is untouched.
    BrandFailed { ticket: CallTicket },

    /// `BrandReview` → `AuditWorking`.
    AuditStarted { ticket: CallTicket },
    AuditSucceeded {
        outcome: AuditOutcome,
        ticket: CallTicket,
    },
    /// Back to `BrandReview`.
    AuditFailed { ticket: CallTicket },

    /// `AuditReview` → `BrandReview`, keeping the report.
    BackToEditor,
    /// Manual edit of the current review step's HTML; the stored prompt is
    /// intentionally left stale.
    HtmlEdited { html: String },
    /// Full reset back to the fresh `Input` state.
    ResetConfirmed,
}

impl WorkflowState {
    /// Applies one event, returning the next state or the reason the event
    /// is invalid now. Pure: `self` is consumed, nothing else is touched.
    pub fn apply(mut self, event: WorkflowEvent) -> Result<WorkflowState, TransitionError> {
        match event {
            WorkflowEvent::BriefSubmitted {
                brief,
                profile,
                ticket,
            } => {
                self.require_step(WorkflowStep::Input)?;
                self.require_idle()?;
                if let Some(field) = brief.first_missing_field() {
                    return Err(TransitionError::MissingInput(field));
                }
                self.brief = Some(brief);
                self.profile = Some(profile);
                self.step = WorkflowStep::AeoWorking;
                self.in_flight = Some(ticket);
                Ok(self)
            }

            WorkflowEvent::AeoSucceeded { artifact, ticket } => {
                self.require_ticket(ticket)?;
                self.aeo_artifact = Some(artifact);
                self.step = WorkflowStep::AeoReview;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::AeoFailed { ticket } => {
                self.require_ticket(ticket)?;
                self.brief = None;
                self.profile = None;
                self.step = WorkflowStep::Input;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::RefineStarted { ticket } => {
                self.require_step(ticket.step)?;
                self.require_idle()?;
                let current = match ticket.step {
                    WorkflowStep::AeoReview => self.aeo_artifact.as_ref(),
                    WorkflowStep::BrandReview => self.brand_artifact.as_ref(),
                    _ => return Err(TransitionError::WrongStep { step: self.step }),
                };
                if current.map_or(true, |a| a.html.trim().is_empty()) {
                    return Err(TransitionError::MissingInput("generated HTML"));
                }
                self.refining = true;
                self.in_flight = Some(ticket);
                Ok(self)
            }

            WorkflowEvent::RefineSucceeded { artifact, ticket } => {
                self.require_ticket(ticket)?;
                match ticket.step {
                    WorkflowStep::AeoReview => self.aeo_artifact = Some(artifact),
                    WorkflowStep::BrandReview => self.brand_artifact = Some(artifact),
                    _ => return Err(TransitionError::StaleCompletion),
                }
                self.refining = false;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::RefineFailed { ticket } => {
                self.require_ticket(ticket)?;
                self.refining = false;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::BrandStarted { ticket } => {
                self.require_step(WorkflowStep::AeoReview)?;
                self.require_idle()?;
                if self
                    .aeo_artifact
                    .as_ref()
                    .map_or(true, |a| a.html.trim().is_empty())
                {
                    return Err(TransitionError::MissingInput("Stage 1 HTML"));
                }
                if self.brief.is_none() || self.profile.is_none() {
                    return Err(TransitionError::MissingInput("brief and brand profile"));
                }
                self.step = WorkflowStep::BrandWorking;
                self.in_flight = Some(ticket);
                Ok(self)
            }

            WorkflowEvent::BrandSucceeded { artifact, ticket } => {
                self.require_ticket(ticket)?;
                self.brand_artifact = Some(artifact);
                self.step = WorkflowStep::BrandReview;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::BrandFailed { ticket } => {
                self.require_ticket(ticket)?;
                self.step = WorkflowStep::AeoReview;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::AuditStarted { ticket } => {
                self.require_step(WorkflowStep::BrandReview)?;
                self.require_idle()?;
                if self
                    .brand_artifact
                    .as_ref()
                    .map_or(true, |a| a.html.trim().is_empty())
                {
                    return Err(TransitionError::MissingInput("Stage 2 HTML"));
                }
                self.step = WorkflowStep::AuditWorking;
                self.in_flight = Some(ticket);
                Ok(self)
            }

            WorkflowEvent::AuditSucceeded { outcome, ticket } => {
                self.require_ticket(ticket)?;
                self.audit = Some(outcome);
                self.step = WorkflowStep::AuditReview;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::AuditFailed { ticket } => {
                self.require_ticket(ticket)?;
                self.step = WorkflowStep::BrandReview;
                self.in_flight = None;
                Ok(self)
            }

            WorkflowEvent::BackToEditor => {
                self.require_step(WorkflowStep::AuditReview)?;
                self.step = WorkflowStep::BrandReview;
                Ok(self)
            }

            WorkflowEvent::HtmlEdited { html } => {
                let artifact = match self.step {
                    WorkflowStep::AeoReview => self.aeo_artifact.as_mut(),
                    WorkflowStep::BrandReview => self.brand_artifact.as_mut(),
                    _ => return Err(TransitionError::WrongStep { step: self.step }),
                };
                match artifact {
                    Some(artifact) => artifact.html = html,
                    None => return Err(TransitionError::MissingInput("generated HTML")),
                }
                Ok(self)
            }

            WorkflowEvent::ResetConfirmed => Ok(WorkflowState::default()),
        }
    }

    /// Busy indicator for the shell, derived purely from the state.
    pub fn busy(&self) -> bool {
        self.step.is_working() || self.refining
    }

    fn require_step(&self, step: WorkflowStep) -> Result<(), TransitionError> {
        if self.step == step {
            Ok(())
        } else {
            Err(TransitionError::WrongStep { step: self.step })
        }
    }

    fn require_idle(&self) -> Result<(), TransitionError> {
        if self.in_flight.is_some() || self.refining {
            Err(TransitionError::CallInFlight)
        } else {
            Ok(())
        }
    }

    fn require_ticket(&self, ticket: CallTicket) -> Result<(), TransitionError> {
        if self.in_flight == Some(ticket) {
            Ok(())
        } else {
            Err(TransitionError::StaleCompletion)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn brief() -> ProductBrief {
        ProductBrief {
            product_name: "Acme Term Life".to_string(),
            features: "No medical exam".to_string(),
            target_audience: "Young families".to_string(),
            call_to_action: "Get a quote".to_string(),
        }
    }

    fn artifact(html: &str) -> StageArtifact {
        StageArtifact::new(html.to_string(), "prompt".to_string())
    }

    fn submitted() -> (WorkflowState, CallTicket) {
        let ticket = CallTicket::issue(WorkflowStep::AeoWorking);
        let state = WorkflowState::default()
            .apply(WorkflowEvent::BriefSubmitted {
                brief: brief(),
                profile: BrandProfile::default(),
                ticket,
            })
            .unwrap();
        (state, ticket)
    }

    /// Replays the full happy path and checks each intermediate step.
    #[test]
    fn test_full_session_replay() {
        let (state, ticket) = submitted();
        assert_eq!(state.step, WorkflowStep::AeoWorking);
        assert!(state.busy());

        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();
        assert_eq!(state.step, WorkflowStep::AeoReview);
        assert!(!state.busy());

        let ticket = CallTicket::issue(WorkflowStep::BrandWorking);
        let state = state
            .apply(WorkflowEvent::BrandStarted { ticket })
            .unwrap();
        assert_eq!(state.step, WorkflowStep::BrandWorking);

        let state = state
            .apply(WorkflowEvent::BrandSucceeded {
                artifact: artifact("<html>branded</html>"),
                ticket,
            })
            .unwrap();
        assert_eq!(state.step, WorkflowStep::BrandReview);

        let ticket = CallTicket::issue(WorkflowStep::AuditWorking);
        let state = state
            .apply(WorkflowEvent::AuditStarted { ticket })
            .unwrap();
        let state = state
            .apply(WorkflowEvent::AuditSucceeded {
                outcome: AuditOutcome {
                    report: serde_json::from_str(
                        r#"{"overallScore": 90, "summary": "s", "checklist": [], "engineSimulations": []}"#,
                    )
                    .unwrap(),
                    prompt: "audit prompt".to_string(),
                },
                ticket,
            })
            .unwrap();
        assert_eq!(state.step, WorkflowStep::AuditReview);
        assert!(state.audit.is_some());
    }

    #[test]
    fn test_submit_requires_input_step() {
        let (state, _) = submitted();
        let err = state
            .apply(WorkflowEvent::BriefSubmitted {
                brief: brief(),
                profile: BrandProfile::default(),
                ticket: CallTicket::issue(WorkflowStep::AeoWorking),
            })
            .unwrap_err();
        assert!(matches!(err, TransitionError::WrongStep { .. }));
    }

    #[test]
    fn test_submit_rejects_incomplete_brief() {
        let mut incomplete = brief();
        incomplete.features = String::new();
        let err = WorkflowState::default()
            .apply(WorkflowEvent::BriefSubmitted {
                brief: incomplete,
                profile: BrandProfile::default(),
                ticket: CallTicket::issue(WorkflowStep::AeoWorking),
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::MissingInput("features"));
    }

    #[test]
    fn test_aeo_failure_discards_brief_and_profile() {
        let (state, ticket) = submitted();
        let state = state.apply(WorkflowEvent::AeoFailed { ticket }).unwrap();
        assert_eq!(state.step, WorkflowStep::Input);
        assert!(state.brief.is_none());
        assert!(state.profile.is_none());
    }

    #[test]
    fn test_stale_completion_is_rejected() {
        let (state, _) = submitted();
        let err = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>late</html>"),
                ticket: CallTicket::issue(WorkflowStep::AeoWorking),
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::StaleCompletion);
    }

    #[test]
    fn test_completion_after_reset_is_stale() {
        let (state, ticket) = submitted();
        let state = state.apply(WorkflowEvent::ResetConfirmed).unwrap();
        assert_eq!(state.step, WorkflowStep::Input);

        let err = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>late</html>"),
                ticket,
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::StaleCompletion);
    }

    #[test]
    fn test_brand_failure_keeps_stage_one_artifact() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();

        let ticket = CallTicket::issue(WorkflowStep::BrandWorking);
        let state = state.apply(WorkflowEvent::BrandStarted { ticket }).unwrap();
        let state = state.apply(WorkflowEvent::BrandFailed { ticket }).unwrap();

        assert_eq!(state.step, WorkflowStep::AeoReview);
        assert_eq!(state.aeo_artifact.unwrap().html, "<html>v1</html>");
        assert!(state.brand_artifact.is_none());
    }

    #[test]
    fn test_no_second_call_while_one_is_in_flight() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();

        let refine_ticket = CallTicket::issue(WorkflowStep::AeoReview);
        let state = state
            .apply(WorkflowEvent::RefineStarted {
                ticket: refine_ticket,
            })
            .unwrap();
        assert!(state.busy());
        assert_eq!(state.step, WorkflowStep::AeoReview);

        let err = state
            .clone()
            .apply(WorkflowEvent::RefineStarted {
                ticket: CallTicket::issue(WorkflowStep::AeoReview),
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::CallInFlight);

        let err = state
            .apply(WorkflowEvent::BrandStarted {
                ticket: CallTicket::issue(WorkflowStep::BrandWorking),
            })
            .unwrap_err();
        assert_eq!(err, TransitionError::CallInFlight);
    }

    #[test]
    fn test_refine_failure_keeps_current_artifact_and_step() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();

        let ticket = CallTicket::issue(WorkflowStep::AeoReview);
        let state = state.apply(WorkflowEvent::RefineStarted { ticket }).unwrap();
        let state = state.apply(WorkflowEvent::RefineFailed { ticket }).unwrap();

        assert_eq!(state.step, WorkflowStep::AeoReview);
        assert!(!state.refining);
        assert_eq!(state.aeo_artifact.unwrap().html, "<html>v1</html>");
    }

    #[test]
    fn test_refine_success_replaces_artifact_for_its_review_step() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();

        let ticket = CallTicket::issue(WorkflowStep::AeoReview);
        let state = state.apply(WorkflowEvent::RefineStarted { ticket }).unwrap();
        let state = state
            .apply(WorkflowEvent::RefineSucceeded {
                artifact: artifact("<html>v2</html>"),
                ticket,
            })
            .unwrap();

        assert_eq!(state.aeo_artifact.unwrap().html, "<html>v2</html>");
        assert!(!state.refining);
    }

    #[test]
    fn test_manual_edit_updates_html_but_not_prompt() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();

        let state = state
            .apply(WorkflowEvent::HtmlEdited {
                html: "<html>hand-tuned</html>".to_string(),
            })
            .unwrap();

        let edited = state.aeo_artifact.unwrap();
        assert_eq!(edited.html, "<html>hand-tuned</html>");
        assert_eq!(edited.prompt, "prompt");
    }

    #[test]
    fn test_back_to_editor_keeps_the_report() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();
        let ticket = CallTicket::issue(WorkflowStep::BrandWorking);
        let state = state.apply(WorkflowEvent::BrandStarted { ticket }).unwrap();
        let state = state
            .apply(WorkflowEvent::BrandSucceeded {
                artifact: artifact("<html>branded</html>"),
                ticket,
            })
            .unwrap();
        let ticket = CallTicket::issue(WorkflowStep::AuditWorking);
        let state = state.apply(WorkflowEvent::AuditStarted { ticket }).unwrap();
        let state = state
            .apply(WorkflowEvent::AuditSucceeded {
                outcome: AuditOutcome {
                    report: serde_json::from_str(
                        r#"{"overallScore": 70, "summary": "s", "checklist": [], "engineSimulations": []}"#,
                    )
                    .unwrap(),
                    prompt: "p".to_string(),
                },
                ticket,
            })
            .unwrap();

        let state = state.apply(WorkflowEvent::BackToEditor).unwrap();
        assert_eq!(state.step, WorkflowStep::BrandReview);
        assert!(state.audit.is_some());
    }

    #[test]
    fn test_reset_returns_the_fresh_state() {
        let (state, ticket) = submitted();
        let state = state
            .apply(WorkflowEvent::AeoSucceeded {
                artifact: artifact("<html>v1</html>"),
                ticket,
            })
            .unwrap();

        let state = state.apply(WorkflowEvent::ResetConfirmed).unwrap();
        assert_eq!(state, WorkflowState::default());
    }
}

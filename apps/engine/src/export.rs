//! Download payloads for the shell's save button. The raw Stage-1 page is
//! offered during its review; once branding has run, the final page is the
//! one that ships.

use serde::Serialize;

use crate::workflow::state::{WorkflowState, WorkflowStep};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HtmlExport {
    pub filename: &'static str,
    pub html: String,
}

/// The downloadable page for the current step, if any.
pub fn export_html(state: &WorkflowState) -> Option<HtmlExport> {
    match state.step {
        WorkflowStep::AeoReview => state.aeo_artifact.as_ref().map(|artifact| HtmlExport {
            filename: "landing-page-raw.html",
            html: artifact.html.clone(),
        }),
        WorkflowStep::BrandReview | WorkflowStep::AuditReview => {
            state.brand_artifact.as_ref().map(|artifact| HtmlExport {
                filename: "landing-page-final.html",
                html: artifact.html.clone(),
            })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StageArtifact;

    fn state_with(step: WorkflowStep) -> WorkflowState {
        WorkflowState {
            step,
            aeo_artifact: Some(StageArtifact::new(
                "<html>raw</html>".to_string(),
                "p1".to_string(),
            )),
            brand_artifact: Some(StageArtifact::new(
                "<html>final</html>".to_string(),
                "p2".to_string(),
            )),
            ..WorkflowState::default()
        }
    }

    #[test]
    fn test_stage_one_review_exports_the_raw_page() {
        let export = export_html(&state_with(WorkflowStep::AeoReview)).unwrap();
        assert_eq!(export.filename, "landing-page-raw.html");
        assert_eq!(export.html, "<html>raw</html>");
    }

    #[test]
    fn test_later_steps_export_the_final_page() {
        for step in [WorkflowStep::BrandReview, WorkflowStep::AuditReview] {
            let export = export_html(&state_with(step)).unwrap();
            assert_eq!(export.filename, "landing-page-final.html");
            assert_eq!(export.html, "<html>final</html>");
        }
    }

    #[test]
    fn test_nothing_to_export_while_working_or_on_input() {
        for step in [
            WorkflowStep::Input,
            WorkflowStep::AeoWorking,
            WorkflowStep::BrandWorking,
            WorkflowStep::AuditWorking,
        ] {
            assert!(export_html(&state_with(step)).is_none());
        }
    }
}

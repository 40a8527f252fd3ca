//! Generation client — one operation per stage/action. Each operation builds
//! its prompt, makes a single call through the backend contract, extracts the
//! artifact, and hands back the artifact together with the exact prompt used.
//!
//! Failure policy: transport errors, non-success responses, and extraction
//! failures are all caught here and re-signaled as the generic [`StageError`]
//! for the stage. No partial output, no automatic retry: retrying is the
//! user re-issuing the same action.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{Stage, StageError};
use crate::generation::extract::{extract_audit, extract_html};
use crate::generation::prompts;
use crate::llm_client::{
    GenerativeBackend, ResponseFormat, AEO_MODEL, AUDIT_MODEL, BRAND_MODEL,
};
use crate::models::{AuditReport, BrandProfile, ProductBrief, StageArtifact};

/// A successful audit: the report plus the prompt that produced it, retained
/// so the shell can display the prompt alongside the results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditOutcome {
    pub report: AuditReport,
    pub prompt: String,
}

#[derive(Clone)]
pub struct GenerationClient {
    backend: Arc<dyn GenerativeBackend>,
}

impl GenerationClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>) -> Self {
        GenerationClient { backend }
    }

    pub fn backend_configured(&self) -> bool {
        self.backend.is_configured()
    }

    pub async fn generate_aeo(&self, brief: &ProductBrief) -> Result<StageArtifact, StageError> {
        self.html_call(Stage::Aeo, AEO_MODEL, prompts::aeo_prompt(brief))
            .await
    }

    pub async fn refine_aeo(
        &self,
        current_html: &str,
        instructions: &str,
    ) -> Result<StageArtifact, StageError> {
        self.html_call(
            Stage::Aeo,
            AEO_MODEL,
            prompts::aeo_refine_prompt(current_html, instructions),
        )
        .await
    }

    pub async fn generate_brand(
        &self,
        current_html: &str,
        profile: &BrandProfile,
        brief: &ProductBrief,
    ) -> Result<StageArtifact, StageError> {
        self.html_call(
            Stage::Brand,
            BRAND_MODEL,
            prompts::brand_prompt(current_html, profile, brief),
        )
        .await
    }

    pub async fn refine_brand(
        &self,
        current_html: &str,
        instructions: &str,
        profile: &BrandProfile,
    ) -> Result<StageArtifact, StageError> {
        self.html_call(
            Stage::Brand,
            BRAND_MODEL,
            prompts::brand_refine_prompt(current_html, instructions, profile),
        )
        .await
    }

    pub async fn run_audit(&self, html: &str) -> Result<AuditOutcome, StageError> {
        let prompt = prompts::audit_prompt(html);
        let raw = self
            .backend
            .generate(AUDIT_MODEL, &prompt, ResponseFormat::Json)
            .await
            .map_err(|err| {
                warn!(stage = 3, %err, "backend call failed");
                StageError::new(Stage::Audit)
            })?;

        let report = extract_audit(&raw).map_err(|err| {
            warn!(stage = 3, %err, "audit extraction failed");
            StageError::new(Stage::Audit)
        })?;

        info!(score = report.overall_score, "audit completed");
        Ok(AuditOutcome { report, prompt })
    }

    async fn html_call(
        &self,
        stage: Stage,
        model: &str,
        prompt: String,
    ) -> Result<StageArtifact, StageError> {
        let raw = self
            .backend
            .generate(model, &prompt, ResponseFormat::Text)
            .await
            .map_err(|err| {
                warn!(stage = stage.number(), %err, "backend call failed");
                StageError::new(stage)
            })?;

        let html = extract_html(&raw);
        if html.is_empty() {
            warn!(stage = stage.number(), "backend response contained no usable HTML");
            return Err(StageError::new(stage));
        }

        info!(stage = stage.number(), chars = html.len(), "stage output generated");
        Ok(StageArtifact::new(html, prompt))
    }
}

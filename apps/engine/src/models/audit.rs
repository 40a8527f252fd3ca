use serde::{Deserialize, Serialize};

/// Verdict for a single audit checklist criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditStatus {
    Pass,
    Warning,
    Fail,
}

/// One row of the audit checklist, in the order the model returned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditItem {
    pub criteria: String,
    pub status: AuditStatus,
    pub details: String,
}

/// A simulation of how one answer engine would treat the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineSimulation {
    pub engine_name: String,
    pub simulated_response: String,
    pub verdict: String,
}

/// Full Stage-3 audit report. Produced once per audit call, replaced
/// wholesale on re-audit, read-only to the user. Field names follow the
/// JSON shape the audit prompt demands from the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditReport {
    pub overall_score: u32,
    pub summary: String,
    pub checklist: Vec<AuditItem>,
    pub engine_simulations: Vec<EngineSimulation>,
}

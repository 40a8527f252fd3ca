use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The output of Stage 1 or Stage 2: the generated HTML plus the exact
/// prompt that produced it. Replaced wholesale on regeneration.
///
/// `prompt` reflects the prompt that produced `html` as generated. Manual
/// edits rewrite `html` in place and intentionally leave `prompt` stale;
/// the shell labels the prompt view accordingly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageArtifact {
    pub html: String,
    pub prompt: String,
    pub generated_at: DateTime<Utc>,
}

impl StageArtifact {
    pub fn new(html: String, prompt: String) -> Self {
        StageArtifact {
            html,
            prompt,
            generated_at: Utc::now(),
        }
    }
}

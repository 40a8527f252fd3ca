/// LLM client — the single point of entry for all generative-backend calls
/// in the engine.
///
/// ARCHITECTURAL RULE: no other module may talk to the Gemini API directly.
/// The rest of the crate depends only on the narrow `GenerativeBackend`
/// contract: {model, prompt, response-format hint} in, raw text out.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Models used for the three stages. Intentionally pinned per stage to
/// prevent accidental drift.
pub const AEO_MODEL: &str = "gemini-2.5-flash";
pub const BRAND_MODEL: &str = "gemini-2.5-flash";
pub const AUDIT_MODEL: &str = "gemini-2.5-flash";

/// Hint for the shape of the response body. `Json` maps onto the backend's
/// JSON response MIME type; `Text` leaves the output unconstrained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("backend returned empty content")]
    EmptyContent,

    #[error("no API key configured")]
    MissingApiKey,
}

/// The request/response contract with the generative backend. The concrete
/// adapter is [`GeminiClient`]; tests substitute scripted doubles.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, LlmError>;

    /// Whether the backend holds a usable credential. Drives the shell's
    /// connectivity badge; a `false` backend still accepts calls, they just
    /// fail with [`LlmError::MissingApiKey`].
    fn is_configured(&self) -> bool {
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Gemini wire types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<ContentPayload<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig<'a>>,
}

#[derive(Debug, Serialize)]
struct ContentPayload<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig<'a> {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

impl GenerateContentResponse {
    /// First non-empty text part of the first candidate.
    fn text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .filter_map(|c| c.content)
            .flat_map(|c| c.parts)
            .map(|p| p.text)
            .find(|t| !t.is_empty())
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Client
// ────────────────────────────────────────────────────────────────────────────

/// Reqwest-backed Gemini adapter. One request-response round trip per call,
/// no automatic retry; retrying is a user action re-issued by the workflow.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: Option<String>,
}

impl GeminiClient {
    pub fn new(api_key: Option<String>) -> Self {
        GeminiClient {
            client: Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let body = GenerateContentRequest {
            contents: vec![ContentPayload {
                parts: vec![TextPart { text: prompt }],
            }],
            generation_config: match format {
                ResponseFormat::Json => Some(GenerationConfig {
                    response_mime_type: "application/json",
                }),
                ResponseFormat::Text => None,
            },
        };

        let url = format!("{GEMINI_API_BASE}/models/{model}:generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("backend returned {status}: {message}");
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed.text().ok_or(LlmError::EmptyContent)?;

        debug!(model, chars = text.len(), "backend call succeeded");
        Ok(text)
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

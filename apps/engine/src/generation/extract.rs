//! Recovers typed artifacts from loosely structured model output.
//!
//! HTML extraction is a lenient, documented-fallback parser: strip code
//! fences, prefer the `<!DOCTYPE html>` marker, fall back to the first
//! `<html` tag, end at the last `</html>`, and return the whole cleaned text
//! when no envelope is found. Audit extraction is strict JSON.

use thiserror::Error;

use crate::models::AuditReport;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("audit response was not well-formed JSON: {0}")]
    MalformedReport(#[from] serde_json::Error),
}

/// Extracts the HTML document from raw model text. Idempotent: running it on
/// its own output returns the same string.
pub fn extract_html(raw: &str) -> String {
    let cleaned = strip_html_fences(raw);

    let start = cleaned
        .find("<!DOCTYPE html>")
        .or_else(|| cleaned.find("<html"));
    let end = cleaned.rfind("</html>").map(|at| at + "</html>".len());

    match (start, end) {
        (Some(start), Some(end)) if start < end => cleaned[start..end].trim().to_string(),
        _ => cleaned.trim().to_string(),
    }
}

/// Parses raw model text into an [`AuditReport`]. Code fences are stripped
/// first; anything malformed after that is a hard failure with no repair.
pub fn extract_audit(raw: &str) -> Result<AuditReport, ExtractionError> {
    let report = serde_json::from_str(strip_json_fences(raw))?;
    Ok(report)
}

/// Removes every ```` ```html ```` marker (any ASCII case) and every bare
/// ```` ``` ```` marker, wherever they appear.
fn strip_html_fences(raw: &str) -> String {
    let without_tagged = remove_all_ascii_ci(raw, "```html");
    remove_all_ascii_ci(&without_tagged, "```")
}

/// Strips a single leading/trailing ```json or ``` fence pair from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let body = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"))
        .unwrap_or(text);
    let body = body.trim_start();
    body.strip_suffix("```").map(str::trim_end).unwrap_or(body)
}

/// Removes every occurrence of an ASCII needle, matching case-insensitively.
/// Matched regions are pure ASCII, so slicing stays on char boundaries.
fn remove_all_ascii_ci(text: &str, needle: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(at) = find_ascii_ci(rest, needle) {
        out.push_str(&rest[..at]);
        rest = &rest[at + needle.len()..];
    }
    out.push_str(rest);
    out
}

fn find_ascii_ci(text: &str, needle: &str) -> Option<usize> {
    let needle = needle.as_bytes();
    text.as_bytes()
        .windows(needle.len())
        .position(|window| window.eq_ignore_ascii_case(needle))
}

//! Branding-document ingestion: a user-selected file becomes the raw text of
//! `BrandProfile::branding_document`. The file's internal structure is never
//! parsed; whatever it says is embedded verbatim into Stage-2 prompts.

use std::path::Path;

use anyhow::{Context, Result};

pub fn read_branding_document(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read branding document {}", path.display()))
}

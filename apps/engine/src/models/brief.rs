use serde::{Deserialize, Serialize};

/// Product facts collected once at the start of a session. Immutable after
/// submission until a full reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductBrief {
    pub product_name: String,
    pub features: String,
    pub target_audience: String,
    pub call_to_action: String,
}

impl ProductBrief {
    /// Name of the first required field that is empty after trimming, if any.
    pub fn first_missing_field(&self) -> Option<&'static str> {
        [
            ("product name", &self.product_name),
            ("features", &self.features),
            ("target audience", &self.target_audience),
            ("call to action", &self.call_to_action),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}

/// Brand voice and visual profile. When `branding_document` holds non-blank
/// text it supersedes the three manual fields as the authoritative brand
/// context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandProfile {
    /// e.g. "Professional, Trustworthy" or "Playful, Energetic"
    pub personality: String,
    /// e.g. "Formal" or "Conversational"
    pub tone: String,
    /// Hex value or free-text color description
    pub primary_color: String,
    /// Full text of an uploaded branding guidelines file
    pub branding_document: Option<String>,
}

impl BrandProfile {
    /// The uploaded document text, if present and non-blank after trimming.
    pub fn document_text(&self) -> Option<&str> {
        self.branding_document
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

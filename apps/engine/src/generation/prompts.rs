//! Prompt construction for all five backend operations. Pure text templating:
//! the only branch is the brand-context selection rule, kept in one helper so
//! it is testable without the backend.

use crate::models::{BrandProfile, ProductBrief};

/// Stage-1 generation prompt. Replace: `{product_name}`, `{features}`,
/// `{target_audience}`, `{call_to_action}`.
const AEO_PROMPT_TEMPLATE: &str = r#"ROLE: You are an expert AEO Content Writer and Front-End Developer. Your focus is on technical compliance, optimal structure for AI extraction, and clear web standards.

CONTEXT: You have been provided with detailed information for a product.

TASK: Generate a single, complete HTML5 file (including all necessary CSS embedded in a <style> block in the <head>) for a dedicated product landing page.

REQUIREMENTS (AEO Focus):

HTML Structure: Must be semantic HTML5.

AEO Optimization:
- The primary content must be organized around question-and-answer pairs using conversational language (e.g., using <h2> for the question and the following paragraph or list for the answer).
- The answer to the main question (e.g., "What is {product_name}?") must be concise and direct (40-60 words) and presented immediately below the corresponding heading.
- Include a dedicated FAQ Section at the bottom with at least three common, high-intent questions about the product (e.g., "How much does {product_name} cost?", "How do I get started?", "How long does it take?").
- Implement Structured Data (Schema Markup) using a <script type="application/ld+json"> block in the <head> for FAQPage or Product to enhance machine readability.
- Generate a highly relevant, compelling <title> and <meta name="description"> that is question-answer focused.

Initial Styling: Apply basic, neutral, clean, and modern CSS for readability. Use clear, un-branded formatting (bullet points, numbered lists) to aid AI extraction.

OUTPUT FORMAT:
Return ONLY the complete HTML code block. Do not include any introductory text, markdown formatting, or explanations. Start immediately with <!DOCTYPE html>.

INPUT DATA:
Product Name: {product_name}
Key Features/Benefits: {features}
Target Audience Summary: {target_audience}
Call-to-Action (CTA): {call_to_action}"#;

/// Stage-1 refinement prompt. Replace: `{current_html}`, `{instructions}`.
const AEO_REFINE_PROMPT_TEMPLATE: &str = r#"ROLE: You are an expert AEO Content Writer and Web Developer.

TASK: You have been given an existing HTML file and a set of REVISION INSTRUCTIONS. You must rewrite the HTML to incorporate these changes while maintaining the strict AEO structure (semantic HTML, Q&A format, Schema markup).

EXISTING HTML:
{current_html}

REVISION INSTRUCTIONS:
"{instructions}"

OUTPUT FORMAT:
Return ONLY the updated, complete HTML code. Do not include any text before or after the code."#;

/// Stage-2 generation prompt. Replace: `{brand_context}`, `{target_audience}`,
/// `{current_html}`.
const BRAND_PROMPT_TEMPLATE: &str = r#"ROLE: You are a Brand Strategist and Personality Psychology Expert who specializes in taking raw content and adjusting its visual and textual style to align perfectly with a defined brand personality and Ideal Customer Profile (ICP).

CONTEXT: You have received raw HTML/CSS output. You also have a comprehensive Brand Personality Profile.

TASK: Analyze the raw HTML and the provided brand profile, then edit the HTML/CSS to align the style, tone, and visual elements with the brand's characteristics.

{brand_context}

- Target Audience: {target_audience}

INSTRUCTIONS:
1. **Refine the CSS**: Overhaul the existing <style> block. Use colors, fonts, and spacing that reflect the Brand Personality defined above.
   - If the profile suggests "Professional", use serifs or clean sans-serifs, blues/navies, ample whitespace.
   - If "Playful", use rounded fonts, vibrant colors, dynamic spacing.
   - Ensure mobile responsiveness is preserved or improved.
2. **Refine the Copy Tone**: Rewrite the introductions, headlines, and call-to-action buttons to match the Brand Tone.
   - Keep the core AEO answers (the concise 40-60 word definitions) intact for SEO purposes, but adjust the surrounding conversational text.
3. **Visual Elements**: Add placeholder image tags (using https://picsum.photos/...) where appropriate to break up text and add visual interest.

OUTPUT FORMAT:
Return ONLY the full, valid HTML5 file. Do not wrap in markdown. Do not include "Here is the code" or any conversational filler. Start with <!DOCTYPE html>.

RAW HTML INPUT:
{current_html}"#;

/// Stage-2 refinement prompt. Replace: `{brand_context}`, `{current_html}`,
/// `{instructions}`.
const BRAND_REFINE_PROMPT_TEMPLATE: &str = r#"ROLE: You are a Brand Strategist and Web Developer.

TASK: You have been given an existing HTML file (which has already been styled for the brand) and a set of REVISION INSTRUCTIONS.

OBJECTIVE: Apply the requested changes while STRICTLY maintaining the existing Brand Personality and Design System present in the HTML. Do not revert to generic styles.

{brand_context}

EXISTING HTML:
{current_html}

REVISION INSTRUCTIONS:
"{instructions}"

OUTPUT FORMAT:
Return ONLY the updated, complete HTML code. Do not wrap in markdown. Do not include any text before or after the HTML."#;

/// Stage-3 audit prompt. Replace: `{html}`.
const AUDIT_PROMPT_TEMPLATE: &str = r#"ROLE: You are an expert AEO (Answer Engine Optimization) Auditor and QA Specialist.
CONTEXT: You are analyzing a webpage to determine how well it is optimized for AI-driven Answer Engines (Google SGE, ChatGPT, Perplexity, Bing Chat).

TASK: Analyze the provided HTML code and generate a comprehensive AEO Audit Report in JSON format.

HTML CONTENT:
{html}

ANALYSIS CRITERIA:
1. **Q&A Structure**: Are there clear questions (H2) followed by direct, concise answers?
2. **Schema Markup**: Is there valid structured data (FAQPage, Product)?
3. **Content Clarity**: Is the language conversational yet factual? Is the main entity clearly defined?
4. **Formatting**: Are lists and bullet points used effectively for data extraction?

OUTPUT FORMAT (JSON ONLY):
{
  "overallScore": number (0-100),
  "summary": "Brief executive summary of the AEO performance.",
  "checklist": [
    { "criteria": "Schema Markup", "status": "pass"|"fail"|"warning", "details": "Explanation..." },
    { "criteria": "Q&A Formatting", "status": "pass"|"fail"|"warning", "details": "Explanation..." },
    { "criteria": "Direct Answer Conciseness", "status": "pass"|"fail"|"warning", "details": "Explanation..." },
    { "criteria": "Semantic HTML", "status": "pass"|"fail"|"warning", "details": "Explanation..." },
    { "criteria": "Entity Clarity", "status": "pass"|"fail"|"warning", "details": "Explanation..." }
  ],
  "engineSimulations": [
    {
      "engineName": "Google SGE",
      "simulatedResponse": "Simulate how SGE might summarize this page in a snapshot.",
      "verdict": "Likely to be featured / Unlikely"
    },
    {
      "engineName": "ChatGPT Search",
      "simulatedResponse": "Simulate how ChatGPT might cite this page in an answer.",
      "verdict": "High citation probability / Low"
    },
    {
      "engineName": "Perplexity",
      "simulatedResponse": "Simulate the direct answer citation.",
      "verdict": "Strong source / Weak source"
    }
  ]
}"#;

// ────────────────────────────────────────────────────────────────────────────
// Builders
// ────────────────────────────────────────────────────────────────────────────

pub fn aeo_prompt(brief: &ProductBrief) -> String {
    AEO_PROMPT_TEMPLATE
        .replace("{product_name}", &brief.product_name)
        .replace("{features}", &brief.features)
        .replace("{target_audience}", &brief.target_audience)
        .replace("{call_to_action}", &brief.call_to_action)
}

pub fn aeo_refine_prompt(current_html: &str, instructions: &str) -> String {
    AEO_REFINE_PROMPT_TEMPLATE
        .replace("{current_html}", current_html)
        .replace("{instructions}", instructions)
}

pub fn brand_prompt(current_html: &str, profile: &BrandProfile, brief: &ProductBrief) -> String {
    BRAND_PROMPT_TEMPLATE
        .replace("{brand_context}", &brand_context(profile))
        .replace("{target_audience}", &brief.target_audience)
        .replace("{current_html}", current_html)
}

pub fn brand_refine_prompt(
    current_html: &str,
    instructions: &str,
    profile: &BrandProfile,
) -> String {
    BRAND_REFINE_PROMPT_TEMPLATE
        .replace("{brand_context}", &brand_context_brief(profile))
        .replace("{current_html}", current_html)
        .replace("{instructions}", instructions)
}

pub fn audit_prompt(html: &str) -> String {
    AUDIT_PROMPT_TEMPLATE.replace("{html}", html)
}

/// Brand-context selection rule: an uploaded branding document, when
/// non-blank, is embedded verbatim and declared authoritative; otherwise the
/// three manual fields are embedded as a structured profile.
fn brand_context(profile: &BrandProfile) -> String {
    match profile.document_text() {
        Some(document) => format!(
            "IMPORTANT: The user has uploaded a specific BRANDING DOCUMENT. \
             You must strictly adhere to the guidelines, voice, tone, and visual cues \
             found in the text below. Ignore any generic default styling assumptions.\n\n\
             === BRANDING DOCUMENT ===\n{document}\n========================="
        ),
        None => format!(
            "BRAND PROFILE (Manual Entry):\n\
             - Personality: {}\n\
             - Tone: {}\n\
             - Primary Color Theme: {}",
            profile.personality, profile.tone, profile.primary_color
        ),
    }
}

/// Abbreviated brand context for refinement calls, where the full document
/// was already part of the HTML being revised.
fn brand_context_brief(profile: &BrandProfile) -> String {
    match profile.document_text() {
        Some(_) => "BRAND GUIDELINES DOCUMENT: Included in previous context. \
                    Ensure revisions align with the uploaded brand voice and style."
            .to_string(),
        None => format!(
            "BRAND PERSONALITY: {}. TONE: {}.",
            profile.personality, profile.tone
        ),
    }
}

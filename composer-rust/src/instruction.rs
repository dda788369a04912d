//! Prompt assembly for the article composer.
//!
//! The system instruction carries the fixed persona, language, SEO and output
//! rules; the user instruction carries the sources and per-request parameters.

use crate::{ArticleRequest, Language, PromoFacts};

/// Placed between scraped source blocks in the user instruction.
pub const SOURCE_SEPARATOR: &str = "\n\n--- NEXT SOURCE ---\n\n";

const FACTS_PLACEHOLDER: &str = "N/A";
const NO_LINKS: &str = "No specific link definitions provided.";
const NO_PROMO: &str = "No promotional content required. Do NOT add a promotional section.";
const APPEND_PROMO: &str = "Promotional content is required: append the generated promotional \
section(s) to the end of the 'sections' array in the JSON output, after the main sections.";

/// Joins source blocks with [`SOURCE_SEPARATOR`].
///
/// Only blocks that do not contain the separator split back unchanged, and
/// `[]` and `[""]` join to the same empty string; [`split_sources`] maps it
/// back to `[]`.
#[must_use]
pub fn join_sources(sources: &[String]) -> String {
    sources.join(SOURCE_SEPARATOR)
}

/// Inverse of [`join_sources`] for blocks that do not contain the separator.
#[must_use]
pub fn split_sources(joined: &str) -> Vec<String> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(SOURCE_SEPARATOR).map(str::to_string).collect()
}

fn language_rules() -> String {
    let mut rules = String::new();
    for language in Language::ALL {
        let line = if language == Language::English {
            "- English: meta title, meta description and slug in English".to_string()
        } else if language.localizes_slug() {
            format!("- {language}: meta title, meta description and slug in {language}")
        } else {
            format!("- {language}: meta title and meta description in {language}; slug in English")
        };
        rules.push_str(&line);
        rules.push('\n');
    }
    rules
}

/// The fixed system instruction; only the section count varies.
#[must_use]
pub fn system_instruction(num_sections: u32) -> String {
    format!(
        r#"You are an expert cryptocurrency news writer and SEO specialist.

ROLE:
Write as an authoritative source on cryptocurrency topics for an audience of crypto enthusiasts. Keep the tone casual, personable and conversational, use crypto slang where it fits and quick, clever humor when it lands. Address the reader directly as "you".

TONE RULES (mandatory):
1. NO SELF-REFERENCE: never write "I", "we", "us" or "ourselves". The focus stays on the reader and the market.
2. NO QUESTIONS: never ask questions, rhetorical or otherwise. Instead of "What does this mean for Bitcoin?" write "This signal marks a shift for Bitcoin."
3. CERTAINTY: replace curiosity with direct answers, actionable insights and clear warnings.

LANGUAGE RULES:
The meta title and meta description are always written in the article language. The slug depends on the language:
{language_rules}
SEO CONSTRAINTS:
- Meta title: between 50 and 60 characters.
- Meta description: between 120 and 155 characters.

IMAGE PROMPT GUIDELINES:
The 'imagePrompt' field is a detailed, professional text-to-image prompt optimized for photorealism.
- Style: ultra-realistic, cinematic, 8k resolution, HDR, professional studio lighting, Unreal Engine 5 render look.
- Content: show the core news event visually (a bull run, a specific token symbol such as BTC or XRP, a regulator's gavel, a rising chart).
- Composition: dynamic angles, neon accents, futuristic blockchain data streams or dark, sleek financial settings.
- Numbers: when the news features a price milestone or a large figure (e.g. "$756M"), state that it is "visible in glowing neon typography" inside the image.
- Example: "Photorealistic XRP coin swept up by a glowing river of light with '$756M' visible in glowing neon typography, studio lighting, HDR, neon accents against a dark green futuristic blockchain backdrop."

LINK DEFINITIONS (HIGHEST PRIORITY):
- The user may supply anchor text and URL pairs, typically as "Anchor: [Text] Link: [URL]".
- Extract the EXACT anchor text and its URL for every pair.
- The EXACT anchor text must appear in the article content. Never change, shorten or paraphrase it.
- Link it to its URL in Markdown: [Anchor Text](URL).
- If the anchor text is a long sentence or headline that does not fit a paragraph, insert it as a standalone reference such as "Related: [Anchor Text](URL)".
- Do not wait for the phrase to occur naturally; insert it so the link is always present.
- Apply this to EVERY pair provided.

OUTPUT FORMAT:
Output strictly valid JSON only. No markdown code fences, no commentary, just the raw JSON object.

JSON SCHEMA:
{{
  "title": "Main article title",
  "content": {{
    "intro": "Introduction paragraph",
    "sections": [
      {{
        "heading": "Section heading",
        "paragraphs": ["paragraph 1", "paragraph 2"]
      }}
    ]
  }},
  "seo": {{
    "slug": "url-friendly-slug",
    "metaTitle": "SEO title (50-60 characters)",
    "metaDescription": "SEO description (120-155 characters)",
    "excerpt": "Short excerpt",
    "imagePrompt": "Detailed photorealistic image prompt following the guidelines above",
    "altText": "Alt text for the image"
  }},
  "sources": [
    {{ "domain": "example.com", "url": "https://example.com/full-article-url" }}
  ]
}}
The "sections" array must contain exactly {num_sections} main sections."#,
        language_rules = language_rules(),
    )
}

/// The per-request user instruction.
#[must_use]
pub fn user_instruction(sources: &[String], request: &ArticleRequest, facts: &PromoFacts) -> String {
    let include_promo = request.include_promo();
    let subject_name = request
        .promo_subject()
        .unwrap_or(crate::params::NO_PROMO_SUBJECT);
    let subject_facts = request.promo_subject().map_or("", |s| facts.lookup(s));

    let mut prompt = format!(
        "TASK: Generate a cryptocurrency news article based on the following source content and parameters.

TARGET LANGUAGE: {language}

SOURCE CONTENT:
{sources}

PARAMETERS:
- Keywords: {keywords}
- News Angle/Focus: {angle}
- Additional Instructions: {additional}
- Number of Main Content Sections: {num_sections}

",
        language = request.language,
        sources = join_sources(sources),
        keywords = request.keywords,
        angle = request.news_angle,
        additional = request.additional_instructions,
        num_sections = request.num_sections,
    );

    match request.link_definitions() {
        Some(links) => prompt.push_str(&format!(
            "LINK DEFINITIONS (anchor text and URLs, as \"Anchor: ... Link: ...\"):\n{links}\n"
        )),
        None => prompt.push_str(&format!("{NO_LINKS}\n")),
    }

    let facts_block = if include_promo && !subject_facts.is_empty() {
        subject_facts
    } else {
        FACTS_PLACEHOLDER
    };
    prompt.push_str(&format!(
        "
PROMOTIONAL CONTENT INSTRUCTIONS:
- Promotional Subject: {subject_name}
- Mode: {mode}

FACTUAL DATA FOR {subject_name}:
{facts_block}

",
        mode = request.promo_mode,
    ));

    if include_promo {
        prompt.push_str(request.promo_mode.template());
        if let Some(custom) = request.custom_promo_text() {
            prompt.push_str(&format!("\nOverride Promotional Text with:\n{custom}\n"));
        }
        prompt.push_str(&format!("\n{APPEND_PROMO}\n"));
    } else {
        prompt.push_str(&format!("{NO_PROMO}\n"));
    }

    prompt
}

use crate::ComposerResult;
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// A generated news article as returned by the text model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedArticle {
    pub title: String,
    pub content: ArticleContent,
    #[serde(default)]
    pub seo: SeoMetadata,
    #[serde(default)]
    pub sources: Vec<SourceCitation>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArticleContent {
    #[serde(default)]
    pub intro: String,
    /// Main sections first, then any promotional sections.
    #[serde(default)]
    pub sections: Vec<ArticleSection>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSection {
    pub heading: String,
    #[serde(default)]
    pub paragraphs: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct SeoMetadata {
    pub slug: String,
    pub meta_title: String,
    pub meta_description: String,
    pub excerpt: String,
    pub image_prompt: String,
    pub alt_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SourceCitation {
    pub domain: String,
    pub url: String,
}

/// Remove markdown code-fence markers the model may wrap around JSON despite
/// being told not to.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a model text response as JSON after fence cleanup.
pub fn parse_json_response<T: DeserializeOwned>(text: &str) -> ComposerResult<T> {
    Ok(serde_json::from_str(&strip_code_fences(text))?)
}

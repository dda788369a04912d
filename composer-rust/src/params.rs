use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Subject value the UI uses for "no promotional subject selected".
pub const NO_PROMO_SUBJECT: &str = "None";

/// Languages the article composer writes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Language {
    #[default]
    English,
    Japanese,
    Thai,
    French,
    German,
    Turkish,
    Spanish,
    Italian,
}

impl Language {
    pub const ALL: [Self; 8] = [
        Self::English,
        Self::Japanese,
        Self::Thai,
        Self::French,
        Self::German,
        Self::Turkish,
        Self::Spanish,
        Self::Italian,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Japanese => "Japanese",
            Self::Thai => "Thai",
            Self::French => "French",
            Self::German => "German",
            Self::Turkish => "Turkish",
            Self::Spanish => "Spanish",
            Self::Italian => "Italian",
        }
    }

    /// Whether the slug is written in this language. Non-Latin scripts keep
    /// an English slug.
    #[must_use]
    pub fn localizes_slug(self) -> bool {
        !matches!(self, Self::Japanese | Self::Thai)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|language| language.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported language: {s}"))
    }
}

/// How much promotional content the article carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum PromoMode {
    /// Project insight section followed by a structured call to action.
    #[serde(rename = "Full")]
    Full,
    /// Official-website call to action only.
    #[serde(rename = "CTA Only")]
    CtaOnly,
    #[default]
    #[serde(rename = "No CTA")]
    NoCta,
}

impl PromoMode {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "Full",
            Self::CtaOnly => "CTA Only",
            Self::NoCta => "No CTA",
        }
    }
}

impl fmt::Display for PromoMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PromoMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [Self::Full, Self::CtaOnly, Self::NoCta]
            .into_iter()
            .find(|mode| mode.label().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unsupported promo mode: {s}"))
    }
}

/// Caller parameters for one article generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ArticleRequest {
    pub language: Language,
    pub keywords: String,
    pub news_angle: String,
    pub additional_instructions: String,
    /// Number of main content sections, not counting promotional ones.
    pub num_sections: u32,
    /// Free-text anchor/URL pairs, e.g. `Anchor: Bitcoin ETF Link: https://…`.
    pub link_definitions: Option<String>,
    pub promo_mode: PromoMode,
    pub promo_subject: Option<String>,
    pub custom_promo_text: Option<String>,
}

impl Default for ArticleRequest {
    fn default() -> Self {
        Self {
            language: Language::default(),
            keywords: String::new(),
            news_angle: String::new(),
            additional_instructions: String::new(),
            num_sections: 3,
            link_definitions: None,
            promo_mode: PromoMode::default(),
            promo_subject: None,
            custom_promo_text: None,
        }
    }
}

impl ArticleRequest {
    /// The selected promotional subject, if any. Blank values and the
    /// [`NO_PROMO_SUBJECT`] sentinel count as no selection.
    #[must_use]
    pub fn promo_subject(&self) -> Option<&str> {
        self.promo_subject
            .as_deref()
            .map(str::trim)
            .filter(|subject| !subject.is_empty() && *subject != NO_PROMO_SUBJECT)
    }

    #[must_use]
    pub fn custom_promo_text(&self) -> Option<&str> {
        self.custom_promo_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    #[must_use]
    pub fn link_definitions(&self) -> Option<&str> {
        self.link_definitions
            .as_deref()
            .filter(|links| !links.trim().is_empty())
    }

    /// Promotional facts and templates are injected only when promotion is
    /// enabled and there is something to promote.
    #[must_use]
    pub fn include_promo(&self) -> bool {
        self.promo_mode != PromoMode::NoCta
            && (self.promo_subject().is_some() || self.custom_promo_text().is_some())
    }
}

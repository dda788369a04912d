use crate::{ComposerError, ComposerResult, PromoMode};
use std::{collections::HashMap, path::Path};

/// Insight section plus a structured call to action.
pub const PROMO_TEMPLATE_FULL: &str = "
Structure:
Section 1 (Informative Transition + Insight):
Write an H2 about [Project Name] that follows on from the market trend covered in the article.
Open with one short sentence that refers back to the article's topic so the transition reads naturally.
Then add 1-5 sentences of useful insight about [Project Name]: a recent update, its market relevance or its ecosystem growth.
Tone: factual and educational, consistent with the rest of the article, never pushy.

Section 2 (Informative CTA - keep this structure):
Adapt the wording to the article's topic but keep every element: price analysis, buying guide and official links.
Follow this format (wording may be tuned to the article):
If you're considering [Project Name], read our [Project Name] price analysis and check out our step-by-step guide to buying [Project Name] to plan with more confidence.
Stay updated on the latest news via [the [Project Name] official website], [X (Twitter)], and [Telegram channels].
Visit [the [Project Name] official website]
";

/// Official-website call to action only.
pub const PROMO_TEMPLATE_CTA: &str = "
Structure:
Section 1 (Informative CTA - keep this structure):
Follow this format (wording may be tuned to the article):
Visit [the [Project Name] official website]
";

impl PromoMode {
    /// The promotional instruction template for this mode; empty for
    /// [`PromoMode::NoCta`].
    #[must_use]
    pub fn template(self) -> &'static str {
        match self {
            Self::Full => PROMO_TEMPLATE_FULL,
            Self::CtaOnly => PROMO_TEMPLATE_CTA,
            Self::NoCta => "",
        }
    }
}

const BUILTIN_FACTS: &[(&str, &str)] = &[
    (
        "Bitcoin",
        "Bitcoin (BTC) is the first decentralized cryptocurrency, launched in January 2009. \
         Its supply is capped at 21 million coins and new issuance halves roughly every four \
         years. The network is secured by proof-of-work mining.",
    ),
    (
        "Ethereum",
        "Ethereum (ETH) is a programmable blockchain launched in July 2015 that runs smart \
         contracts and hosts most DeFi and NFT activity. It moved from proof-of-work to \
         proof-of-stake in September 2022 (The Merge).",
    ),
    (
        "Solana",
        "Solana (SOL) is a high-throughput layer-1 blockchain launched in 2020. It combines \
         proof-of-stake with proof-of-history timestamps to reach low fees and fast block \
         times.",
    ),
    (
        "XRP",
        "XRP is the native asset of the XRP Ledger, launched in 2012 and focused on fast, \
         low-cost cross-border payments. Its supply was fixed at 100 billion tokens at \
         launch.",
    ),
];

/// Factual background per promotional subject.
///
/// Lookups never fail: an unknown subject yields an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromoFacts {
    facts: HashMap<String, String>,
}

impl PromoFacts {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The facts bundled with the crate.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN_FACTS
            .iter()
            .map(|(subject, facts)| ((*subject).to_string(), (*facts).to_string()))
            .collect()
    }

    /// Parse a JSON object of `{ "<subject>": "<facts>" }`.
    pub fn from_json_str(json: &str) -> ComposerResult<Self> {
        let facts: HashMap<String, String> = serde_json::from_str(json)?;
        Ok(Self { facts })
    }

    /// Read a JSON facts table from disk.
    pub fn from_path(path: impl AsRef<Path>) -> ComposerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|error| {
            ComposerError::Config(format!(
                "failed to read promo facts from {}: {error}",
                path.display()
            ))
        })?;
        Self::from_json_str(&json)
    }

    #[must_use]
    pub fn with_facts(mut self, subject: impl Into<String>, facts: impl Into<String>) -> Self {
        self.facts.insert(subject.into(), facts.into());
        self
    }

    #[must_use]
    pub fn lookup(&self, subject: &str) -> &str {
        self.facts.get(subject).map_or("", String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.facts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facts.is_empty()
    }
}

impl FromIterator<(String, String)> for PromoFacts {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            facts: iter.into_iter().collect(),
        }
    }
}

mod article;
mod composer;
mod config;
mod errors;
mod instruction;
mod params;
mod promo;

pub use article::{
    parse_json_response, strip_code_fences, ArticleContent, ArticleSection, GeneratedArticle,
    SeoMetadata, SourceCitation,
};
pub use composer::{ArticleComposer, ImageComposer};
pub use config::{ComposerConfig, DEFAULT_IMAGE_MODEL, DEFAULT_TEMPERATURE, DEFAULT_TEXT_MODEL};
pub use errors::{ComposerError, ComposerResult};
pub use instruction::{
    join_sources, split_sources, system_instruction, user_instruction, SOURCE_SEPARATOR,
};
pub use params::{ArticleRequest, Language, PromoMode, NO_PROMO_SUBJECT};
pub use promo::{PromoFacts, PROMO_TEMPLATE_CTA, PROMO_TEMPLATE_FULL};

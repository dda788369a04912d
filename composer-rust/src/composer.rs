use crate::{
    article::parse_json_response,
    config::DEFAULT_TEMPERATURE,
    instruction::{system_instruction, user_instruction},
    ArticleRequest, ComposerConfig, ComposerError, ComposerResult, GeneratedArticle, PromoFacts,
};
use coinwire_sdk::{LanguageModel, LanguageModelInput, Modality, Part, ResponseFormat};
use std::sync::Arc;
use tracing::info_span;
use tracing_futures::Instrument;

/// Writes a structured article from scraped sources with one text-model call.
#[derive(Clone)]
pub struct ArticleComposer {
    model: Arc<dyn LanguageModel>,
    facts: Arc<PromoFacts>,
    temperature: f64,
}

impl ArticleComposer {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self {
            model,
            facts: Arc::new(PromoFacts::builtin()),
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Composer backed by the configured Gemini text model.
    #[must_use]
    pub fn from_config(config: &ComposerConfig) -> Self {
        Self::new(Arc::new(config.text_model())).with_temperature(config.temperature)
    }

    #[must_use]
    pub fn with_facts(mut self, facts: PromoFacts) -> Self {
        self.facts = Arc::new(facts);
        self
    }

    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Build the model input for a request without sending it.
    #[must_use]
    pub fn build_input(&self, sources: &[String], request: &ArticleRequest) -> LanguageModelInput {
        LanguageModelInput {
            system_prompt: Some(system_instruction(request.num_sections)),
            prompt: vec![Part::text(user_instruction(sources, request, &self.facts))],
            response_format: ResponseFormat::Json,
            temperature: Some(self.temperature),
            modalities: Vec::new(),
        }
    }

    pub async fn generate_article(
        &self,
        sources: &[String],
        request: &ArticleRequest,
    ) -> ComposerResult<GeneratedArticle> {
        let span = info_span!(
            "coinwire.generate_article",
            model = %self.model.model_id(),
            language = %request.language,
            promo_mode = %request.promo_mode,
            sources = sources.len(),
        );

        async move {
            let input = self.build_input(sources, request);
            tracing::debug!(
                include_promo = request.include_promo(),
                num_sections = request.num_sections,
                "sending article request"
            );

            let response = self.model.generate(input).await.map_err(|error| {
                tracing::error!(%error, "article generation failed");
                ComposerError::from(error)
            })?;

            let Some(text) = response.text().filter(|text| !text.trim().is_empty()) else {
                tracing::error!("article generation returned no text");
                return Err(ComposerError::EmptyResponse);
            };

            let article: GeneratedArticle = parse_json_response(&text).map_err(|error| {
                tracing::error!(%error, "article response is not valid JSON");
                error
            })?;

            let requested = usize::try_from(request.num_sections).unwrap_or(usize::MAX);
            if article.content.sections.len() < requested {
                tracing::warn!(
                    requested,
                    returned = article.content.sections.len(),
                    "model returned fewer sections than requested"
                );
            }

            Ok(article)
        }
        .instrument(span)
        .await
    }
}

/// Produces a base64-encoded image from a text prompt with one multimodal
/// model call.
#[derive(Clone)]
pub struct ImageComposer {
    model: Arc<dyn LanguageModel>,
}

impl ImageComposer {
    #[must_use]
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Composer backed by the configured Gemini image model.
    #[must_use]
    pub fn from_config(config: &ComposerConfig) -> Self {
        Self::new(Arc::new(config.image_model()))
    }

    /// Returns the base64 payload of the first inline-data part in the
    /// response, whatever its mime type.
    pub async fn generate_image(&self, prompt: &str) -> ComposerResult<String> {
        let span = info_span!("coinwire.generate_image", model = %self.model.model_id());

        async move {
            let input = LanguageModelInput {
                modalities: vec![Modality::Text, Modality::Image],
                ..LanguageModelInput::from_text(prompt)
            };

            let response = self.model.generate(input).await.map_err(|error| {
                tracing::error!(%error, "image generation failed");
                ComposerError::from(error)
            })?;

            match response.first_inline_data() {
                Some(inline) => Ok(inline.data.clone()),
                None => {
                    tracing::error!("image generation returned no inline image data");
                    Err(ComposerError::NoImageData)
                }
            }
        }
        .instrument(span)
        .await
    }
}

use crate::{ComposerError, ComposerResult};
use coinwire_sdk::google::{GoogleModel, GoogleModelOptions};

pub const DEFAULT_TEXT_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_TEMPERATURE: f64 = 0.7;

const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];
const TEXT_MODEL_VAR: &str = "COINWIRE_TEXT_MODEL";
const IMAGE_MODEL_VAR: &str = "COINWIRE_IMAGE_MODEL";
const BASE_URL_VAR: &str = "COINWIRE_BASE_URL";

/// Connection settings for both composers.
#[derive(Clone)]
pub struct ComposerConfig {
    pub api_key: String,
    pub text_model: String,
    pub image_model: String,
    /// Overrides the Gemini endpoint, e.g. for a proxy.
    pub base_url: Option<String>,
    pub temperature: f64,
}

impl std::fmt::Debug for ComposerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposerConfig")
            .field("api_key", &"[REDACTED]")
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl ComposerConfig {
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            text_model: DEFAULT_TEXT_MODEL.to_string(),
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            base_url: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// Build from the process environment. The key is read from `API_KEY`,
    /// then `GEMINI_API_KEY`.
    pub fn from_env() -> ComposerResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ComposerResult<Self> {
        let non_empty = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = API_KEY_VARS
            .iter()
            .find_map(|name| non_empty(*name))
            .ok_or_else(|| {
                ComposerError::Config(format!(
                    "{} environment variable not set",
                    API_KEY_VARS.join(" or ")
                ))
            })?;

        let mut config = Self::new(api_key);
        if let Some(text_model) = non_empty(TEXT_MODEL_VAR) {
            config.text_model = text_model;
        }
        if let Some(image_model) = non_empty(IMAGE_MODEL_VAR) {
            config.image_model = image_model;
        }
        config.base_url = non_empty(BASE_URL_VAR);
        Ok(config)
    }

    fn model_options(&self) -> GoogleModelOptions {
        GoogleModelOptions {
            api_key: self.api_key.clone(),
            base_url: self.base_url.clone(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn text_model(&self) -> GoogleModel {
        GoogleModel::new(self.text_model.clone(), self.model_options())
    }

    #[must_use]
    pub fn image_model(&self) -> GoogleModel {
        GoogleModel::new(self.image_model.clone(), self.model_options())
    }
}

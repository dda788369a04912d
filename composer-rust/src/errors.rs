use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposerError {
    /// The remote call failed: network, authentication, quota or a rejected
    /// request.
    #[error("Language model error: {0}")]
    LanguageModel(#[from] coinwire_sdk::LanguageModelError),
    #[error("No response from the model")]
    EmptyResponse,
    /// The cleaned response text is not a JSON document of the expected
    /// shape.
    #[error("Malformed JSON in model response: {0}")]
    MalformedJson(#[from] serde_json::Error),
    #[error("No image data received from the model.")]
    NoImageData,
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type ComposerResult<T> = Result<T, ComposerError>;

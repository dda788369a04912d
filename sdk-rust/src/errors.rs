use thiserror::Error;

#[derive(Error, Debug)]
pub enum LanguageModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// Sending the request or decoding the reply failed. The request URL is
    /// stripped.
    #[error("Transport error: {0}")]
    Transport(reqwest::Error),
    #[error("Status error: {1} (Status {0})")]
    StatusCode(reqwest::StatusCode, String),
    /// The provider answered in a shape the client cannot use.
    #[error("Invariant from {0}: {1}")]
    Invariant(&'static str, String),
}

pub type LanguageModelResult<T> = Result<T, LanguageModelError>;

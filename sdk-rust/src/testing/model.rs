use crate::{LanguageModel, LanguageModelError, LanguageModelInput, LanguageModelResult, ModelResponse};
use std::{
    collections::VecDeque,
    sync::{Mutex, MutexGuard, PoisonError},
};

const PROVIDER: &str = "mock";

#[derive(Default)]
struct Script {
    replies: VecDeque<LanguageModelResult<ModelResponse>>,
    inputs: Vec<LanguageModelInput>,
}

/// Language model that answers from a queue of scripted replies and records
/// every input it receives.
#[derive(Default)]
pub struct MockLanguageModel {
    script: Mutex<Script>,
}

impl MockLanguageModel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking test poisons the lock; the script itself stays usable.
    fn script(&self) -> MutexGuard<'_, Script> {
        self.script.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push_response(&self, response: ModelResponse) -> &Self {
        self.script().replies.push_back(Ok(response));
        self
    }

    pub fn push_error(&self, error: LanguageModelError) -> &Self {
        self.script().replies.push_back(Err(error));
        self
    }

    /// Inputs received so far, oldest first.
    #[must_use]
    pub fn inputs(&self) -> Vec<LanguageModelInput> {
        self.script().inputs.clone()
    }

    /// Drop queued replies and recorded inputs.
    pub fn reset(&self) {
        let mut script = self.script();
        script.replies.clear();
        script.inputs.clear();
    }
}

#[async_trait::async_trait]
impl LanguageModel for MockLanguageModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        "mock-model".to_string()
    }

    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse> {
        let mut script = self.script();
        script.inputs.push(input);
        script.replies.pop_front().unwrap_or_else(|| {
            Err(LanguageModelError::Invariant(
                PROVIDER,
                "no scripted reply left".to_string(),
            ))
        })
    }
}

use super::api::{
    Blob, Content, ContentPart, GenerateContentRequest, GenerateContentResponse,
    GenerationConfig, UsageMetadata,
};
use crate::{
    client_utils, opentelemetry::trace_generate, LanguageModel, LanguageModelError,
    LanguageModelInput, LanguageModelResult, Modality, ModelResponse, ModelUsage, Part,
    ResponseFormat,
};
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client,
};
use std::collections::HashMap;

const PROVIDER: &str = "google";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_INLINE_MIME_TYPE: &str = "image/png";

/// Gemini `generateContent` client for one model.
///
/// The API key travels in the `x-goog-api-key` header so it never shows up
/// in request URLs or the transport errors built from them.
pub struct GoogleModel {
    model_id: String,
    api_key: String,
    base_url: String,
    client: Client,
    headers: HashMap<String, String>,
}

#[derive(Clone, Default)]
pub struct GoogleModelOptions {
    pub api_key: String,
    /// Defaults to the public `v1beta` endpoint.
    pub base_url: Option<String>,
    /// Extra headers sent with every request.
    pub headers: Option<HashMap<String, String>>,
    pub client: Option<Client>,
}

impl std::fmt::Debug for GoogleModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleModel")
            .field("model_id", &self.model_id)
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl GoogleModel {
    #[must_use]
    pub fn new(model_id: impl Into<String>, options: GoogleModelOptions) -> Self {
        let base_url = options
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            model_id: model_id.into(),
            api_key: options.api_key,
            base_url,
            client: options.client.unwrap_or_default(),
            headers: options.headers.unwrap_or_default(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model_id)
    }

    fn request_headers(&self) -> LanguageModelResult<HeaderMap> {
        let mut headers = HeaderMap::new();

        for (key, value) in &self.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|error| {
                LanguageModelError::InvalidInput(format!("Invalid header name '{key}': {error}"))
            })?;
            let value = HeaderValue::from_str(value).map_err(|error| {
                LanguageModelError::InvalidInput(format!("Invalid header value for '{key}': {error}"))
            })?;
            headers.insert(name, value);
        }

        let mut api_key = HeaderValue::from_str(&self.api_key).map_err(|_| {
            LanguageModelError::InvalidInput("API key is not a valid header value".to_string())
        })?;
        api_key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, api_key);

        Ok(headers)
    }
}

#[async_trait::async_trait]
impl LanguageModel for GoogleModel {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    fn model_id(&self) -> String {
        self.model_id.clone()
    }

    async fn generate(&self, input: LanguageModelInput) -> LanguageModelResult<ModelResponse> {
        trace_generate(PROVIDER, &self.model_id, input, |input| async move {
            let headers = self.request_headers()?;
            let body = build_request(input);
            let response: GenerateContentResponse =
                client_utils::send_json(&self.client, &self.endpoint(), &body, headers).await?;
            Ok(parse_response(response))
        })
        .await
    }
}

fn build_request(input: LanguageModelInput) -> GenerateContentRequest {
    let LanguageModelInput {
        system_prompt,
        prompt,
        response_format,
        temperature,
        modalities,
    } = input;

    let generation_config = GenerationConfig {
        temperature,
        response_mime_type: match response_format {
            ResponseFormat::Text => None,
            ResponseFormat::Json => Some("application/json".to_string()),
        },
        response_modalities: modalities
            .into_iter()
            .map(|modality| match modality {
                Modality::Text => "TEXT".to_string(),
                Modality::Image => "IMAGE".to_string(),
            })
            .collect(),
    };

    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: prompt.into_iter().map(to_content_part).collect(),
        }],
        system_instruction: system_prompt.map(|text| Content {
            role: None,
            parts: vec![ContentPart {
                text: Some(text),
                ..Default::default()
            }],
        }),
        generation_config: (generation_config != GenerationConfig::default())
            .then_some(generation_config),
    }
}

fn to_content_part(part: Part) -> ContentPart {
    match part {
        Part::Text { text } => ContentPart {
            text: Some(text),
            ..Default::default()
        },
        Part::InlineData(inline) => ContentPart {
            inline_data: Some(Blob {
                mime_type: Some(inline.mime_type),
                data: Some(inline.data),
            }),
            ..Default::default()
        },
    }
}

/// Reads the first candidate only. No candidate maps to empty content; the
/// caller decides whether that is an error.
fn parse_response(response: GenerateContentResponse) -> ModelResponse {
    let usage = response.usage_metadata.as_ref().map(to_usage);

    let Some(candidate) = response.candidates.into_iter().next() else {
        let block_reason = response
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);
        tracing::debug!(?block_reason, "gemini returned no candidate");
        return ModelResponse {
            content: Vec::new(),
            usage,
        };
    };

    let parts = candidate.content.map(|c| c.parts).unwrap_or_default();
    if parts.is_empty() {
        tracing::debug!(finish_reason = ?candidate.finish_reason, "gemini candidate has no parts");
    }

    ModelResponse {
        content: parts.into_iter().filter_map(from_content_part).collect(),
        usage,
    }
}

fn from_content_part(part: ContentPart) -> Option<Part> {
    if part.thought {
        return None;
    }
    if let Some(text) = part.text {
        return Some(Part::text(text));
    }
    let blob = part.inline_data?;
    let data = blob.data.filter(|data| !data.is_empty())?;
    Some(Part::inline_data(
        data,
        blob.mime_type
            .unwrap_or_else(|| DEFAULT_INLINE_MIME_TYPE.to_string()),
    ))
}

fn to_usage(usage: &UsageMetadata) -> ModelUsage {
    ModelUsage {
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_request_carries_system_instruction_and_mime_type() {
        let request = build_request(LanguageModelInput {
            system_prompt: Some("be brief".to_string()),
            response_format: ResponseFormat::Json,
            temperature: Some(0.7),
            ..LanguageModelInput::from_text("hello")
        });

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "contents": [{ "role": "user", "parts": [{ "text": "hello" }] }],
                "systemInstruction": { "parts": [{ "text": "be brief" }] },
                "generationConfig": {
                    "temperature": 0.7,
                    "responseMimeType": "application/json"
                }
            })
        );
    }

    #[test]
    fn plain_request_omits_generation_config() {
        let request = build_request(LanguageModelInput::from_text("hello"));
        assert!(request.generation_config.is_none());
        assert!(request.system_instruction.is_none());
    }

    #[test]
    fn image_request_lists_uppercase_modalities() {
        let request = build_request(LanguageModelInput {
            modalities: vec![Modality::Text, Modality::Image],
            ..LanguageModelInput::from_text("a red fox")
        });

        assert_eq!(
            request.generation_config.unwrap().response_modalities,
            vec!["TEXT".to_string(), "IMAGE".to_string()]
        );
    }

    #[test]
    fn response_parts_keep_order_and_drop_thoughts() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "thinking...", "thought": true },
                        { "text": "caption" },
                        { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                        { "inlineData": { "mimeType": "image/jpeg", "data": "c2Vjb25k" } }
                    ]
                },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
        }))
        .unwrap();

        let parsed = parse_response(response);
        assert_eq!(
            parsed.content,
            vec![
                Part::text("caption"),
                Part::inline_data("Zmlyc3Q=", "image/png"),
                Part::inline_data("c2Vjb25k", "image/jpeg"),
            ]
        );
        assert_eq!(
            parsed.usage,
            Some(ModelUsage {
                input_tokens: 12,
                output_tokens: 34,
            })
        );
    }

    #[test]
    fn blocked_prompt_maps_to_empty_content() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        let parsed = parse_response(response);
        assert!(parsed.content.is_empty());
        assert!(parsed.usage.is_none());
    }

    #[test]
    fn inline_data_keeps_any_mime_type_and_skips_empty_payloads() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "parts": [
                        { "inlineData": { "mimeType": "image/png" } },
                        { "inlineData": { "mimeType": "application/octet-stream", "data": "Ymlu" } },
                        { "inlineData": { "data": "aW1n" } }
                    ]
                },
                "finishReason": "SOMETHING_NEW"
            }]
        }))
        .unwrap();

        assert_eq!(
            parse_response(response).content,
            vec![
                Part::inline_data("Ymlu", "application/octet-stream"),
                Part::inline_data("aW1n", DEFAULT_INLINE_MIME_TYPE),
            ]
        );
    }

    #[test]
    fn api_key_is_a_sensitive_header() {
        let model = GoogleModel::new(
            "gemini-test",
            GoogleModelOptions {
                api_key: "secret".to_string(),
                ..Default::default()
            },
        );

        let headers = model.request_headers().unwrap();
        let key = headers.get(API_KEY_HEADER).unwrap();
        assert_eq!(key, "secret");
        assert!(key.is_sensitive());
        assert!(!model.endpoint().contains("secret"));
        assert!(!format!("{model:?}").contains("secret"));
    }
}

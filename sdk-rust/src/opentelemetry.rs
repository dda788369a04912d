use crate::{LanguageModelInput, LanguageModelResult, ModelResponse};
use opentelemetry::trace::Status;
use std::{future::Future, time::Instant};
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

fn generate_span(provider: &str, model_id: &str, input: &LanguageModelInput) -> Span {
    let span = info_span!("coinwire_sdk.generate");
    span.set_attribute("gen_ai.operation.name", "generate_content");
    span.set_attribute("gen_ai.provider.name", provider.to_string());
    span.set_attribute("gen_ai.request.model", model_id.to_string());
    if let Some(temperature) = input.temperature {
        span.set_attribute("gen_ai.request.temperature", temperature);
    }
    span
}

fn record_outcome(span: &Span, result: &LanguageModelResult<ModelResponse>, started: Instant) {
    match result {
        Ok(response) => {
            if let Some(usage) = response.usage {
                span.set_attribute("gen_ai.usage.input_tokens", i64::from(usage.input_tokens));
                span.set_attribute("gen_ai.usage.output_tokens", i64::from(usage.output_tokens));
            }
        }
        Err(error) => {
            span.set_attribute("exception.message", error.to_string());
            span.set_status(Status::error(error.to_string()));
        }
    }
    span.set_attribute(
        "coinwire_sdk.duration_seconds",
        started.elapsed().as_secs_f64(),
    );
}

/// Runs one `generate` call inside a `coinwire_sdk.generate` span and records
/// token usage or the error on it.
pub async fn trace_generate<F, Fut>(
    provider: &str,
    model_id: &str,
    input: LanguageModelInput,
    generate: F,
) -> LanguageModelResult<ModelResponse>
where
    F: FnOnce(LanguageModelInput) -> Fut,
    Fut: Future<Output = LanguageModelResult<ModelResponse>>,
{
    let span = generate_span(provider, model_id, &input);
    let started = Instant::now();
    let result = generate(input).instrument(span.clone()).await;
    record_outcome(&span, &result, started);
    result
}

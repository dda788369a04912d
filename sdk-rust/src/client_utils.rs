use crate::LanguageModelError;
use reqwest::{header::HeaderMap, Client};
use serde::{de::DeserializeOwned, Serialize};

// Transport errors drop the request URL before they reach logs or spans.
fn transport(error: reqwest::Error) -> LanguageModelError {
    LanguageModelError::Transport(error.without_url())
}

/// POST `data` as JSON and decode a JSON reply.
/// Any non-success status becomes [`LanguageModelError::StatusCode`] with the
/// response body.
pub async fn send_json<T: Serialize, R: DeserializeOwned>(
    client: &Client,
    url: &str,
    data: &T,
    headers: HeaderMap,
) -> Result<R, LanguageModelError> {
    let response = client
        .post(url)
        .headers(headers)
        .json(data)
        .send()
        .await
        .map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(LanguageModelError::StatusCode(status, body));
    }

    response.json::<R>().await.map_err(transport)
}

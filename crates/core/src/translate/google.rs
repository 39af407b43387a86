//! Google Translate backed translator.
//! This uses the public `translate_a/single` endpoint, one request per call.

use super::Translator;
use crate::config::DEFAULT_ENDPOINT;
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, trace};

/// Longest text the service accepts in a single request.
pub const MAX_CHARS: usize = 5000;

/// Translator that delegates to the Google Translate web endpoint.
#[derive(Debug, Clone)]
pub struct GoogleTranslator {
    client: Client,
    base_url: String,
}

impl Default for GoogleTranslator {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT)
    }
}

impl GoogleTranslator {
    /// Create a translator talking to `base_url`, e.g. a mock server in tests.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Send the query and return the JSON reply.
    async fn fetch(&self, text: &str, source: &str, target: &str) -> Result<Value> {
        let url = format!("{}/translate_a/single", self.base_url);
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await
            .context("translation request failed")?;
        let resp = resp.error_for_status()?;
        Ok(resp.json().await.context("translation reply is not JSON")?)
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        trace!("translate chars={} {source}->{target}", text.chars().count());
        if text.trim().is_empty() {
            return Ok(text.to_string());
        }
        let chars = text.chars().count();
        if chars > MAX_CHARS {
            bail!("text has {chars} characters, the service accepts at most {MAX_CHARS}");
        }
        let value = self.fetch(text, source, target).await?;
        let translated = join_segments(&value)?;
        debug!("translated {chars} characters");
        Ok(translated)
    }
}

/// The reply is `[[["translated", "original", ...], ...], ...]`; long input
/// comes back split into several segments that we join in order.
fn join_segments(value: &Value) -> Result<String> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| anyhow!("unexpected translation reply"))?;
    let mut out = String::new();
    for segment in segments {
        if let Some(part) = segment.get(0).and_then(Value::as_str) {
            out.push_str(part);
        }
    }
    if out.is_empty() {
        bail!("translation reply contained no text");
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn translates_through_the_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/translate_a/single")
                    .query_param("client", "gtx")
                    .query_param("sl", "en")
                    .query_param("tl", "pt")
                    .query_param("q", "Hello");
                then.status(200)
                    .json_body(json!([[["Olá", "Hello", null, null, 10]], null, "en"]));
            })
            .await;
        let tr = GoogleTranslator::new(server.base_url());
        assert_eq!(tr.translate("Hello", "en", "pt").await.unwrap(), "Olá");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn joins_multiple_segments() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/translate_a/single");
                then.status(200).json_body(json!([
                    [["Bom dia.\n", "Good morning.\n"], ["Tchau.", "Bye."]],
                    null,
                    "en"
                ]));
            })
            .await;
        let tr = GoogleTranslator::new(format!("{}/", server.base_url()));
        let out = tr.translate("Good morning.\nBye.", "en", "pt").await.unwrap();
        assert_eq!(out, "Bom dia.\nTchau.");
    }

    #[tokio::test]
    async fn service_errors_propagate() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/translate_a/single");
                then.status(429).body("Too Many Requests");
            })
            .await;
        let tr = GoogleTranslator::new(server.base_url());
        assert!(tr.translate("Hello", "en", "pt").await.is_err());
    }

    #[tokio::test]
    async fn malformed_reply_is_an_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/translate_a/single");
                then.status(200).json_body(json!({"error": "nope"}));
            })
            .await;
        let tr = GoogleTranslator::new(server.base_url());
        let err = tr.translate("Hello", "en", "pt").await.unwrap_err();
        assert!(err.to_string().contains("unexpected translation reply"));
    }

    #[tokio::test]
    async fn blank_and_oversized_text_skip_the_network() {
        // Nothing listens on this address; any request would fail.
        let tr = GoogleTranslator::new("http://127.0.0.1:9");
        assert_eq!(tr.translate("  ", "en", "pt").await.unwrap(), "  ");
        let long = "a".repeat(MAX_CHARS + 1);
        let err = tr.translate(&long, "en", "pt").await.unwrap_err();
        assert!(err.to_string().contains("at most"));
    }
}

use crate::api_types::{InputMessage, ResponsesRequest, ResponsesResponse};
use crate::error::EngineError;
use crate::llm::{CompletionParams, LlmClient};
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::Value;
use std::env;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Client for the OpenAI Responses API.
///
/// One attempt per call; failures are surfaced to the caller as-is.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiClient {
    /// Build a client using `OPENAI_API_KEY` from the environment.
    pub fn new(model: &str, base_url: Option<&str>, timeout: Option<Duration>) -> Result<Self> {
        let api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?;
        Self::with_key(model, &api_key, base_url, timeout)
    }

    pub fn with_key(
        model: &str,
        api_key: &str,
        base_url: Option<&str>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(t) = timeout {
            builder = builder.timeout(t);
        }
        Ok(Self {
            client: builder.build().context("Failed to build HTTP client")?,
            api_key: api_key.to_string(),
            base_url: base_url
                .unwrap_or(DEFAULT_BASE_URL)
                .trim_end_matches('/')
                .to_string(),
            model: model.to_string(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}/responses", self.base_url)
    }
}

/// Pull `error.message` out of an upstream error body.
fn upstream_message(body: &Value) -> String {
    body.pointer("/error/message")
        .and_then(Value::as_str)
        .unwrap_or("OpenAI request failed")
        .to_string()
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    #[tracing::instrument(skip(self, system, input, params), fields(model = %self.model))]
    async fn complete(
        &self,
        system: &str,
        input: Vec<InputMessage>,
        params: CompletionParams,
    ) -> Result<ResponsesResponse, EngineError> {
        let mut messages = Vec::with_capacity(input.len() + 1);
        messages.push(InputMessage::system(system));
        messages.extend(input);

        let request_body = ResponsesRequest {
            model: self.model.clone(),
            input: messages,
            max_output_tokens: params.max_output_tokens,
            temperature: params.temperature,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let resp_text = response.text().await?;
        tracing::debug!(
            "OpenAI raw response (first 2000 chars): {}",
            resp_text.chars().take(2000).collect::<String>()
        );

        if !status.is_success() {
            let details: Value =
                serde_json::from_str(&resp_text).unwrap_or(Value::String(resp_text));
            let message = upstream_message(&details);
            tracing::warn!("OpenAI returned {}: {}", status, message);
            return Err(EngineError::Upstream {
                status: status.as_u16(),
                message,
                details,
            });
        }

        serde_json::from_str(&resp_text).map_err(|e| EngineError::Decode(e.to_string()))
    }
}

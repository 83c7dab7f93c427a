//! Mock LLM Provider: deterministic responses for running without an API key.

use crate::api_types::{InputMessage, ResponsesResponse};
use crate::error::EngineError;
use crate::llm::{CompletionParams, LlmClient};

#[derive(Debug, Clone)]
pub struct MockProvider {
    model: String,
}

impl MockProvider {
    pub fn new(model: &str) -> Self {
        Self {
            model: model.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl LlmClient for MockProvider {
    async fn complete(
        &self,
        _system: &str,
        _input: Vec<InputMessage>,
        _params: CompletionParams,
    ) -> Result<ResponsesResponse, EngineError> {
        tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;
        Ok(ResponsesResponse::from_text(format!(
            "(Mock {} Response) Observation: I received your prompt.",
            self.model
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_complete() {
        let provider = MockProvider::new("test-model");
        let resp = provider
            .complete("system", vec![], CompletionParams::default())
            .await
            .unwrap();
        let text = resp.first_text().unwrap();
        assert!(text.contains("Mock"));
        assert!(text.contains("test-model"));
    }
}

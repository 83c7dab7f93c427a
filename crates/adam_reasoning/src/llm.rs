use crate::api_types::{InputMessage, ResponsesResponse};
use crate::error::EngineError;
use async_trait::async_trait;

/// Optional sampling parameters; unset fields are left to the provider default.
#[derive(Debug, Clone, Default)]
pub struct CompletionParams {
    pub max_output_tokens: Option<u32>,
    pub temperature: Option<f32>,
}

/// The external completion gateway.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send one synchronous completion request: a system instruction plus the
    /// conversation input.
    async fn complete(
        &self,
        system: &str,
        input: Vec<InputMessage>,
        params: CompletionParams,
    ) -> Result<ResponsesResponse, EngineError>;
}

pub mod api_types;
pub mod creator;
pub mod engine;
pub mod error;
pub mod llm;
pub mod phrases;
pub mod prompts;
pub mod proof;
pub mod providers;
pub mod shipping;

pub use engine::{DialogueEngine, Reply, Route, NO_TEXT_PLACEHOLDER};
pub use error::EngineError;
pub use llm::{CompletionParams, LlmClient};
pub use proof::{KeywordProofMatcher, ProofMatcher, ProofOutcome};

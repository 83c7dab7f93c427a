use serde_json::Value;

/// Failures that abort a dialogue turn.
///
/// Dialogue ambiguity never lands here; only the completion gateway can fail.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The completion service answered with a non-success status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Value,
    },
    #[error("completion request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("invalid completion response: {0}")]
    Decode(String),
}

impl EngineError {
    /// HTTP status the gateway should surface for this error.
    pub fn status(&self) -> u16 {
        match self {
            EngineError::Upstream { status, .. } => *status,
            EngineError::Transport(_) | EngineError::Decode(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_status_and_message() {
        let err = EngineError::Upstream {
            status: 429,
            message: "Rate limit reached".into(),
            details: serde_json::json!({"error": {"message": "Rate limit reached"}}),
        };
        assert_eq!(err.status(), 429);
        assert_eq!(err.to_string(), "Rate limit reached");
    }

    #[test]
    fn test_decode_is_internal() {
        let err = EngineError::Decode("bad json".into());
        assert_eq!(err.status(), 500);
        assert!(err.to_string().contains("bad json"));
    }
}

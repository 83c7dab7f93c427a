use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputMessage {
    pub role: Role,
    pub content: String,
}

impl InputMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

// Request payload
#[derive(Debug, Serialize)]
pub struct ResponsesRequest {
    pub model: String,
    pub input: Vec<InputMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

// Response payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponsesResponse {
    #[serde(default)]
    pub output: Vec<OutputItem>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputItem {
    #[serde(rename = "type", default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputContent {
    #[serde(rename = "type", default)]
    pub content_type: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl ResponsesResponse {
    /// Single text reply, as the mock provider and tests build it.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            output: vec![OutputItem {
                item_type: Some("message".into()),
                content: vec![OutputContent {
                    content_type: Some("output_text".into()),
                    text: Some(text.into()),
                }],
            }],
        }
    }

    /// Text of the first content part of the first output item, if non-empty.
    /// Later items are not searched.
    pub fn first_text(&self) -> Option<&str> {
        self.output
            .first()?
            .content
            .first()?
            .text
            .as_deref()
            .filter(|t| !t.is_empty())
    }
}

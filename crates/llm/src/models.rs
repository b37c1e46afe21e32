use nova_core::{ImageBlock, NovaError, Result};
use serde::{Deserialize, Serialize};

pub const SCHEMA_VERSION: &str = "messages-v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentBlock {
    Image(ImageBlock),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    pub fn user(content: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            content,
        }
    }

    /// A user turn with one image followed by a text prompt.
    pub fn user_with_image(image: ImageBlock, prompt: impl Into<String>) -> Self {
        Self::user(vec![
            ContentBlock::Image(image),
            ContentBlock::Text(prompt.into()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemText {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InferenceConfig {
    pub max_tokens: u32,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

impl InferenceConfig {
    pub fn new(max_tokens: u32, temperature: f32) -> Self {
        Self {
            max_tokens,
            temperature,
            top_p: None,
            top_k: None,
        }
    }
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self::new(512, 0.7)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub schema_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<Vec<SystemText>>,
    pub messages: Vec<Message>,
    pub inference_config: InferenceConfig,
}

impl ChatRequest {
    pub fn new(messages: Vec<Message>, inference_config: InferenceConfig) -> Result<Self> {
        if messages.is_empty() {
            return Err(NovaError::InvalidInput(
                "chat request needs at least one message".to_string(),
            ));
        }
        if inference_config.max_tokens == 0 {
            return Err(NovaError::InvalidInput(
                "maxTokens must be greater than zero".to_string(),
            ));
        }
        Ok(Self {
            schema_version: SCHEMA_VERSION.to_string(),
            system: None,
            messages,
            inference_config,
        })
    }

    pub fn with_system(mut self, text: impl Into<String>) -> Self {
        self.system
            .get_or_insert_with(Vec::new)
            .push(SystemText { text: text.into() });
        self
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| NovaError::InvalidInput(format!("failed to serialize request: {}", e)))
    }
}

/// Response content block. Only text blocks are projected; other block
/// kinds deserialize with `text: None`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputContent {
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct OutputMessage {
    pub role: Option<Role>,
    pub content: Vec<OutputContent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatOutput {
    pub message: OutputMessage,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponseBody {
    pub output: ChatOutput,
    #[serde(default)]
    pub stop_reason: Option<String>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

impl ChatResponseBody {
    /// `output.message.content[0].text`
    pub fn first_text(&self) -> Option<&str> {
        self.output
            .message
            .content
            .first()
            .and_then(|block| block.text.as_deref())
    }
}

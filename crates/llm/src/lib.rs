pub mod bedrock;
pub mod models;
pub mod tier;

pub use bedrock::{ChatModelConfig, ChatOutcome, NovaChatClient};
pub use models::{
    ChatRequest, ChatResponseBody, ContentBlock, InferenceConfig, Message, Role, SystemText, Usage,
};
pub use tier::{TierCheck, TierReport, UNKNOWN_TIER};

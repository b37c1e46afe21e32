pub mod bedrock_nova;
pub mod request;
pub mod response;

pub use bedrock_nova::{NovaEmbeddingClient, NovaEmbeddingConfig};
pub use request::{
    EmbeddingPayload, EmbeddingPurpose, EmbeddingRequest, TaskType, TextInput, TruncationMode,
    SUPPORTED_DIMENSIONS,
};
pub use response::{extract_embedding, EmbeddingResponse, EmbeddingResult};

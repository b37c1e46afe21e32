pub mod bedrock;
pub mod config;
pub mod error;
pub mod image;
pub mod mock;
pub mod tier;
pub mod transport;

pub use bedrock::BedrockInvoker;
pub use config::{Config, EmbeddingSettings, FlexSettings, UnderstandingSettings};
pub use error::{ErrorCategory, NovaError, Result};
pub use image::{ImageBlock, ImageFormat, ImageSource};
pub use mock::MockInvoker;
pub use tier::{ServiceTier, SERVICE_TIER_HEADER};
pub use transport::{InvokeRequest, InvokeResponse, ModelInvoker, TransportSettings};

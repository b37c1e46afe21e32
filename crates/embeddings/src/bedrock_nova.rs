use crate::request::{validate_dimension, EmbeddingPurpose, EmbeddingRequest, TruncationMode};
use crate::response::{extract_embedding, EmbeddingResult};
use nova_core::{
    EmbeddingSettings, ImageBlock, InvokeRequest, ModelInvoker, NovaError, Result,
};
use tracing::{error, info, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct NovaEmbeddingConfig {
    pub model_id: String,
    pub dimension: u32,
    pub purpose: EmbeddingPurpose,
    pub truncation_mode: TruncationMode,
}

impl Default for NovaEmbeddingConfig {
    fn default() -> Self {
        Self {
            model_id: "amazon.nova-2-multimodal-embeddings-v1:0".to_string(),
            dimension: 1024,
            purpose: EmbeddingPurpose::GenericIndex,
            truncation_mode: TruncationMode::End,
        }
    }
}

impl NovaEmbeddingConfig {
    pub fn from_settings(settings: &EmbeddingSettings) -> Result<Self> {
        Ok(Self {
            model_id: settings.model_id.clone(),
            dimension: settings.dimension,
            purpose: settings.purpose.parse()?,
            truncation_mode: settings.truncation_mode.parse()?,
        })
    }
}

pub struct NovaEmbeddingClient {
    config: NovaEmbeddingConfig,
    invoker: Box<dyn ModelInvoker>,
}

impl NovaEmbeddingClient {
    pub fn new(config: NovaEmbeddingConfig, invoker: Box<dyn ModelInvoker>) -> Result<Self> {
        Self::validate_config(&config)?;
        Ok(Self { config, invoker })
    }

    fn validate_config(config: &NovaEmbeddingConfig) -> Result<()> {
        if config.model_id.is_empty() {
            let message = "Model ID cannot be empty";
            error!(message);
            return Err(NovaError::Config(message.to_string()));
        }
        validate_dimension(config.dimension)?;

        if !config.model_id.contains("nova") || !config.model_id.contains("embed") {
            warn!(
                "Model ID '{}' may not be a Nova embedding model",
                config.model_id
            );
        }
        Ok(())
    }

    pub async fn embed_text(&self, text: &str) -> Result<EmbeddingResult> {
        let request = EmbeddingRequest::text(
            self.config.purpose,
            self.config.dimension,
            self.config.truncation_mode,
            text,
        )?;
        self.embed(&request).await
    }

    pub async fn embed_image(&self, image: ImageBlock) -> Result<EmbeddingResult> {
        let request =
            EmbeddingRequest::image(self.config.purpose, self.config.dimension, image)?;
        self.embed(&request).await
    }

    pub async fn embed(&self, request: &EmbeddingRequest) -> Result<EmbeddingResult> {
        let body = request.to_body()?;
        info!(
            "Requesting {}-dimension embedding from {}",
            self.config.dimension, self.config.model_id
        );
        let response = self
            .invoker
            .invoke(InvokeRequest::new(&self.config.model_id, body))
            .await?;
        extract_embedding(&response.body)
    }
}

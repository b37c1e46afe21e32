use crate::image::ImageFormat;
use crate::tier::ServiceTier;
use crate::transport::TransportSettings;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEFAULT_IMAGE_PATH: &str = "images/test1.png";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub embedding: EmbeddingSettings,
    #[serde(default)]
    pub flex: FlexSettings,
    #[serde(default)]
    pub understanding: UnderstandingSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingSettings {
    pub region: String,
    pub model_id: String,
    pub dimension: u32,
    pub purpose: String,
    pub truncation_mode: String,
    pub text_value: String,
    pub image_path: PathBuf,
    pub image_format: Option<ImageFormat>,
    pub timeout_secs: Option<u64>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            model_id: "amazon.nova-2-multimodal-embeddings-v1:0".to_string(),
            dimension: 1024,
            purpose: "GENERIC_INDEX".to_string(),
            truncation_mode: "END".to_string(),
            text_value: "Hello, World!".to_string(),
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            image_format: None,
            timeout_secs: None,
        }
    }
}

impl EmbeddingSettings {
    pub fn transport(&self) -> TransportSettings {
        TransportSettings {
            region: self.region.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlexSettings {
    pub region: String,
    pub model_id: String,
    pub prompt: String,
    pub image_path: PathBuf,
    pub image_format: Option<ImageFormat>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub service_tier: ServiceTier,
    pub timeout_secs: Option<u64>,
}

impl Default for FlexSettings {
    fn default() -> Self {
        Self {
            region: "us-west-2".to_string(),
            model_id: "global.amazon.nova-2-lite-v1:0".to_string(),
            prompt: "Describe this image in detail.".to_string(),
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            image_format: None,
            max_tokens: 512,
            temperature: 0.7,
            service_tier: ServiceTier::Flex,
            timeout_secs: None,
        }
    }
}

impl FlexSettings {
    pub fn transport(&self) -> TransportSettings {
        TransportSettings {
            region: self.region.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnderstandingSettings {
    pub region: String,
    pub model_id: String,
    pub system_prompt: String,
    pub prompt: String,
    pub image_path: PathBuf,
    pub image_format: Option<ImageFormat>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: Option<f32>,
    pub top_k: Option<u32>,
    pub timeout_secs: Option<u64>,
}

impl Default for UnderstandingSettings {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            model_id: "us.amazon.nova-lite-v1:0".to_string(),
            system_prompt: "You are an expert artist. When the user provides you with an image, provide 3 potential art titles".to_string(),
            prompt: "Provide art titles for this image.".to_string(),
            image_path: PathBuf::from(DEFAULT_IMAGE_PATH),
            image_format: None,
            max_tokens: 300,
            temperature: 0.3,
            top_p: Some(0.1),
            top_k: Some(20),
            timeout_secs: None,
        }
    }
}

impl UnderstandingSettings {
    pub fn transport(&self) -> TransportSettings {
        TransportSettings {
            region: self.region.clone(),
            timeout_secs: self.timeout_secs,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn load_from_env() -> anyhow::Result<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| Self::default_config_path());
        Self::load(Path::new(&config_path))
    }

    /// Loads from `CONFIG_PATH` (or the default path) and falls back to the
    /// built-in defaults when no usable file is found. Env overrides apply
    /// in both cases.
    pub fn load_or_default() -> Self {
        Self::load_from_env()
            .unwrap_or_else(|e| {
                warn!("Could not load config ({}), using built-in defaults", e);
                Config::default()
            })
            .with_env_overrides()
    }

    pub fn default_config_path() -> String {
        "./nova.toml".to_string()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(model_id) = env::var("NOVA_EMBEDDING_MODEL_ID") {
            self.embedding.model_id = model_id;
        }
        if let Ok(region) = env::var("NOVA_EMBEDDING_REGION") {
            self.embedding.region = region;
        }
        if let Ok(model_id) = env::var("NOVA_FLEX_MODEL_ID") {
            self.flex.model_id = model_id;
        }
        if let Ok(region) = env::var("NOVA_FLEX_REGION") {
            self.flex.region = region;
        }
        if let Ok(image_path) = env::var("NOVA_IMAGE_PATH") {
            let image_path = PathBuf::from(image_path);
            self.embedding.image_path = image_path.clone();
            self.flex.image_path = image_path.clone();
            self.understanding.image_path = image_path;
        }
        self
    }
}

//! Image inputs as the Nova request schemas carry them:
//! `{"format": "png", "source": {"bytes": "<base64>"}}`.

use crate::error::{NovaError, Result};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Gif,
    Webp,
}

impl ImageFormat {
    /// Infers the format from a file extension, falling back to png.
    pub fn from_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());
        match ext.as_deref() {
            Some("jpg") | Some("jpeg") => ImageFormat::Jpeg,
            Some("gif") => ImageFormat::Gif,
            Some("webp") => ImageFormat::Webp,
            _ => ImageFormat::Png,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageSource {
    pub bytes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageBlock {
    pub format: ImageFormat,
    pub source: ImageSource,
}

impl ImageBlock {
    pub fn from_bytes(format: ImageFormat, bytes: &[u8]) -> Result<Self> {
        if bytes.is_empty() {
            return Err(NovaError::InvalidInput(
                "image bytes must not be empty".to_string(),
            ));
        }
        Ok(Self {
            format,
            source: ImageSource {
                bytes: STANDARD.encode(bytes),
            },
        })
    }

    /// Reads the image at `path`. `format` overrides extension inference.
    pub fn load(path: &Path, format: Option<ImageFormat>) -> Result<Self> {
        info!("Loading image: {}", path.display());
        let bytes = std::fs::read(path).map_err(|e| NovaError::io(path, e))?;
        let format = format.unwrap_or_else(|| ImageFormat::from_path(path));
        Self::from_bytes(format, &bytes)
    }
}

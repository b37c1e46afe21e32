use nova_core::{ImageBlock, NovaError, Result};
use serde::Serialize;
use std::str::FromStr;

/// Output dimensions the Nova multimodal embeddings model accepts.
pub const SUPPORTED_DIMENSIONS: [u32; 4] = [256, 384, 1024, 3072];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskType {
    SingleEmbedding,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmbeddingPurpose {
    #[default]
    GenericIndex,
    GenericRetrieval,
    TextRetrieval,
    ImageRetrieval,
    VideoRetrieval,
    DocumentRetrieval,
    AudioRetrieval,
    Classification,
    Clustering,
}

impl FromStr for EmbeddingPurpose {
    type Err = NovaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "GENERIC_INDEX" => Ok(Self::GenericIndex),
            "GENERIC_RETRIEVAL" => Ok(Self::GenericRetrieval),
            "TEXT_RETRIEVAL" => Ok(Self::TextRetrieval),
            "IMAGE_RETRIEVAL" => Ok(Self::ImageRetrieval),
            "VIDEO_RETRIEVAL" => Ok(Self::VideoRetrieval),
            "DOCUMENT_RETRIEVAL" => Ok(Self::DocumentRetrieval),
            "AUDIO_RETRIEVAL" => Ok(Self::AudioRetrieval),
            "CLASSIFICATION" => Ok(Self::Classification),
            "CLUSTERING" => Ok(Self::Clustering),
            other => Err(NovaError::InvalidInput(format!(
                "unknown embedding purpose '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruncationMode {
    Start,
    #[default]
    End,
    None,
}

impl FromStr for TruncationMode {
    type Err = NovaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "START" => Ok(Self::Start),
            "END" => Ok(Self::End),
            "NONE" => Ok(Self::None),
            other => Err(NovaError::InvalidInput(format!(
                "unknown truncation mode '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TextInput {
    pub truncation_mode: TruncationMode,
    pub value: String,
}

/// Exactly one input per single-embedding call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingPayload {
    Text(TextInput),
    Image(ImageBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleEmbeddingParams {
    pub embedding_purpose: EmbeddingPurpose,
    pub embedding_dimension: u32,
    #[serde(flatten)]
    pub payload: EmbeddingPayload,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingRequest {
    pub task_type: TaskType,
    pub single_embedding_params: SingleEmbeddingParams,
}

impl EmbeddingRequest {
    pub fn single(
        purpose: EmbeddingPurpose,
        dimension: u32,
        payload: EmbeddingPayload,
    ) -> Result<Self> {
        validate_dimension(dimension)?;
        if let EmbeddingPayload::Text(text) = &payload {
            if text.value.is_empty() {
                return Err(NovaError::InvalidInput(
                    "text value must not be empty".to_string(),
                ));
            }
        }
        Ok(Self {
            task_type: TaskType::SingleEmbedding,
            single_embedding_params: SingleEmbeddingParams {
                embedding_purpose: purpose,
                embedding_dimension: dimension,
                payload,
            },
        })
    }

    pub fn text(
        purpose: EmbeddingPurpose,
        dimension: u32,
        truncation_mode: TruncationMode,
        value: impl Into<String>,
    ) -> Result<Self> {
        Self::single(
            purpose,
            dimension,
            EmbeddingPayload::Text(TextInput {
                truncation_mode,
                value: value.into(),
            }),
        )
    }

    pub fn image(purpose: EmbeddingPurpose, dimension: u32, image: ImageBlock) -> Result<Self> {
        Self::single(purpose, dimension, EmbeddingPayload::Image(image))
    }

    pub fn to_body(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self)
            .map_err(|e| NovaError::InvalidInput(format!("failed to serialize request: {}", e)))
    }
}

pub fn validate_dimension(dimension: u32) -> Result<()> {
    if SUPPORTED_DIMENSIONS.contains(&dimension) {
        Ok(())
    } else {
        Err(NovaError::InvalidInput(format!(
            "embedding dimension {} is not one of {:?}",
            dimension, SUPPORTED_DIMENSIONS
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use nova_core::ImageFormat;
    use serde_json::{json, Value};

    #[test]
    fn should_serialize_text_request_schema() {
        let request = EmbeddingRequest::text(
            EmbeddingPurpose::GenericIndex,
            1024,
            TruncationMode::End,
            "Hello, World!",
        )
        .unwrap();

        let json: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();
        assert_eq!(
            json,
            json!({
                "taskType": "SINGLE_EMBEDDING",
                "singleEmbeddingParams": {
                    "embeddingPurpose": "GENERIC_INDEX",
                    "embeddingDimension": 1024,
                    "text": {"truncationMode": "END", "value": "Hello, World!"}
                }
            })
        );
    }

    #[test]
    fn should_keep_text_value_verbatim() {
        for value in ["a", "  spaced  ", "多语言 文本", "line\nbreak \"quoted\""] {
            let request = EmbeddingRequest::text(
                EmbeddingPurpose::TextRetrieval,
                256,
                TruncationMode::Start,
                value,
            )
            .unwrap();
            let json: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();
            assert_eq!(json["taskType"], "SINGLE_EMBEDDING");
            assert_eq!(json["singleEmbeddingParams"]["text"]["value"], value);
            assert!(json["singleEmbeddingParams"].get("image").is_none());
        }
    }

    #[test]
    fn should_serialize_image_request_schema() {
        let bytes = vec![0x89, 0x50, 0x4E, 0x47, 0x00, 0xFF];
        let image = ImageBlock::from_bytes(ImageFormat::Png, &bytes).unwrap();
        let request =
            EmbeddingRequest::image(EmbeddingPurpose::GenericIndex, 1024, image).unwrap();

        let json: Value = serde_json::from_slice(&request.to_body().unwrap()).unwrap();
        let params = &json["singleEmbeddingParams"];
        assert_eq!(params["image"]["format"], "png");
        assert!(params.get("text").is_none());

        let encoded = params["image"]["source"]["bytes"].as_str().unwrap();
        assert_eq!(STANDARD.decode(encoded).unwrap(), bytes);
    }

    #[test]
    fn should_emit_fields_in_wire_order() {
        let request = EmbeddingRequest::text(
            EmbeddingPurpose::GenericIndex,
            1024,
            TruncationMode::End,
            "x",
        )
        .unwrap();
        let body = String::from_utf8(request.to_body().unwrap()).unwrap();
        assert_eq!(
            body,
            r#"{"taskType":"SINGLE_EMBEDDING","singleEmbeddingParams":{"embeddingPurpose":"GENERIC_INDEX","embeddingDimension":1024,"text":{"truncationMode":"END","value":"x"}}}"#
        );
    }

    #[test]
    fn should_reject_unsupported_dimension() {
        let result = EmbeddingRequest::text(
            EmbeddingPurpose::GenericIndex,
            1000,
            TruncationMode::End,
            "x",
        );
        assert!(matches!(result, Err(NovaError::InvalidInput(_))));
    }

    #[test]
    fn should_reject_empty_text() {
        let result =
            EmbeddingRequest::text(EmbeddingPurpose::GenericIndex, 1024, TruncationMode::End, "");
        assert!(matches!(result, Err(NovaError::InvalidInput(_))));
    }

    #[test]
    fn should_parse_config_strings() {
        assert_eq!(
            "DOCUMENT_RETRIEVAL".parse::<EmbeddingPurpose>().unwrap(),
            EmbeddingPurpose::DocumentRetrieval
        );
        assert_eq!("NONE".parse::<TruncationMode>().unwrap(), TruncationMode::None);
        assert!("generic_index".parse::<EmbeddingPurpose>().is_err());
    }
}

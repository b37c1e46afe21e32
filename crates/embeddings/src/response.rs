use nova_core::{NovaError, Result};
use serde::Deserialize;
use tracing::error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EmbeddingResponse {
    pub embeddings: Vec<EmbeddingResult>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmbeddingResult {
    pub embedding: Vec<f64>,
    pub embedding_type: String,
}

impl EmbeddingResult {
    pub fn dimension(&self) -> usize {
        self.embedding.len()
    }
}

impl EmbeddingResponse {
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        serde_json::from_slice(body).map_err(|e| {
            if let Ok(s) = std::str::from_utf8(body) {
                error!("Failed to parse embedding response JSON: {} | Raw: {}", e, s);
            }
            NovaError::MalformedResponse(e.to_string())
        })
    }

    pub fn first(&self) -> Result<&EmbeddingResult> {
        self.embeddings.first().ok_or_else(|| {
            NovaError::MalformedResponse("response contains no embeddings".to_string())
        })
    }
}

/// Projects `embeddings[0]` out of a raw response body.
pub fn extract_embedding(body: &[u8]) -> Result<EmbeddingResult> {
    let response = EmbeddingResponse::from_slice(body)?;
    response.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: serde_json::Value) -> Vec<u8> {
        value.to_string().into_bytes()
    }

    #[test]
    fn should_extract_full_length_vector() {
        let vector: Vec<f64> = (0..1024).map(|i| i as f64 / 1024.0).collect();
        let raw = body(json!({
            "embeddings": [{"embedding": vector, "embeddingType": "TEXT"}]
        }));

        let result = extract_embedding(&raw).unwrap();
        assert_eq!(result.dimension(), 1024);
        assert_eq!(result.embedding[1], 1.0 / 1024.0);
        assert!(!result.embedding_type.is_empty());
    }

    #[test]
    fn should_take_first_of_several_embeddings() {
        let raw = body(json!({
            "embeddings": [
                {"embedding": [0.5], "embeddingType": "IMAGE"},
                {"embedding": [0.25], "embeddingType": "TEXT"}
            ]
        }));

        let result = extract_embedding(&raw).unwrap();
        assert_eq!(result.embedding, vec![0.5]);
        assert_eq!(result.embedding_type, "IMAGE");
    }

    #[test]
    fn should_fail_on_empty_embeddings() {
        let raw = body(json!({"embeddings": []}));
        let err = extract_embedding(&raw).unwrap_err();
        assert!(matches!(err, NovaError::MalformedResponse(_)));
    }

    #[test]
    fn should_fail_on_missing_embeddings() {
        let raw = body(json!({"output": {}}));
        assert!(matches!(
            extract_embedding(&raw),
            Err(NovaError::MalformedResponse(_))
        ));
    }

    #[test]
    fn should_fail_on_mistyped_fields() {
        let raw = body(json!({
            "embeddings": [{"embedding": "not-a-vector", "embeddingType": "TEXT"}]
        }));
        assert!(matches!(
            extract_embedding(&raw),
            Err(NovaError::MalformedResponse(_))
        ));

        let raw = body(json!({"embeddings": [{"embedding": [0.1]}]}));
        assert!(matches!(
            extract_embedding(&raw),
            Err(NovaError::MalformedResponse(_))
        ));
    }

    #[test]
    fn should_fail_on_non_json_body() {
        assert!(matches!(
            extract_embedding(b"<html>502</html>"),
            Err(NovaError::MalformedResponse(_))
        ));
    }
}

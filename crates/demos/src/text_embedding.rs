use crate::presenter;
use embeddings::{EmbeddingResult, NovaEmbeddingClient, NovaEmbeddingConfig};
use nova_core::{EmbeddingSettings, ModelInvoker, Result};
use std::io::Write;

/// Embeds `settings.text_value` and prints the result.
pub async fn run(
    settings: &EmbeddingSettings,
    invoker: Box<dyn ModelInvoker>,
    out: &mut dyn Write,
) -> Result<EmbeddingResult> {
    let config = NovaEmbeddingConfig::from_settings(settings)?;
    let client = NovaEmbeddingClient::new(config, invoker)?;

    writeln!(out, "Calling Nova Multimodal Embeddings model...")?;
    let result = client.embed_text(&settings.text_value).await?;

    presenter::render_embedding(out, "text", &result)?;
    Ok(result)
}

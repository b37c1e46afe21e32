use crate::presenter;
use embeddings::{EmbeddingResult, NovaEmbeddingClient, NovaEmbeddingConfig};
use nova_core::{EmbeddingSettings, ImageBlock, ModelInvoker, Result};
use std::io::Write;

/// Embeds the image at `settings.image_path` and prints the result.
pub async fn run(
    settings: &EmbeddingSettings,
    invoker: Box<dyn ModelInvoker>,
    out: &mut dyn Write,
) -> Result<EmbeddingResult> {
    let config = NovaEmbeddingConfig::from_settings(settings)?;
    let client = NovaEmbeddingClient::new(config, invoker)?;

    writeln!(out, "Loading image: {}", settings.image_path.display())?;
    let image = ImageBlock::load(&settings.image_path, settings.image_format)?;

    writeln!(out, "Calling Nova Multimodal Embeddings model...")?;
    let result = client.embed_image(image).await?;

    presenter::render_embedding(out, "image", &result)?;
    Ok(result)
}

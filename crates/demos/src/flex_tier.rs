use crate::presenter;
use llm::{ChatModelConfig, ChatOutcome, ChatRequest, Message, NovaChatClient};
use nova_core::{FlexSettings, ImageBlock, ModelInvoker, Result};
use std::io::Write;

/// Sends an image plus prompt on the requested service tier, then prints
/// the full response and whether the service honored the tier.
pub async fn run(
    settings: &FlexSettings,
    invoker: Box<dyn ModelInvoker>,
    out: &mut dyn Write,
) -> Result<ChatOutcome> {
    let config = ChatModelConfig::from(settings);
    let client = NovaChatClient::new(config.clone(), invoker)?;

    presenter::render_banner(
        out,
        &format!("Image inference on the {} tier", settings.service_tier),
    )?;
    let image = ImageBlock::load(&settings.image_path, settings.image_format)?;
    writeln!(out, "Image: {}\n", settings.image_path.display())?;

    let request = ChatRequest::new(
        vec![Message::user_with_image(image, settings.prompt.as_str())],
        config.inference,
    )?;
    let outcome = client.invoke(&request).await?;

    presenter::render_chat_outcome(out, &outcome)?;
    Ok(outcome)
}

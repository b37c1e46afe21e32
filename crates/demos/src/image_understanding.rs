use crate::presenter;
use llm::{ChatModelConfig, ChatOutcome, ChatRequest, Message, NovaChatClient};
use nova_core::{ImageBlock, ModelInvoker, Result, UnderstandingSettings};
use std::io::Write;

pub async fn run(
    settings: &UnderstandingSettings,
    invoker: Box<dyn ModelInvoker>,
    out: &mut dyn Write,
) -> Result<ChatOutcome> {
    let config = ChatModelConfig::from(settings);
    let client = NovaChatClient::new(config.clone(), invoker)?;

    let image = ImageBlock::load(&settings.image_path, settings.image_format)?;
    let mut request = ChatRequest::new(
        vec![Message::user_with_image(image, settings.prompt.as_str())],
        config.inference,
    )?;
    if !settings.system_prompt.is_empty() {
        request = request.with_system(settings.system_prompt.as_str());
    }

    let outcome = client.invoke(&request).await?;
    presenter::render_understanding(out, &outcome)?;
    Ok(outcome)
}

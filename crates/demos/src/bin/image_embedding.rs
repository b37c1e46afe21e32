use demos::diagnostics::{self, HintContext};
use demos::{image_embedding, init_tracing};
use nova_core::{BedrockInvoker, Config};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let config = Config::load_or_default();
    let settings = &config.embedding;

    let result: nova_core::Result<_> = async {
        let invoker = BedrockInvoker::connect(&settings.transport()).await?;
        image_embedding::run(settings, Box::new(invoker), &mut std::io::stdout()).await
    }
    .await;

    if let Err(e) = result {
        error!("Image embedding demo failed: {}", e);
        let _ = diagnostics::report(
            &mut std::io::stderr(),
            &e,
            &HintContext::for_image_embedding(settings),
        );
        std::process::exit(1);
    }
}

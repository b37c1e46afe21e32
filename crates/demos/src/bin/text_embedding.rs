use demos::diagnostics::{self, HintContext};
use demos::{init_tracing, text_embedding};
use nova_core::{BedrockInvoker, Config};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let config = Config::load_or_default();
    let settings = &config.embedding;

    let result: nova_core::Result<_> = async {
        let invoker = BedrockInvoker::connect(&settings.transport()).await?;
        text_embedding::run(settings, Box::new(invoker), &mut std::io::stdout()).await
    }
    .await;

    if let Err(e) = result {
        error!("Text embedding demo failed: {}", e);
        let _ = diagnostics::report(
            &mut std::io::stderr(),
            &e,
            &HintContext::for_text_embedding(settings),
        );
        std::process::exit(1);
    }
}

use demos::diagnostics::{self, HintContext};
use demos::{flex_tier, init_tracing};
use nova_core::{BedrockInvoker, Config};
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    init_tracing();

    let config = Config::load_or_default();
    let settings = &config.flex;

    let result: nova_core::Result<_> = async {
        let invoker = BedrockInvoker::connect(&settings.transport()).await?;
        flex_tier::run(settings, Box::new(invoker), &mut std::io::stdout()).await
    }
    .await;

    if let Err(e) = result {
        error!("Flex tier demo failed: {}", e);
        let _ = diagnostics::report(&mut std::io::stderr(), &e, &HintContext::for_flex(settings));
        std::process::exit(1);
    }
}

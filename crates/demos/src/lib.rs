pub mod diagnostics;
pub mod flex_tier;
pub mod image_embedding;
pub mod image_understanding;
pub mod presenter;
pub mod text_embedding;

use tracing_subscriber::EnvFilter;

/// Logs go to stderr so stdout carries only the presented result.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

use anyhow::{Context, Result};
use bandscope_core::LogConfig;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    fmt,
    layer::SubscriberExt,
    util::SubscriberInitExt,
    Layer,
};

/// Initialize the logging system
pub fn init(config: &LogConfig) -> Result<()> {
    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.parse_level()).into())
        .from_env_lossy();

    let console_layer = config.console_output.then(|| {
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_target(false)
            .with_thread_names(true)
            .with_filter(filter)
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!("Logging initialized at level: {}", config.level);
    Ok(())
}

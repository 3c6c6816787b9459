//! Logging setup for the `explainer` binary

use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "EXPLAINER_LOG";

/// Installs a stderr subscriber. `EXPLAINER_LOG` takes precedence over
/// `default_filter`.
pub fn init(default_filter: &str) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(env_filter);

    tracing_subscriber::registry().with(console_layer).try_init()?;

    Ok(())
}

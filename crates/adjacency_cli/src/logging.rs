//! Console logging setup.

use anyhow::{anyhow, Context, Result};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `base_level`.
pub fn setup_logging(base_level: &str) -> Result<()> {
	let env_filter = EnvFilter::try_from_default_env()
		.or_else(|_| EnvFilter::try_new(base_level))
		.with_context(|| format!("Invalid log filter: {base_level}"))?;

	let console_layer = fmt::layer()
		.with_target(false)
		.with_writer(std::io::stderr);

	tracing_subscriber::registry()
		.with(env_filter)
		.with(console_layer)
		.try_init()
		.map_err(|e| anyhow!("Logger initialization failed: {e}"))
}

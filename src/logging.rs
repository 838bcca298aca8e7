//! Logging setup
//!
//! Every crate logs through `tracing`. Binaries call [`init`] once at
//! startup to print events to stderr.

use tracing_subscriber::EnvFilter;

/// Install the global `fmt` subscriber
///
/// `RUST_LOG` wins when set; otherwise `level` (e.g. the configured
/// `LOG_LEVEL`) is used as the filter. Returns `false` when a subscriber was
/// already installed.
pub fn init(level: &str) -> bool {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(level));
	let installed = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(true)
		.try_init()
		.is_ok();
	if installed {
		tracing::debug!(level = %level, "logging initialized");
	}
	installed
}

/// [`init`] with the configured `LOG_LEVEL`
#[cfg(feature = "conf")]
pub fn init_from(settings: &hrdesk_conf::Settings) -> bool {
	init(&settings.log_level)
}

fn default_filter(level: &str) -> EnvFilter {
	EnvFilter::try_new(level).unwrap_or_else(|e| {
		eprintln!("invalid log level '{}' ({}), falling back to info", level, e);
		EnvFilter::new("info")
	})
}

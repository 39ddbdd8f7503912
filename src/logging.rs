//! Subscriber installation for binaries and tests.
//!
//! Library code only emits `tracing` events; nothing is printed until the
//! host installs a subscriber.

use reinhardt_pagebuilder_conf::Settings;
use tracing_subscriber::EnvFilter;

/// Filter used when `log_filter` does not parse.
const FALLBACK_FILTER: &str = "info";

/// Installs a global `fmt` subscriber filtered by [`Settings::log_filter`].
///
/// Returns `false` when a global subscriber is already installed, so calling
/// it more than once is harmless.
pub fn init_tracing(settings: &Settings) -> bool {
	let (filter, rejected) = match EnvFilter::try_new(&settings.log_filter) {
		Ok(filter) => (filter, None),
		Err(error) => (EnvFilter::new(FALLBACK_FILTER), Some(error)),
	};

	let installed = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.try_init()
		.is_ok();

	if let Some(error) = rejected {
		tracing::warn!(
			filter = %settings.log_filter,
			%error,
			fallback = FALLBACK_FILTER,
			"invalid log filter"
		);
	}
	installed
}

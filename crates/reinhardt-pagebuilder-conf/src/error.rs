//! Error types for settings loading.

use thiserror::Error;

/// Result type for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;

/// Errors raised while loading or validating [`Settings`](crate::Settings).
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum SettingsError {
	/// Reading a settings file failed.
	#[error("IO error reading {path}: {source}")]
	Io {
		/// File that could not be read.
		path: String,
		/// Underlying error.
		#[source]
		source: std::io::Error,
	},

	/// A TOML settings file could not be parsed.
	#[error("TOML error in {path}: {source}")]
	Toml {
		/// File that failed to parse.
		path: String,
		/// Underlying error.
		#[source]
		source: toml::de::Error,
	},

	/// A single setting had a value of the wrong shape.
	#[error("invalid value for setting '{key}': {reason}")]
	InvalidValue {
		/// Setting name (e.g. `PAGEBUILDER_MAX_RENDER_DEPTH` or `max_render_depth`).
		key: String,
		/// Why the value was rejected.
		reason: String,
	},

	/// The merged settings could not be deserialized.
	#[error("settings could not be deserialized: {0}")]
	Deserialize(#[from] serde_json::Error),
}

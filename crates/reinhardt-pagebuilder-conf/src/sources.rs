//! Configuration sources for layered settings.
//!
//! Sources are merged in priority order (memory overrides > environment >
//! TOML file > defaults). Each source yields a flat map of setting name to
//! JSON value; the merged map is deserialized into
//! [`Settings`](crate::Settings).

use crate::error::{SettingsError, SettingsResult};
use crate::settings::Environment;
use indexmap::IndexMap;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Default environment variable prefix.
pub const ENV_PREFIX: &str = "PAGEBUILDER_";

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Loads the values provided by this source.
	fn load(&self) -> SettingsResult<IndexMap<String, Value>>;

	/// Priority of this source (higher wins).
	fn priority(&self) -> u8;

	/// Human-readable description, for logs.
	fn description(&self) -> String;
}

/// In-memory overrides, mostly useful in tests and embedding applications.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
	values: IndexMap<String, Value>,
}

impl MemorySource {
	/// Creates an empty source.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets a value.
	pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.values.insert(key.into(), value.into());
		self
	}
}

impl ConfigSource for MemorySource {
	fn load(&self) -> SettingsResult<IndexMap<String, Value>> {
		Ok(self.values.clone())
	}

	fn priority(&self) -> u8 {
		150
	}

	fn description(&self) -> String {
		"memory overrides".to_string()
	}
}

/// TOML settings file.
///
/// Keys are read from the top level of the document, or from a
/// `[pagebuilder]` table when one is present.
#[derive(Debug, Clone)]
pub struct TomlFileSource {
	path: PathBuf,
	required: bool,
}

impl TomlFileSource {
	/// Creates a source for a file that must exist.
	pub fn new(path: impl AsRef<Path>) -> Self {
		Self {
			path: path.as_ref().to_path_buf(),
			required: true,
		}
	}

	/// Allows the file to be missing, in which case the source is empty.
	pub fn optional(mut self) -> Self {
		self.required = false;
		self
	}
}

impl ConfigSource for TomlFileSource {
	fn load(&self) -> SettingsResult<IndexMap<String, Value>> {
		if !self.required && !self.path.exists() {
			tracing::debug!(path = %self.path.display(), "optional settings file not found");
			return Ok(IndexMap::new());
		}

		let display = self.path.display().to_string();
		let content = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
			path: display.clone(),
			source,
		})?;
		let mut table: toml::Table =
			toml::from_str(&content).map_err(|source| SettingsError::Toml {
				path: display.clone(),
				source,
			})?;

		if let Some(toml::Value::Table(section)) = table.remove("pagebuilder") {
			table = section;
		}

		let mut values = IndexMap::with_capacity(table.len());
		for (key, value) in table {
			let json = serde_json::to_value(value)?;
			values.insert(key, json);
		}
		Ok(values)
	}

	fn priority(&self) -> u8 {
		50
	}

	fn description(&self) -> String {
		format!("TOML file: {}", self.path.display())
	}
}

/// `PAGEBUILDER_*` environment variables.
///
/// Values are parsed according to the setting they target, so a malformed
/// variable is reported with its full name instead of a generic
/// deserialization error. List settings are comma-separated.
#[derive(Debug, Clone)]
pub struct EnvSource {
	prefix: String,
}

impl EnvSource {
	/// Creates a source using [`ENV_PREFIX`].
	pub fn new() -> Self {
		Self {
			prefix: ENV_PREFIX.to_string(),
		}
	}

	/// Uses a custom prefix.
	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	/// Parses an explicit list of variables instead of the process environment.
	pub fn load_from<I, K, V>(&self, vars: I) -> SettingsResult<IndexMap<String, Value>>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut values = IndexMap::new();
		for (name, raw) in vars {
			let name = name.as_ref();
			let Some(suffix) = name.strip_prefix(&self.prefix) else {
				continue;
			};
			let key = suffix.to_ascii_lowercase();
			let raw = raw.as_ref();
			let invalid = |reason: String| SettingsError::InvalidValue {
				key: name.to_string(),
				reason,
			};

			let value = match key.as_str() {
				"environment" => {
					let env: Environment = raw.parse().map_err(invalid)?;
					Value::String(env.as_str().to_string())
				}
				"validate_in_dev" => Value::Bool(parse_bool(raw).map_err(invalid)?),
				"max_render_depth" => {
					let depth: usize = raw
						.trim()
						.parse()
						.map_err(|e| invalid(format!("expected a positive integer: {}", e)))?;
					Value::from(depth)
				}
				"default_locale" | "log_filter" => Value::String(raw.trim().to_string()),
				"color_hints" | "url_hints" | "textarea_hints" => Value::Array(
					parse_list(raw)
						.into_iter()
						.map(Value::String)
						.collect(),
				),
				_ => {
					tracing::debug!(variable = %name, "ignoring unknown page builder variable");
					continue;
				}
			};
			values.insert(key, value);
		}
		Ok(values)
	}
}

impl Default for EnvSource {
	fn default() -> Self {
		Self::new()
	}
}

impl ConfigSource for EnvSource {
	fn load(&self) -> SettingsResult<IndexMap<String, Value>> {
		self.load_from(std::env::vars())
	}

	fn priority(&self) -> u8 {
		100
	}

	fn description(&self) -> String {
		format!("environment variables ({}*)", self.prefix)
	}
}

/// Parses common boolean spellings.
pub fn parse_bool(raw: &str) -> Result<bool, String> {
	match raw.trim().to_ascii_lowercase().as_str() {
		"true" | "1" | "yes" | "on" => Ok(true),
		"false" | "0" | "no" | "off" => Ok(false),
		other => Err(format!("expected a boolean, got '{}'", other)),
	}
}

/// Splits a comma-separated list, dropping empty items.
pub fn parse_list(raw: &str) -> Vec<String> {
	raw.split(',')
		.map(str::trim)
		.filter(|item| !item.is_empty())
		.map(str::to_string)
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_env_source_parses_known_keys() {
		// Arrange
		let source = EnvSource::new();
		let vars = vec![
			("PAGEBUILDER_ENVIRONMENT", "dev"),
			("PAGEBUILDER_VALIDATE_IN_DEV", "off"),
			("PAGEBUILDER_MAX_RENDER_DEPTH", "8"),
			("PAGEBUILDER_URL_HINTS", "url, target ,"),
			("PAGEBUILDER_UNRELATED", "x"),
			("HOME", "/root"),
		];

		// Act
		let values = source.load_from(vars).unwrap();

		// Assert
		assert_eq!(values["environment"], json!("development"));
		assert_eq!(values["validate_in_dev"], json!(false));
		assert_eq!(values["max_render_depth"], json!(8));
		assert_eq!(values["url_hints"], json!(["url", "target"]));
		assert_eq!(values.len(), 4);
	}

	#[rstest]
	#[case("PAGEBUILDER_MAX_RENDER_DEPTH", "deep")]
	#[case("PAGEBUILDER_VALIDATE_IN_DEV", "maybe")]
	#[case("PAGEBUILDER_ENVIRONMENT", "staging")]
	fn test_env_source_reports_variable_name(#[case] name: &str, #[case] value: &str) {
		// Arrange
		let source = EnvSource::new();

		// Act
		let err = source.load_from([(name, value)]).unwrap_err();

		// Assert
		assert!(
			err.to_string().contains(name),
			"expected error naming {name}, got: {err}"
		);
	}

	#[rstest]
	fn test_custom_prefix() {
		// Arrange
		let source = EnvSource::new().with_prefix("CMS_");

		// Act
		let values = source
			.load_from([("CMS_DEFAULT_LOCALE", " fr "), ("PAGEBUILDER_LOG_FILTER", "debug")])
			.unwrap();

		// Assert
		assert_eq!(values.len(), 1);
		assert_eq!(values["default_locale"], json!("fr"));
	}

	#[rstest]
	#[case("a,b", vec!["a", "b"])]
	#[case(" a , , b ", vec!["a", "b"])]
	#[case("", vec![])]
	fn test_parse_list(#[case] raw: &str, #[case] expected: Vec<&str>) {
		// Act & Assert
		assert_eq!(parse_list(raw), expected);
	}
}

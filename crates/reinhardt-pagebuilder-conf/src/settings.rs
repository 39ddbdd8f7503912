//! Page builder settings.

use crate::error::{SettingsError, SettingsResult};
use crate::sources::{ConfigSource, EnvSource, TomlFileSource};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Runtime environment.
///
/// Developer-only behavior (prop validation warnings) is enabled only in
/// [`Environment::Development`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
	/// Local development.
	#[serde(alias = "dev")]
	Development,
	/// Production or any viewer-facing deployment.
	#[default]
	#[serde(alias = "prod")]
	Production,
}

impl Environment {
	/// Returns `true` for [`Environment::Development`].
	pub fn is_development(&self) -> bool {
		matches!(self, Self::Development)
	}

	/// Lowercase name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Development => "development",
			Self::Production => "production",
		}
	}
}

impl fmt::Display for Environment {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Environment {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"development" | "dev" => Ok(Self::Development),
			"production" | "prod" => Ok(Self::Production),
			other => Err(format!(
				"unknown environment '{}', expected development or production",
				other
			)),
		}
	}
}

/// Page builder settings.
///
/// Every field has a default, so partial TOML files and sparse environments
/// are fine.
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder_conf::{Environment, Settings};
///
/// let settings = Settings::default();
/// assert_eq!(settings.environment, Environment::Production);
/// assert_eq!(settings.default_locale, "en");
/// assert!(settings.validate_in_dev);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
	/// Runtime environment.
	pub environment: Environment,
	/// Global switch for development-time prop validation.
	pub validate_in_dev: bool,
	/// Locale used when a page's locale has no messages.
	pub default_locale: String,
	/// Maximum nesting depth of component children.
	pub max_render_depth: usize,
	/// `tracing` filter directive used by the facade's subscriber.
	pub log_filter: String,
	/// Field-name substrings selecting the color widget.
	pub color_hints: Vec<String>,
	/// Field-name substrings selecting the url widget.
	pub url_hints: Vec<String>,
	/// Field-name substrings selecting the textarea widget.
	pub textarea_hints: Vec<String>,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			environment: Environment::Production,
			validate_in_dev: true,
			default_locale: "en".to_string(),
			max_render_depth: 16,
			log_filter: "info".to_string(),
			color_hints: vec!["color".to_string()],
			url_hints: vec!["url".to_string(), "href".to_string(), "link".to_string()],
			textarea_hints: vec!["description".to_string(), "content".to_string()],
		}
	}
}

impl Settings {
	/// Creates a settings builder with no sources.
	pub fn builder() -> SettingsBuilder {
		SettingsBuilder::new()
	}

	/// Loads defaults overridden by `PAGEBUILDER_*` environment variables.
	///
	/// # Errors
	///
	/// Returns an error if an environment variable has an invalid value.
	pub fn from_env() -> SettingsResult<Self> {
		Self::builder().add_source(EnvSource::new()).build()
	}

	/// Loads defaults, then an optional TOML file, then the environment.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or parsed, or a value is
	/// invalid.
	pub fn load(path: Option<&Path>) -> SettingsResult<Self> {
		let mut builder = Self::builder();
		if let Some(path) = path {
			builder = builder.add_source(TomlFileSource::new(path));
		}
		builder.add_source(EnvSource::new()).build()
	}

	/// Checks cross-field constraints.
	///
	/// # Errors
	///
	/// Returns [`SettingsError::InvalidValue`] naming the offending setting.
	pub fn validate(&self) -> SettingsResult<()> {
		if self.default_locale.trim().is_empty() {
			return Err(SettingsError::InvalidValue {
				key: "default_locale".to_string(),
				reason: "locale cannot be empty".to_string(),
			});
		}
		if self.max_render_depth == 0 {
			return Err(SettingsError::InvalidValue {
				key: "max_render_depth".to_string(),
				reason: "must be at least 1".to_string(),
			});
		}
		Ok(())
	}

	/// Whether development-time prop validation should run at all.
	pub fn dev_validation_enabled(&self) -> bool {
		self.environment.is_development() && self.validate_in_dev
	}
}

/// Builder merging [`ConfigSource`]s over [`Settings::default`].
///
/// Sources are applied in ascending priority, so higher-priority sources win
/// key by key.
#[derive(Default)]
pub struct SettingsBuilder {
	sources: Vec<Box<dyn ConfigSource>>,
}

impl SettingsBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a configuration source.
	pub fn add_source<S: ConfigSource + 'static>(mut self, source: S) -> Self {
		self.sources.push(Box::new(source));
		self
	}

	/// Merges all sources and deserializes the result.
	///
	/// # Errors
	///
	/// Returns the first source error, a deserialization error, or a
	/// validation error.
	pub fn build(mut self) -> SettingsResult<Settings> {
		let mut merged: IndexMap<String, Value> = match serde_json::to_value(Settings::default())? {
			Value::Object(map) => map.into_iter().collect(),
			_ => IndexMap::new(),
		};

		self.sources.sort_by_key(|source| source.priority());
		for source in &self.sources {
			let values = source.load()?;
			tracing::debug!(
				source = %source.description(),
				keys = values.len(),
				"applying settings source"
			);
			for (key, value) in values {
				merged.insert(key, value);
			}
		}

		let object: serde_json::Map<String, Value> = merged.into_iter().collect();
		let settings: Settings = serde_json::from_value(Value::Object(object))?;
		settings.validate()?;
		Ok(settings)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("development", Environment::Development)]
	#[case("DEV", Environment::Development)]
	#[case(" production ", Environment::Production)]
	#[case("prod", Environment::Production)]
	fn test_environment_from_str(#[case] input: &str, #[case] expected: Environment) {
		// Act
		let env: Environment = input.parse().unwrap();

		// Assert
		assert_eq!(env, expected);
	}

	#[rstest]
	fn test_environment_from_str_rejects_unknown() {
		// Act
		let result = "staging".parse::<Environment>();

		// Assert
		assert!(result.unwrap_err().contains("staging"));
	}

	#[rstest]
	fn test_builder_without_sources_yields_defaults() {
		// Act
		let settings = Settings::builder().build().unwrap();

		// Assert
		assert_eq!(settings, Settings::default());
	}

	#[rstest]
	fn test_validate_rejects_zero_depth() {
		// Arrange
		let settings = Settings {
			max_render_depth: 0,
			..Settings::default()
		};

		// Act
		let err = settings.validate().unwrap_err();

		// Assert
		assert_eq!(
			err.to_string(),
			"invalid value for setting 'max_render_depth': must be at least 1"
		);
	}

	#[rstest]
	#[case(Environment::Development, true, true)]
	#[case(Environment::Development, false, false)]
	#[case(Environment::Production, true, false)]
	fn test_dev_validation_enabled(
		#[case] environment: Environment,
		#[case] validate_in_dev: bool,
		#[case] expected: bool,
	) {
		// Arrange
		let settings = Settings {
			environment,
			validate_in_dev,
			..Settings::default()
		};

		// Act & Assert
		assert_eq!(settings.dev_validation_enabled(), expected);
	}
}

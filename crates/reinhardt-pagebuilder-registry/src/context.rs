//! Per-render context handed to every component.

use reinhardt_pagebuilder_conf::{Environment, Settings};

/// Rendering context shared by all instances of one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderContext {
	/// Operator-facing editing context.
	pub edit_mode: bool,
	/// Locale of the page being rendered.
	pub locale: String,
	/// Runtime environment.
	pub environment: Environment,
	/// Global switch for development-time prop validation.
	pub validate_in_dev: bool,
	/// Nesting depth of the instance currently rendering (top level is 0).
	pub depth: usize,
}

impl RenderContext {
	/// Creates a production context.
	pub fn new(edit_mode: bool, locale: impl Into<String>) -> Self {
		Self {
			edit_mode,
			locale: locale.into(),
			environment: Environment::Production,
			validate_in_dev: true,
			depth: 0,
		}
	}

	/// Creates a context from settings, falling back to the default locale.
	pub fn from_settings(settings: &Settings, edit_mode: bool, locale: Option<&str>) -> Self {
		let locale = locale
			.map(str::trim)
			.filter(|l| !l.is_empty())
			.unwrap_or(&settings.default_locale);

		Self {
			edit_mode,
			locale: locale.to_string(),
			environment: settings.environment,
			validate_in_dev: settings.validate_in_dev,
			depth: 0,
		}
	}

	/// Sets the runtime environment.
	pub fn with_environment(mut self, environment: Environment) -> Self {
		self.environment = environment;
		self
	}

	/// Sets the global validation switch.
	pub fn with_validate_in_dev(mut self, enabled: bool) -> Self {
		self.validate_in_dev = enabled;
		self
	}

	/// Whether dev-time validation may run in this context.
	pub fn dev_validation_enabled(&self) -> bool {
		self.environment.is_development() && self.validate_in_dev
	}

	/// Context for the children of the current instance.
	pub fn nested(&self) -> Self {
		Self {
			depth: self.depth + 1,
			..self.clone()
		}
	}
}

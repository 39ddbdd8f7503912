//! Explicit registry initialization.

use crate::discovery::registered_components;
use crate::error::RegistryResult;
use crate::registration::Registration;
use crate::registry::ComponentRegistry;
use reinhardt_pagebuilder_conf::Settings;
use reinhardt_pagebuilder_schema::FieldHints;
use std::sync::Arc;

/// Builds a [`ComponentRegistry`] once at startup.
///
/// Link-time registrations (when enabled) are inserted first, sorted by key,
/// followed by explicit registrations in call order. An explicit
/// registration therefore replaces a link-time one with the same key.
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder_registry::{ComponentRegistry, Registration};
///
/// let registry = ComponentRegistry::builder()
/// 	.register(Registration::from_fn("Spacer", |_| Ok("<hr/>".to_string())))
/// 	.build()
/// 	.unwrap();
///
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct ComponentRegistryBuilder {
	registrations: Vec<Registration>,
	include_registered: bool,
	field_hints: FieldHints,
}

impl ComponentRegistryBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues an explicit registration.
	pub fn register(mut self, registration: Registration) -> Self {
		self.registrations.push(registration);
		self
	}

	/// Includes every component submitted with
	/// [`register_component!`](crate::register_component).
	pub fn with_registered_components(mut self) -> Self {
		self.include_registered = true;
		self
	}

	/// Sets the field-name heuristics used for editor generation.
	pub fn field_hints(mut self, field_hints: FieldHints) -> Self {
		self.field_hints = field_hints;
		self
	}

	/// Takes the field-name heuristics from settings.
	pub fn hints_from(self, settings: &Settings) -> Self {
		self.field_hints(FieldHints {
			color: settings.color_hints.clone(),
			url: settings.url_hints.clone(),
			textarea: settings.textarea_hints.clone(),
		})
	}

	/// Builds the registry.
	///
	/// # Errors
	///
	/// Returns the first registration error (a blank type name).
	pub fn build(self) -> RegistryResult<Arc<ComponentRegistry>> {
		let registry = ComponentRegistry::with_field_hints(self.field_hints);

		if self.include_registered {
			for registration in registered_components() {
				registry.register(registration)?;
			}
		}
		for registration in self.registrations {
			registry.register(registration)?;
		}

		tracing::info!(components = registry.len(), "component registry initialized");
		Ok(Arc::new(registry))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RegistryError;
	use rstest::rstest;

	fn named(name: &str) -> Registration {
		Registration::from_fn(name, |_| Ok(String::new()))
	}

	#[rstest]
	fn test_build_keeps_call_order() {
		// Act
		let registry = ComponentRegistryBuilder::new()
			.register(named("Zeta"))
			.register(named("Alpha"))
			.build()
			.unwrap();

		// Assert
		assert_eq!(registry.names(), vec!["Zeta", "Alpha"]);
	}

	#[rstest]
	fn test_build_fails_on_blank_name() {
		// Act
		let result = ComponentRegistryBuilder::new()
			.register(named("Ok"))
			.register(named(""))
			.build();

		// Assert
		assert_eq!(result.unwrap_err(), RegistryError::EmptyTypeName);
	}

	#[rstest]
	fn test_hints_from_settings() {
		// Arrange
		let settings = Settings {
			textarea_hints: vec!["body".to_string()],
			..Settings::default()
		};

		// Act
		let registry = ComponentRegistryBuilder::new()
			.hints_from(&settings)
			.build()
			.unwrap();

		// Assert
		assert_eq!(registry.field_hints().textarea, vec!["body".to_string()]);
		assert_eq!(registry.field_hints().color, vec!["color".to_string()]);
	}
}

//! The component registry.
//!
//! A read-mostly map from [`ComponentKey`] to [`RegisteredComponent`].
//! Registration takes a write lock; every lookup takes a short read lock and
//! returns an `Arc` clone, so renders never hold the lock while running
//! component code.

use crate::builder::ComponentRegistryBuilder;
use crate::error::RegistryResult;
use crate::key::{ComponentKey, normalize};
use crate::registration::{RegisteredComponent, Registration};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use parking_lot::RwLock;
use reinhardt_pagebuilder_schema::{FieldHints, FieldSet, generate_fields};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Summary counters for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
	/// Number of registered types.
	pub total: usize,
	/// Distinct categories, sorted.
	pub categories: BTreeSet<String>,
	/// Time of the last registration or removal.
	pub last_updated: Option<DateTime<Utc>>,
}

/// Registry of component types.
///
/// Iteration follows first-registration order. Re-registering a key replaces
/// the entry in place, so the newest registration always wins without moving
/// the entry.
#[derive(Debug, Default)]
pub struct ComponentRegistry {
	components: RwLock<IndexMap<ComponentKey, Arc<RegisteredComponent>>>,
	last_updated: RwLock<Option<DateTime<Utc>>>,
	field_hints: FieldHints,
}

impl ComponentRegistry {
	/// Creates an empty registry with default field hints.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an empty registry using custom field-name heuristics.
	pub fn with_field_hints(field_hints: FieldHints) -> Self {
		Self {
			field_hints,
			..Self::default()
		}
	}

	/// Starts an explicit, deterministic registry initialization.
	pub fn builder() -> ComponentRegistryBuilder {
		ComponentRegistryBuilder::new()
	}

	/// Inserts or replaces a component type.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::EmptyTypeName`](crate::RegistryError::EmptyTypeName)
	/// for a blank name.
	pub fn register(&self, registration: Registration) -> RegistryResult<Arc<RegisteredComponent>> {
		let component = Arc::new(registration.into_component()?);
		let key = component.key().clone();

		let previous = self
			.components
			.write()
			.insert(key.clone(), Arc::clone(&component));
		*self.last_updated.write() = Some(component.registered_at());

		match previous {
			Some(previous) => tracing::warn!(
				component = %key,
				previous = %previous.name(),
				replacement = %component.name(),
				"component type re-registered, replacing previous entry"
			),
			None => tracing::debug!(component = %key, "component type registered"),
		}

		Ok(component)
	}

	/// Looks up a component type. Names are normalized like [`ComponentKey`].
	pub fn get(&self, name: impl AsRef<str>) -> Option<Arc<RegisteredComponent>> {
		let key = normalize(name.as_ref())?;
		self.components.read().get(key.as_str()).cloned()
	}

	/// Returns `true` if the type is registered.
	pub fn has(&self, name: impl AsRef<str>) -> bool {
		normalize(name.as_ref())
			.map(|key| self.components.read().contains_key(key.as_str()))
			.unwrap_or(false)
	}

	/// Removes a component type.
	pub fn unregister(&self, name: impl AsRef<str>) -> Option<Arc<RegisteredComponent>> {
		let key = normalize(name.as_ref())?;
		let removed = self.components.write().shift_remove(key.as_str());
		if removed.is_some() {
			*self.last_updated.write() = Some(Utc::now());
			tracing::debug!(component = %key, "component type unregistered");
		}
		removed
	}

	/// Snapshot of all entries in registration order.
	pub fn components(&self) -> Vec<Arc<RegisteredComponent>> {
		self.components.read().values().cloned().collect()
	}

	/// Registered type names (as given) in registration order.
	pub fn names(&self) -> Vec<String> {
		self.components
			.read()
			.values()
			.map(|c| c.name().to_string())
			.collect()
	}

	/// Number of registered types.
	pub fn len(&self) -> usize {
		self.components.read().len()
	}

	/// Returns `true` when nothing is registered.
	pub fn is_empty(&self) -> bool {
		self.components.read().is_empty()
	}

	/// Summary counters.
	pub fn stats(&self) -> RegistryStats {
		let components = self.components.read();
		RegistryStats {
			total: components.len(),
			categories: components
				.values()
				.map(|c| c.metadata().category.clone())
				.collect(),
			last_updated: *self.last_updated.read(),
		}
	}

	/// Heuristics used when generating editor fields.
	pub fn field_hints(&self) -> &FieldHints {
		&self.field_hints
	}

	/// Editor fields for a type.
	///
	/// Returns `None` for unregistered types and an empty set for types
	/// without a schema.
	pub fn fields_for(&self, name: impl AsRef<str>) -> Option<FieldSet> {
		let component = self.get(name)?;
		Some(
			component
				.schema()
				.map(|schema| generate_fields(schema, &self.field_hints))
				.unwrap_or_default(),
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::RegistryError;
	use crate::metadata::ComponentMetadata;
	use crate::renderable::RenderInput;
	use crate::RenderContext;
	use reinhardt_pagebuilder_schema::{Schema, SchemaType, WidgetKind};
	use rstest::rstest;
	use serde_json::Map;

	fn static_html(name: &str, html: &'static str) -> Registration {
		Registration::from_fn(name, move |_: &RenderInput<'_>| Ok(html.to_string()))
	}

	fn render(component: &RegisteredComponent) -> String {
		component
			.invoke(&RenderContext::new(false, "en"), &Map::new(), "")
			.output
			.unwrap()
	}

	#[rstest]
	fn test_register_and_get() {
		// Arrange
		let registry = ComponentRegistry::new();

		// Act
		registry.register(static_html("HeroSection", "<hero/>")).unwrap();

		// Assert
		let component = registry.get("HeroSection").unwrap();
		assert_eq!(component.name(), "HeroSection");
		assert_eq!(render(&component), "<hero/>");
		assert!(registry.has("herosection"));
		assert!(registry.has("  HEROSECTION "));
		assert!(!registry.has("Footer"));
		assert!(registry.get("").is_none());
	}

	#[rstest]
	fn test_reregistration_replaces_in_place() {
		// Arrange
		let registry = ComponentRegistry::new();
		registry.register(static_html("A", "a1")).unwrap();
		registry.register(static_html("B", "b")).unwrap();

		// Act
		registry.register(static_html("a", "a2")).unwrap();

		// Assert
		assert_eq!(registry.len(), 2);
		assert_eq!(registry.names(), vec!["a", "B"]);
		assert_eq!(render(&registry.get("A").unwrap()), "a2");
	}

	#[rstest]
	fn test_blank_name_rejected() {
		// Arrange
		let registry = ComponentRegistry::new();

		// Act
		let result = registry.register(static_html("  ", ""));

		// Assert
		assert_eq!(result.unwrap_err(), RegistryError::EmptyTypeName);
		assert!(registry.is_empty());
		assert!(registry.stats().last_updated.is_none());
	}

	#[rstest]
	fn test_unregister() {
		// Arrange
		let registry = ComponentRegistry::new();
		registry.register(static_html("A", "")).unwrap();
		registry.register(static_html("B", "")).unwrap();
		registry.register(static_html("C", "")).unwrap();

		// Act
		let removed = registry.unregister("b");
		let missing = registry.unregister("b");

		// Assert
		assert_eq!(removed.unwrap().name(), "B");
		assert!(missing.is_none());
		assert_eq!(registry.names(), vec!["A", "C"]);
	}

	#[rstest]
	fn test_stats() {
		// Arrange
		let registry = ComponentRegistry::new();
		for (name, category) in [("Hero", "layout"), ("Text", "content"), ("Grid", "layout")] {
			registry
				.register(
					static_html(name, "")
						.metadata(ComponentMetadata::builder(category).build().unwrap()),
				)
				.unwrap();
		}

		// Act
		let stats = registry.stats();

		// Assert
		assert_eq!(stats.total, 3);
		assert_eq!(
			stats.categories.into_iter().collect::<Vec<_>>(),
			vec!["content", "layout"]
		);
		assert!(stats.last_updated.is_some());
	}

	#[rstest]
	fn test_fields_for() {
		// Arrange
		let registry = ComponentRegistry::new();
		registry
			.register(
				static_html("Hero", "").schema(
					Schema::builder()
						.field("title", SchemaType::string())
						.field("backgroundColor", SchemaType::string())
						.build()
						.unwrap(),
				),
			)
			.unwrap();
		registry.register(static_html("Divider", "")).unwrap();

		// Act
		let hero = registry.fields_for("hero").unwrap();
		let divider = registry.fields_for("Divider").unwrap();

		// Assert
		assert_eq!(hero.names().collect::<Vec<_>>(), vec!["title", "backgroundColor"]);
		assert_eq!(hero.get("backgroundColor").unwrap().widget, WidgetKind::Color);
		assert!(divider.is_empty());
		assert!(registry.fields_for("Missing").is_none());
	}

	#[rstest]
	fn test_custom_field_hints() {
		// Arrange
		let registry = ComponentRegistry::with_field_hints(FieldHints {
			color: vec!["shade".to_string()],
			..FieldHints::default()
		});
		registry
			.register(
				static_html("Card", "").schema(
					Schema::builder()
						.field("shade", SchemaType::string())
						.build()
						.unwrap(),
				),
			)
			.unwrap();

		// Act
		let fields = registry.fields_for("Card").unwrap();

		// Assert
		assert_eq!(fields.get("shade").unwrap().widget, WidgetKind::Color);
	}
}

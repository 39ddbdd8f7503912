//! Admin-facing listing of registered components, grouped by category.

use crate::registration::RegisteredComponent;
use crate::registry::ComponentRegistry;
use reinhardt_pagebuilder_schema::text::humanize_field_name;
use serde::Serialize;
use std::collections::BTreeMap;

/// One component in the components manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentListing {
	/// Type name referenced by page instances.
	#[serde(rename = "type")]
	pub type_name: String,
	/// Display name.
	pub name: String,
	/// Category.
	pub category: String,
	/// Icon identifier.
	pub icon: Option<String>,
	/// Version string.
	pub version: String,
	/// Search tags.
	pub tags: Vec<String>,
	/// Short description.
	pub description: Option<String>,
}

impl From<&RegisteredComponent> for ComponentListing {
	fn from(component: &RegisteredComponent) -> Self {
		let metadata = component.metadata();
		Self {
			type_name: component.name().to_string(),
			name: humanize_field_name(component.name()),
			category: metadata.category.clone(),
			icon: metadata.icon.clone(),
			version: metadata.version.to_string(),
			tags: metadata.tags.clone(),
			description: metadata.description.clone(),
		}
	}
}

/// Components sharing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryGroup {
	/// Category name.
	pub category: String,
	/// Entries in registration order.
	pub components: Vec<ComponentListing>,
}

impl ComponentRegistry {
	/// Groups all entries by category, sorted by category name.
	pub fn listing(&self) -> Vec<CategoryGroup> {
		let mut groups: BTreeMap<String, Vec<ComponentListing>> = BTreeMap::new();
		for component in self.components() {
			let entry = ComponentListing::from(component.as_ref());
			groups.entry(entry.category.clone()).or_default().push(entry);
		}

		groups
			.into_iter()
			.map(|(category, components)| CategoryGroup {
				category,
				components,
			})
			.collect()
	}
}

//! Page model.
//!
//! [`PageConfig`] is the persisted wire shape
//! (`{components, locale, editMode}`); [`Page`] is the root aggregate that owns
//! it. Optional wire fields (`isVisible`, `children`) stay absent on
//! serialization when they were absent on input, so pages round-trip
//! unchanged.

use crate::error::PageResult;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// One placed, configured occurrence of a component type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentInstance {
	/// Instance id, unique within the page.
	pub id: String,

	/// Component type name.
	#[serde(rename = "type")]
	pub type_name: String,

	/// Opaque props.
	#[serde(default)]
	pub props: Map<String, Value>,

	/// Sort key among siblings.
	#[serde(default)]
	pub order: i64,

	/// Visibility flag; absent means visible.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub is_visible: Option<bool>,

	/// Nested instances.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub children: Option<Vec<ComponentInstance>>,
}

impl ComponentInstance {
	/// Creates an instance with a fresh UUID v4 id.
	pub fn new(type_name: impl Into<String>) -> Self {
		Self {
			id: Uuid::new_v4().to_string(),
			type_name: type_name.into(),
			props: Map::new(),
			order: 0,
			is_visible: None,
			children: None,
		}
	}

	/// Replaces the id.
	pub fn with_id(mut self, id: impl Into<String>) -> Self {
		self.id = id.into();
		self
	}

	/// Sets one prop.
	pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.props.insert(name.into(), value.into());
		self
	}

	/// Sets the sort key.
	pub fn order(mut self, order: i64) -> Self {
		self.order = order;
		self
	}

	/// Sets the visibility flag.
	pub fn visible(mut self, visible: bool) -> Self {
		self.is_visible = Some(visible);
		self
	}

	/// Appends a child instance.
	pub fn child(mut self, child: ComponentInstance) -> Self {
		self.children.get_or_insert_with(Vec::new).push(child);
		self
	}

	/// Whether the instance should be shown to viewers.
	pub fn is_visible(&self) -> bool {
		self.is_visible.unwrap_or(true)
	}

	/// Child instances, empty when absent.
	pub fn children(&self) -> &[ComponentInstance] {
		self.children.as_deref().unwrap_or_default()
	}

	/// Finds this instance or a descendant by id.
	pub fn find(&self, id: &str) -> Option<&ComponentInstance> {
		if self.id == id {
			return Some(self);
		}
		self.children().iter().find_map(|child| child.find(id))
	}
}

/// Finds an instance anywhere in a tree, returning it with its depth.
pub fn find_with_depth<'a>(
	instances: &'a [ComponentInstance],
	id: &str,
) -> Option<(&'a ComponentInstance, usize)> {
	fn walk<'a>(
		instances: &'a [ComponentInstance],
		id: &str,
		depth: usize,
	) -> Option<(&'a ComponentInstance, usize)> {
		instances.iter().find_map(|instance| {
			if instance.id == id {
				Some((instance, depth))
			} else {
				walk(instance.children(), id, depth + 1)
			}
		})
	}
	walk(instances, id, 0)
}

/// Serialized page configuration handed to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
	/// Top-level instances.
	#[serde(default)]
	pub components: Vec<ComponentInstance>,
	/// Page locale.
	#[serde(default)]
	pub locale: String,
	/// Operator-facing editing context.
	#[serde(default)]
	pub edit_mode: bool,
}

impl PageConfig {
	/// Creates an empty configuration.
	pub fn new(locale: impl Into<String>, edit_mode: bool) -> Self {
		Self {
			components: Vec::new(),
			locale: locale.into(),
			edit_mode,
		}
	}

	/// Appends a top-level instance.
	pub fn component(mut self, instance: ComponentInstance) -> Self {
		self.components.push(instance);
		self
	}

	/// Parses a configuration from JSON.
	///
	/// # Errors
	///
	/// Returns [`PageError::InvalidJson`](crate::PageError::InvalidJson) for
	/// malformed input.
	pub fn from_json(json: &str) -> PageResult<Self> {
		Ok(serde_json::from_str(json)?)
	}

	/// Serializes the configuration to JSON.
	///
	/// # Errors
	///
	/// Returns [`PageError::InvalidJson`](crate::PageError::InvalidJson) if
	/// serialization fails.
	pub fn to_json(&self) -> PageResult<String> {
		Ok(serde_json::to_string(self)?)
	}

	/// Finds an instance anywhere in the tree.
	pub fn find(&self, id: &str) -> Option<&ComponentInstance> {
		self.components.iter().find_map(|instance| instance.find(id))
	}
}

/// A page: the root aggregate and unit of persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
	/// Page id.
	pub id: String,
	/// URL slug.
	pub slug: String,
	/// Page locale.
	pub locale: String,
	/// Top-level instances.
	#[serde(default)]
	pub components: Vec<ComponentInstance>,
	/// Publication flag.
	#[serde(default)]
	pub published: bool,
	/// Free-form metadata (title, SEO fields, ...).
	#[serde(default)]
	pub metadata: Map<String, Value>,
}

impl Page {
	/// Creates an unpublished, empty page with a fresh id.
	pub fn new(slug: impl Into<String>, locale: impl Into<String>) -> Self {
		Self {
			id: Uuid::new_v4().to_string(),
			slug: slug.into(),
			locale: locale.into(),
			components: Vec::new(),
			published: false,
			metadata: Map::new(),
		}
	}

	/// Builds the renderer input for this page.
	pub fn config(&self, edit_mode: bool) -> PageConfig {
		PageConfig {
			components: self.components.clone(),
			locale: self.locale.clone(),
			edit_mode,
		}
	}
}

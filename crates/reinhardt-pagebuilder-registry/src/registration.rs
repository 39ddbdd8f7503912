//! Registration wrapper: attaches schema, metadata and default props to a
//! render capability, and applies them at render time.

use crate::context::RenderContext;
use crate::error::{RegistryResult, RenderResult};
use crate::key::ComponentKey;
use crate::metadata::ComponentMetadata;
use crate::registry::ComponentRegistry;
use crate::renderable::{RenderInput, Renderable, from_fn};
use chrono::{DateTime, Utc};
use reinhardt_pagebuilder_schema::{Schema, ValidationIssue};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Options bag for registering one component type.
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder_registry::{ComponentRegistry, Registration};
/// use reinhardt_pagebuilder_schema::{Schema, SchemaType};
/// use serde_json::json;
///
/// let registry = ComponentRegistry::new();
/// Registration::from_fn("Heading", |input| {
/// 	Ok(format!("<h2>{}</h2>", input.escaped("text")))
/// })
/// .schema(Schema::builder().field("text", SchemaType::string()).build().unwrap())
/// .default_prop("text", json!("Untitled"))
/// .register(&registry)
/// .unwrap();
///
/// assert!(registry.has("heading"));
/// ```
pub struct Registration {
	name: String,
	renderer: Arc<dyn Renderable>,
	metadata: ComponentMetadata,
	schema: Option<Schema>,
	default_props: Map<String, Value>,
	validate_in_dev: bool,
}

impl Registration {
	/// Starts a registration for a render capability.
	pub fn new(name: impl Into<String>, renderer: impl Renderable + 'static) -> Self {
		Self {
			name: name.into(),
			renderer: Arc::new(renderer),
			metadata: ComponentMetadata::default(),
			schema: None,
			default_props: Map::new(),
			validate_in_dev: true,
		}
	}

	/// Starts a registration for a render closure.
	pub fn from_fn<F>(name: impl Into<String>, func: F) -> Self
	where
		F: Fn(&RenderInput<'_>) -> RenderResult<String> + Send + Sync + 'static,
	{
		Self::new(name, from_fn(func))
	}

	/// Sets descriptive metadata.
	pub fn metadata(mut self, metadata: ComponentMetadata) -> Self {
		self.metadata = metadata;
		self
	}

	/// Attaches a prop schema.
	pub fn schema(mut self, schema: Schema) -> Self {
		self.schema = Some(schema);
		self
	}

	/// Adds one default prop.
	pub fn default_prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
		self.default_props.insert(name.into(), value.into());
		self
	}

	/// Adds several default props.
	pub fn default_props(mut self, props: Map<String, Value>) -> Self {
		self.default_props.extend(props);
		self
	}

	/// Enables or disables development-time prop validation for this type.
	pub fn validate_in_dev(mut self, enabled: bool) -> Self {
		self.validate_in_dev = enabled;
		self
	}

	/// Type name as given.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Inserts the component into `registry`, replacing any entry with the
	/// same key.
	///
	/// # Errors
	///
	/// Returns [`RegistryError::EmptyTypeName`](crate::RegistryError::EmptyTypeName)
	/// for a blank name.
	pub fn register(self, registry: &ComponentRegistry) -> RegistryResult<Arc<RegisteredComponent>> {
		registry.register(self)
	}

	pub(crate) fn into_component(self) -> RegistryResult<RegisteredComponent> {
		let key = ComponentKey::new(&self.name)?;
		Ok(RegisteredComponent {
			key,
			name: self.name.trim().to_string(),
			renderer: self.renderer,
			schema: self.schema,
			metadata: self.metadata,
			default_props: self.default_props,
			validate_in_dev: self.validate_in_dev,
			registered_at: Utc::now(),
		})
	}
}

impl fmt::Debug for Registration {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Registration")
			.field("name", &self.name)
			.field("metadata", &self.metadata)
			.field("has_schema", &self.schema.is_some())
			.field("default_props", &self.default_props)
			.field("validate_in_dev", &self.validate_in_dev)
			.finish_non_exhaustive()
	}
}

/// A registry entry. Immutable once created.
pub struct RegisteredComponent {
	key: ComponentKey,
	name: String,
	renderer: Arc<dyn Renderable>,
	schema: Option<Schema>,
	metadata: ComponentMetadata,
	default_props: Map<String, Value>,
	validate_in_dev: bool,
	registered_at: DateTime<Utc>,
}

/// Outcome of [`RegisteredComponent::invoke`].
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
	/// Rendered HTML, or the component's error.
	pub output: RenderResult<String>,
	/// Dev-time validation issues. Always empty outside development.
	pub warnings: Vec<ValidationIssue>,
}

impl RegisteredComponent {
	/// Normalized key.
	pub fn key(&self) -> &ComponentKey {
		&self.key
	}

	/// Type name as registered (trimmed, original case).
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Prop schema, if declared.
	pub fn schema(&self) -> Option<&Schema> {
		self.schema.as_ref()
	}

	/// Descriptive metadata.
	pub fn metadata(&self) -> &ComponentMetadata {
		&self.metadata
	}

	/// Registration-level default props.
	pub fn default_props(&self) -> &Map<String, Value> {
		&self.default_props
	}

	/// Whether this type opted into dev-time validation.
	pub fn validates_in_dev(&self) -> bool {
		self.validate_in_dev
	}

	/// When this entry was created.
	pub fn registered_at(&self) -> DateTime<Utc> {
		self.registered_at
	}

	/// Fills absent props from schema defaults, then registration defaults.
	///
	/// Keys present in `props` are never overwritten, even when `null`.
	pub fn resolve_props(&self, props: &Map<String, Value>) -> Map<String, Value> {
		let mut resolved = props.clone();
		for (name, value) in &self.default_props {
			if !resolved.contains_key(name) {
				resolved.insert(name.clone(), value.clone());
			}
		}
		if let Some(schema) = &self.schema {
			for (name, value) in schema.defaults() {
				if !resolved.contains_key(&name) {
					resolved.insert(name, value);
				}
			}
		}
		resolved
	}

	/// Renders one instance: applies defaults, validates in development and
	/// calls the render capability.
	///
	/// Validation problems are logged and returned as warnings; they never
	/// block rendering.
	pub fn invoke(
		&self,
		context: &RenderContext,
		props: &Map<String, Value>,
		children: &str,
	) -> Invocation {
		let resolved = self.resolve_props(props);

		let warnings = match &self.schema {
			Some(schema) if self.validate_in_dev && context.dev_validation_enabled() => {
				schema.validate(&resolved).err().unwrap_or_default()
			}
			_ => Vec::new(),
		};
		for issue in &warnings {
			tracing::warn!(component = %self.key, %issue, "prop validation failed");
		}

		let output = self.renderer.render(&RenderInput {
			props: &resolved,
			children,
			context,
		});

		Invocation { output, warnings }
	}
}

impl fmt::Debug for RegisteredComponent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RegisteredComponent")
			.field("key", &self.key)
			.field("name", &self.name)
			.field("metadata", &self.metadata)
			.field("has_schema", &self.schema.is_some())
			.field("validate_in_dev", &self.validate_in_dev)
			.field("registered_at", &self.registered_at)
			.finish_non_exhaustive()
	}
}

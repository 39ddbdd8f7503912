//! # Reinhardt Page Builder
//!
//! A schema-driven component registry and page renderer for CMS page
//! builders.
//!
//! Pages are stored as trees of component instances
//! (`{id, type, props, order, isVisible?, children?}`). At startup the host
//! registers its components, each with a render capability, metadata, an
//! optional prop schema and default props. From there:
//!
//! - the **renderer** resolves every instance by type name, renders it in
//!   `order`, and isolates failures per instance (diagnostics in edit mode,
//!   silent degradation for viewers);
//! - the **field generator** turns a component's schema into ordered editor
//!   field descriptions (widget, label, default, options, bounds);
//! - the **property editor** renders those fields as a form and merges edits
//!   back into the instance, rejecting unparseable input.
//!
//! ## Crates
//!
//! | Module | Crate |
//! |--------|-------|
//! | [`conf`] | `reinhardt-pagebuilder-conf`: layered settings |
//! | [`schema`] | `reinhardt-pagebuilder-schema`: schemas, validation, field generation |
//! | [`registry`] | `reinhardt-pagebuilder-registry`: registry and registration |
//! | [`render`] | `reinhardt-pagebuilder-render`: page model and renderer |
//! | [`editor`] | `reinhardt-pagebuilder-editor`: property editor and page mutations |
//!
//! ## Feature Flags
//!
//! - `tracing-init` (default): [`init_tracing`], installing a
//!   `tracing-subscriber` formatter filtered by `Settings::log_filter`.
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_pagebuilder::prelude::*;
//!
//! let hero = Registration::from_fn("HeroSection", |input| {
//! 	Ok(format!("<h1>{}</h1>", input.escaped("title")))
//! })
//! .schema(
//! 	Schema::builder()
//! 		.field("title", SchemaType::string())
//! 		.field("backgroundColor", SchemaType::string().optional())
//! 		.build()
//! 		.unwrap(),
//! )
//! .metadata(ComponentMetadata::builder("layout").icon("hero").build().unwrap());
//!
//! let builder = PageBuilder::new(Settings::default(), ComponentRegistry::builder().register(hero))
//! 	.unwrap();
//!
//! let mut page = PageConfig::new("en", false)
//! 	.component(ComponentInstance::new("HeroSection").with_id("h").prop("title", "Hello"));
//! builder
//! 	.edit(&mut page, "h", [("title", EditValue::text("New Title"))])
//! 	.unwrap();
//!
//! assert_eq!(builder.render(&page).html, "<h1>New Title</h1>");
//! assert_eq!(
//! 	builder.fields_for("heroSection").unwrap().get("backgroundColor").unwrap().widget,
//! 	WidgetKind::Color
//! );
//! ```

pub mod conf;
pub mod editor;
pub mod error;
#[cfg(feature = "tracing-init")]
pub mod logging;
pub mod page_builder;
pub mod registry;
pub mod render;
pub mod schema;

pub use error::{PageBuilderError, PageBuilderResult};
#[cfg(feature = "tracing-init")]
pub use logging::init_tracing;
pub use page_builder::PageBuilder;

// Re-export settings
pub use reinhardt_pagebuilder_conf::{Environment, Settings, SettingsError};

// Re-export schema types
pub use reinhardt_pagebuilder_schema::{
	FieldDescription, FieldHints, FieldSet, Schema, SchemaType, WidgetKind, generate_fields,
};

// Re-export registry types
pub use reinhardt_pagebuilder_registry::{
	ComponentKey, ComponentMetadata, ComponentRegistry, ComponentRegistryBuilder, Registration,
	RenderError, RenderInput, Renderable, register_component,
};

// Re-export page model and renderer
pub use reinhardt_pagebuilder_render::{
	ComponentInstance, InstanceState, Messages, Page, PageConfig, PageRenderer, RenderReport,
};

// Re-export editor
pub use reinhardt_pagebuilder_editor::{EditValue, EditorError, PageEditor, PropertyEditor};

/// Commonly used types.
pub mod prelude {
	pub use crate::{
		ComponentInstance,
		ComponentMetadata,
		ComponentRegistry,
		EditValue,
		Environment,
		InstanceState,
		Page,
		PageBuilder,
		PageBuilderError,
		PageBuilderResult,
		PageConfig,
		PageEditor,
		Registration,
		RenderError,
		RenderInput,
		Renderable,
		Schema,
		SchemaType,
		Settings,
		WidgetKind,
		register_component,
	};

	#[cfg(feature = "tracing-init")]
	pub use crate::init_tracing;
}

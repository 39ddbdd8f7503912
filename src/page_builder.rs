//! Startup wiring: one value holding settings, registry, renderer and editor.

use crate::error::PageBuilderResult;
use reinhardt_pagebuilder_conf::Settings;
use reinhardt_pagebuilder_editor::{EditValue, EditorForm, PageEditor, PropertyEditor};
use reinhardt_pagebuilder_registry::{CategoryGroup, ComponentRegistry, ComponentRegistryBuilder};
use reinhardt_pagebuilder_render::{
	ComponentInstance, InstanceReport, Messages, PageConfig, PageRenderer, RenderReport,
};
use reinhardt_pagebuilder_schema::FieldSet;
use std::path::Path;
use std::sync::Arc;

/// A configured page builder.
///
/// Built once at startup from [`Settings`] and a
/// [`ComponentRegistryBuilder`]; the registry's field hints come from the
/// settings. Cloning is cheap and shares the registry.
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder::prelude::*;
///
/// let builder = PageBuilder::new(
/// 	Settings::default(),
/// 	ComponentRegistry::builder().register(Registration::from_fn("Text", |input| {
/// 		Ok(format!("<p>{}</p>", input.escaped("body")))
/// 	})),
/// )
/// .unwrap();
///
/// let report = builder
/// 	.render_json(r#"{"components":[{"id":"t1","type":"Text","props":{"body":"hi"}}],"locale":"en","editMode":false}"#)
/// 	.unwrap();
/// assert_eq!(report.html, "<p>hi</p>");
/// ```
#[derive(Debug, Clone)]
pub struct PageBuilder {
	settings: Settings,
	registry: Arc<ComponentRegistry>,
	renderer: PageRenderer,
	editor: PropertyEditor,
}

impl PageBuilder {
	/// Validates `settings` and builds the registry.
	///
	/// # Errors
	///
	/// Returns an error for invalid settings or a rejected registration.
	pub fn new(settings: Settings, components: ComponentRegistryBuilder) -> PageBuilderResult<Self> {
		settings.validate()?;
		let registry = components.hints_from(&settings).build()?;
		let renderer = PageRenderer::with_settings(Arc::clone(&registry), settings.clone());
		let editor = PropertyEditor::new(Arc::clone(&registry));

		tracing::info!(
			environment = settings.environment.as_str(),
			components = registry.len(),
			dev_validation = settings.dev_validation_enabled(),
			"page builder ready"
		);
		Ok(Self {
			settings,
			registry,
			renderer,
			editor,
		})
	}

	/// Like [`PageBuilder::new`] with settings read from `PAGEBUILDER_*`
	/// environment variables.
	///
	/// # Errors
	///
	/// Returns an error for invalid environment values or registrations.
	pub fn from_env(components: ComponentRegistryBuilder) -> PageBuilderResult<Self> {
		Self::new(Settings::from_env()?, components)
	}

	/// Like [`PageBuilder::new`] with settings from an optional TOML file
	/// overridden by the environment.
	///
	/// # Errors
	///
	/// Returns an error if the file cannot be read or a value is invalid.
	pub fn load(
		path: Option<&Path>,
		components: ComponentRegistryBuilder,
	) -> PageBuilderResult<Self> {
		Self::new(Settings::load(path)?, components)
	}

	/// Replaces the renderer's message catalog.
	pub fn with_messages(mut self, messages: Messages) -> Self {
		self.renderer = self.renderer.with_messages(messages);
		self
	}

	/// Active settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// The shared registry.
	pub fn registry(&self) -> &Arc<ComponentRegistry> {
		&self.registry
	}

	/// The page renderer.
	pub fn renderer(&self) -> &PageRenderer {
		&self.renderer
	}

	/// The property editor.
	pub fn property_editor(&self) -> &PropertyEditor {
		&self.editor
	}

	/// Renders a page.
	pub fn render(&self, page: &PageConfig) -> RenderReport {
		self.renderer.render_page(page)
	}

	/// Parses a stored page and renders it.
	///
	/// # Errors
	///
	/// Returns an error for malformed JSON.
	pub fn render_json(&self, json: &str) -> PageBuilderResult<RenderReport> {
		let page = PageConfig::from_json(json)?;
		Ok(self.render(&page))
	}

	/// Re-renders one instance of `page`.
	///
	/// # Errors
	///
	/// Returns an error when the id is not in the page.
	pub fn retry(&self, page: &PageConfig, instance_id: &str) -> PageBuilderResult<Vec<InstanceReport>> {
		Ok(self.renderer.retry(page, instance_id)?)
	}

	/// Editor fields for a component type.
	pub fn fields_for(&self, type_name: &str) -> Option<FieldSet> {
		self.registry.fields_for(type_name)
	}

	/// Registered components grouped by category.
	pub fn listing(&self) -> Vec<CategoryGroup> {
		self.registry.listing()
	}

	/// Editing form for an instance.
	///
	/// # Errors
	///
	/// Returns an error when the type is not registered.
	pub fn form(&self, instance: &ComponentInstance) -> PageBuilderResult<EditorForm> {
		Ok(self.editor.form(instance)?)
	}

	/// Applies property edits to an instance of `page` in place.
	///
	/// # Errors
	///
	/// Returns an error for unknown ids, fields or unparseable values; the
	/// page is unchanged in that case.
	pub fn edit<I, K>(&self, page: &mut PageConfig, instance_id: &str, edits: I) -> PageBuilderResult<()>
	where
		I: IntoIterator<Item = (K, EditValue)>,
		K: AsRef<str>,
	{
		PageEditor::for_config(page).edit_props(&self.editor, instance_id, edits)?;
		Ok(())
	}
}

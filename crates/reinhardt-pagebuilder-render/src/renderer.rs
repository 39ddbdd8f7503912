//! Dynamic page renderer.
//!
//! Walks a tree of [`ComponentInstance`]s, resolves each type in the
//! [`ComponentRegistry`] and concatenates the output. Each instance is an
//! isolation boundary: an error or panic inside one component becomes that
//! instance's `Error` state and never affects its siblings or the page.
//!
//! ```text
//! Loading ──lookup miss──────────────▶ Unknown   (edit: diagnostic, view: nothing)
//!    │
//!    ├──render Ok────────────────────▶ Resolved
//!    └──render Err / panic / too deep▶ Error     (edit: diagnostic + retry, view: placeholder)
//! ```

use crate::error::{PageError, PageResult};
use crate::markup;
use crate::messages::Messages;
use crate::page::{ComponentInstance, PageConfig, find_with_depth};
use crate::report::{InstanceReport, InstanceState, RenderReport};
use reinhardt_pagebuilder_conf::Settings;
use reinhardt_pagebuilder_registry::{ComponentRegistry, RenderContext, RenderError};
use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

/// Renders pages against a shared registry.
#[derive(Debug, Clone)]
pub struct PageRenderer {
	registry: Arc<ComponentRegistry>,
	settings: Settings,
	messages: Messages,
}

impl PageRenderer {
	/// Creates a renderer with default settings and built-in messages.
	pub fn new(registry: Arc<ComponentRegistry>) -> Self {
		Self::with_settings(registry, Settings::default())
	}

	/// Creates a renderer using the given settings.
	pub fn with_settings(registry: Arc<ComponentRegistry>, settings: Settings) -> Self {
		let messages = Messages::new(settings.default_locale.clone());
		Self {
			registry,
			settings,
			messages,
		}
	}

	/// Replaces the message catalog.
	pub fn with_messages(mut self, messages: Messages) -> Self {
		self.messages = messages;
		self
	}

	/// The registry used for lookups.
	pub fn registry(&self) -> &Arc<ComponentRegistry> {
		&self.registry
	}

	/// Active settings.
	pub fn settings(&self) -> &Settings {
		&self.settings
	}

	/// Active message catalog.
	pub fn messages(&self) -> &Messages {
		&self.messages
	}

	/// Root context for a page.
	pub fn context_for(&self, page: &PageConfig) -> RenderContext {
		RenderContext::from_settings(&self.settings, page.edit_mode, Some(&page.locale))
	}

	/// Renders a whole page.
	pub fn render_page(&self, page: &PageConfig) -> RenderReport {
		let context = self.context_for(page);
		let mut instances = Vec::new();
		let html = self.render_list(&page.components, &context, &mut instances);

		tracing::debug!(
			instances = instances.len(),
			errors = instances.iter().filter(|r| r.state == InstanceState::Error).count(),
			edit_mode = page.edit_mode,
			"page rendered"
		);
		RenderReport { html, instances }
	}

	/// Renders sibling instances: filters hidden ones outside edit mode, then
	/// sorts by `order` (stable, so ties keep input order).
	pub fn render_list(
		&self,
		instances: &[ComponentInstance],
		context: &RenderContext,
		reports: &mut Vec<InstanceReport>,
	) -> String {
		let mut ordered: Vec<&ComponentInstance> = instances
			.iter()
			.filter(|instance| context.edit_mode || instance.is_visible())
			.collect();
		ordered.sort_by_key(|instance| instance.order);

		ordered
			.into_iter()
			.map(|instance| self.render_instance(instance, context, reports))
			.collect()
	}

	/// Renders one instance and its children, appending reports for all of
	/// them.
	///
	/// Children are rendered before their parent. When the parent ends in
	/// `Error` its output is replaced by a panel, so the reports of its
	/// descendants are dropped.
	pub fn render_instance(
		&self,
		instance: &ComponentInstance,
		context: &RenderContext,
		reports: &mut Vec<InstanceReport>,
	) -> String {
		let mut report = InstanceReport::loading(
			&instance.id,
			&instance.type_name,
			instance.order,
			context.depth,
			instance.is_visible(),
		);
		let slot = reports.len();
		reports.push(report.clone());

		let html = self.resolve(instance, context, &mut report, reports);
		if report.state == InstanceState::Error {
			reports.truncate(slot + 1);
		}
		report.html = html.clone();
		reports[slot] = report;
		html
	}

	fn resolve(
		&self,
		instance: &ComponentInstance,
		context: &RenderContext,
		report: &mut InstanceReport,
		reports: &mut Vec<InstanceReport>,
	) -> String {
		let limit = self.settings.max_render_depth;
		if context.depth >= limit {
			let error = RenderError::DepthExceeded {
				depth: context.depth,
				limit,
			};
			return self.fail(instance, context, report, error);
		}

		let Some(component) = self.registry.get(&instance.type_name) else {
			tracing::warn!(
				instance_id = %instance.id,
				component = %instance.type_name,
				"unknown component type"
			);
			report.transition(InstanceState::Unknown);
			return if context.edit_mode {
				markup::unknown_panel(instance, &self.messages, &context.locale)
			} else {
				String::new()
			};
		};

		let children = match &instance.children {
			Some(children) => self.render_list(children, &context.nested(), reports),
			None => String::new(),
		};

		let invocation = catch_unwind(AssertUnwindSafe(|| {
			component.invoke(context, &instance.props, &children)
		}));
		let output = match invocation {
			Ok(invocation) => {
				report.warnings = invocation.warnings;
				invocation.output
			}
			Err(payload) => Err(RenderError::Panicked(panic_message(payload.as_ref()))),
		};

		match output {
			Ok(html) => {
				report.transition(InstanceState::Resolved);
				if context.edit_mode {
					markup::edit_wrapper(instance, &html, &self.messages, &context.locale)
				} else {
					html
				}
			}
			Err(error) => self.fail(instance, context, report, error),
		}
	}

	fn fail(
		&self,
		instance: &ComponentInstance,
		context: &RenderContext,
		report: &mut InstanceReport,
		error: RenderError,
	) -> String {
		tracing::error!(
			instance_id = %instance.id,
			order = instance.order,
			component = %instance.type_name,
			%error,
			"component render failed"
		);
		report.transition(InstanceState::Error);
		let html = if context.edit_mode {
			markup::error_panel(instance, &error, &self.messages, &context.locale)
		} else {
			markup::unavailable_placeholder(&self.messages, &context.locale)
		};
		report.error = Some(error);
		html
	}

	/// Re-renders a single instance (and its children) from `Loading`.
	///
	/// Siblings are not touched. The returned reports start with the retried
	/// instance; its HTML is `reports[0].html`. Use
	/// [`RenderReport::merge`] to fold them into an earlier report.
	///
	/// Hidden instances are only retried in edit mode; in view mode the
	/// result is empty, matching [`render_page`](Self::render_page).
	///
	/// # Errors
	///
	/// Returns [`PageError::InstanceNotFound`] when no instance in `page` has
	/// the id.
	pub fn retry(&self, page: &PageConfig, instance_id: &str) -> PageResult<Vec<InstanceReport>> {
		let (instance, depth) = find_with_depth(&page.components, instance_id)
			.ok_or_else(|| PageError::InstanceNotFound(instance_id.to_string()))?;

		let mut context = self.context_for(page);
		context.depth = depth;
		if !context.edit_mode && !instance.is_visible() {
			tracing::debug!(instance_id, "skipping retry of hidden instance");
			return Ok(Vec::new());
		}

		tracing::info!(instance_id, component = %instance.type_name, "retrying component render");
		let mut reports = Vec::new();
		self.render_instance(instance, &context, &mut reports);
		Ok(reports)
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		(*message).to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"component panicked".to_string()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_pagebuilder_conf::Environment;
	use reinhardt_pagebuilder_registry::Registration;
	use reinhardt_pagebuilder_schema::{Schema, SchemaType};
	use rstest::{fixture, rstest};
	use std::sync::atomic::{AtomicUsize, Ordering};

	#[fixture]
	fn registry() -> Arc<ComponentRegistry> {
		ComponentRegistry::builder()
			.register(Registration::from_fn("Text", |input| {
				Ok(format!("<p>{}</p>", input.escaped("body")))
			}))
			.register(Registration::from_fn("Section", |input| {
				Ok(format!("<section>{}</section>", input.children))
			}))
			.register(Registration::from_fn("Fails", |_| {
				Err(RenderError::failed("no data"))
			}))
			.register(Registration::from_fn("Panics", |_| -> Result<String, RenderError> {
				panic!("exploded")
			}))
			.build()
			.unwrap()
	}

	fn text(id: &str, order: i64, body: &str) -> ComponentInstance {
		ComponentInstance::new("Text")
			.with_id(id)
			.order(order)
			.prop("body", body)
	}

	#[rstest]
	fn test_view_mode_renders_sorted_visible(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("en", false)
			.component(text("c", 3, "three"))
			.component(text("a", 1, "one"))
			.component(text("h", 0, "hidden").visible(false))
			.component(text("b", 2, "two"));
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.html, "<p>one</p><p>two</p><p>three</p>");
		assert_eq!(report.rendered_ids(), vec!["a", "b", "c"]);
	}

	#[rstest]
	fn test_edit_mode_keeps_hidden(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("en", true)
			.component(text("a", 1, "one"))
			.component(text("h", 0, "hidden").visible(false));
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.rendered_ids(), vec!["h", "a"]);
		assert!(report.html.starts_with("<div class=\"pb-component pb-hidden\" data-component-id=\"h\""));
		assert!(!report.instance("h").unwrap().visible);
	}

	#[rstest]
	fn test_children_sorted_independently(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("en", false).component(
			ComponentInstance::new("Section")
				.with_id("s")
				.child(text("y", 5, "second"))
				.child(text("x", -1, "first")),
		);
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.html, "<section><p>first</p><p>second</p></section>");
		assert_eq!(report.rendered_ids(), vec!["s", "x", "y"]);
		assert_eq!(report.instance("y").unwrap().depth, 1);
	}

	#[rstest]
	fn test_error_and_panic_isolated(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("en", false)
			.component(text("a", 0, "before"))
			.component(ComponentInstance::new("Fails").with_id("f").order(1))
			.component(ComponentInstance::new("Panics").with_id("p").order(2))
			.component(text("z", 3, "after"));
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(
			report.html,
			"<p>before</p><div class=\"pb-unavailable\">Content unavailable</div><div class=\"pb-unavailable\">Content unavailable</div><p>after</p>"
		);
		let failed: Vec<_> = report.errors().map(|r| r.id.as_str()).collect();
		assert_eq!(failed, vec!["f", "p"]);
		assert_eq!(
			report.instance("p").unwrap().error,
			Some(RenderError::Panicked("exploded".to_string()))
		);
		assert_eq!(
			report.instance("f").unwrap().transitions,
			vec![InstanceState::Loading, InstanceState::Error]
		);
	}

	#[rstest]
	fn test_unknown_type(registry: Arc<ComponentRegistry>) {
		// Arrange
		let view = PageConfig::new("en", false)
			.component(ComponentInstance::new("Mystery").with_id("m"))
			.component(text("a", 1, "sibling"));
		let edit = PageConfig {
			edit_mode: true,
			..view.clone()
		};
		let renderer = PageRenderer::new(registry);

		// Act
		let viewed = renderer.render_page(&view);
		let edited = renderer.render_page(&edit);

		// Assert
		assert_eq!(viewed.html, "<p>sibling</p>");
		assert_eq!(viewed.instance("m").unwrap().state, InstanceState::Unknown);
		assert!(edited.html.contains("Unknown Component: Mystery"));
		assert!(edited.html.contains("<p>sibling</p>"));
	}

	#[rstest]
	fn test_type_lookup_is_case_insensitive(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("en", false).component(
			ComponentInstance::new(" TEXT ").prop("body", "shout"),
		);
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.html, "<p>shout</p>");
	}

	#[rstest]
	fn test_depth_limit(registry: Arc<ComponentRegistry>) {
		// Arrange
		let settings = Settings {
			max_render_depth: 2,
			..Settings::default()
		};
		let page = PageConfig::new("en", false).component(
			ComponentInstance::new("Section").with_id("l0").child(
				ComponentInstance::new("Section")
					.with_id("l1")
					.child(ComponentInstance::new("Section").with_id("l2")),
			),
		);
		let renderer = PageRenderer::with_settings(registry, settings);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(
			report.instance("l2").unwrap().error,
			Some(RenderError::DepthExceeded { depth: 2, limit: 2 })
		);
		assert_eq!(report.instance("l1").unwrap().state, InstanceState::Resolved);
		assert_eq!(
			report.html,
			"<section><section><div class=\"pb-unavailable\">Content unavailable</div></section></section>"
		);
	}

	#[rstest]
	fn test_localized_placeholder(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("ja", false)
			.component(ComponentInstance::new("Fails").with_id("f"));
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.html, "<div class=\"pb-unavailable\">コンテンツを表示できません</div>");
	}

	#[rstest]
	fn test_dev_warnings_reported() {
		// Arrange
		let registry = ComponentRegistry::builder()
			.register(
				Registration::from_fn("Heading", |input| Ok(format!("<h1>{}</h1>", input.escaped("text"))))
					.schema(
						Schema::builder()
							.field("text", SchemaType::string())
							.build()
							.unwrap(),
					),
			)
			.build()
			.unwrap();
		let settings = Settings {
			environment: Environment::Development,
			..Settings::default()
		};
		let page = PageConfig::new("en", false)
			.component(ComponentInstance::new("Heading").with_id("h").prop("text", 42));
		let renderer = PageRenderer::with_settings(registry, settings);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.html, "<h1></h1>");
		let warnings: Vec<_> = report.warnings().map(|(id, w)| (id, w.path.as_str())).collect();
		assert_eq!(warnings, vec![("h", "text")]);
	}

	#[rstest]
	fn test_retry_rerenders_single_instance() {
		// Arrange
		let calls = Arc::new(AtomicUsize::new(0));
		let flaky_calls = Arc::clone(&calls);
		let registry = ComponentRegistry::builder()
			.register(Registration::from_fn("Flaky", move |_| {
				if flaky_calls.fetch_add(1, Ordering::SeqCst) == 0 {
					Err(RenderError::failed("first attempt"))
				} else {
					Ok("<ok/>".to_string())
				}
			}))
			.build()
			.unwrap();
		let page = PageConfig::new("en", true)
			.component(ComponentInstance::new("Flaky").with_id("f"));
		let renderer = PageRenderer::new(registry);
		let mut report = renderer.render_page(&page);

		// Act
		let retried = renderer.retry(&page, "f").unwrap();
		report.merge(retried.clone());

		// Assert
		assert_eq!(retried[0].state, InstanceState::Resolved);
		assert!(retried[0].html.contains("<ok/>"));
		assert_eq!(report.instance("f").unwrap().state, InstanceState::Resolved);
		assert_eq!(calls.load(Ordering::SeqCst), 2);
		assert!(matches!(
			renderer.retry(&page, "nope"),
			Err(PageError::InstanceNotFound(_))
		));
	}

	#[rstest]
	#[case(false)]
	#[case(true)]
	fn test_failed_parent_drops_child_reports(
		registry: Arc<ComponentRegistry>,
		#[case] edit_mode: bool,
	) {
		// Arrange
		let page = PageConfig::new("en", edit_mode)
			.component(
				ComponentInstance::new("Fails")
					.with_id("p")
					.child(text("k", 0, "inner")),
			)
			.component(text("z", 1, "after"));
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert!(report.instance("k").is_none());
		assert_eq!(report.rendered_ids(), vec!["p", "z"]);
		assert_eq!(report.instance("p").unwrap().state, InstanceState::Error);
		assert!(!report.html.contains("inner"));
		if !edit_mode {
			assert_eq!(
				report.html,
				"<div class=\"pb-unavailable\">Content unavailable</div><p>after</p>"
			);
		}
	}

	#[rstest]
	fn test_resolved_parent_keeps_failed_child_report(registry: Arc<ComponentRegistry>) {
		// Arrange
		let page = PageConfig::new("en", false).component(
			ComponentInstance::new("Section")
				.with_id("s")
				.child(ComponentInstance::new("Fails").with_id("f"))
				.child(text("k", 1, "inner")),
		);
		let renderer = PageRenderer::new(registry);

		// Act
		let report = renderer.render_page(&page);

		// Assert
		assert_eq!(report.rendered_ids(), vec!["s", "f", "k"]);
		assert_eq!(report.instance("f").unwrap().state, InstanceState::Error);
		assert_eq!(report.instance("s").unwrap().state, InstanceState::Resolved);
	}

	#[rstest]
	#[case(false, 0)]
	#[case(true, 1)]
	fn test_retry_respects_visibility(
		registry: Arc<ComponentRegistry>,
		#[case] edit_mode: bool,
		#[case] expected: usize,
	) {
		// Arrange
		let page = PageConfig::new("en", edit_mode)
			.component(text("a", 0, "shown"))
			.component(text("h", 1, "hidden").visible(false));
		let renderer = PageRenderer::new(registry);

		// Act
		let retried = renderer.retry(&page, "h").unwrap();

		// Assert
		assert_eq!(retried.len(), expected);
		assert!(retried.iter().all(|r| r.id == "h"));
	}
}

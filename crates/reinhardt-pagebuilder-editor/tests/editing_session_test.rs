//! An editing session: build a page, edit props through forms, reorder and
//! re-render.

use proptest::prelude::*;
use reinhardt_pagebuilder_editor::{EditValue, EditorError, PageEditor, PropertyEditor};
use reinhardt_pagebuilder_registry::{ComponentRegistry, Registration};
use reinhardt_pagebuilder_render::{ComponentInstance, PageConfig, PageRenderer};
use reinhardt_pagebuilder_schema::{Schema, SchemaType, WidgetKind};
use rstest::{fixture, rstest};
use serde_json::json;
use std::sync::Arc;

#[fixture]
fn registry() -> Arc<ComponentRegistry> {
	ComponentRegistry::builder()
		.register(
			Registration::from_fn("Hero", |input| {
				let title = input.escaped("title");
				let cta = if input.bool_prop("showCta").unwrap_or(false) {
					format!("<a>{}</a>", input.escaped("ctaText"))
				} else {
					String::new()
				};
				Ok(format!("<h1>{title}</h1>{cta}"))
			})
			.schema(
				Schema::builder()
					.field("title", SchemaType::string())
					.field("ctaText", SchemaType::string().with_default(json!("Learn more")))
					.field("showCta", SchemaType::boolean().with_default(json!(false)))
					.field("backgroundColor", SchemaType::string().optional())
					.build()
					.unwrap(),
			),
		)
		.register(Registration::from_fn("Text", |input| {
			Ok(format!("<p>{}</p>", input.escaped("body")))
		}))
		.build()
		.unwrap()
}

#[rstest]
fn test_form_reflects_schema_and_defaults(registry: Arc<ComponentRegistry>) {
	// Arrange
	let hero = ComponentInstance::new("Hero").prop("title", "Welcome");

	// Act
	let form = PropertyEditor::new(registry).form(&hero).unwrap();

	// Assert
	let labels: Vec<_> = form.controls.iter().map(|c| c.field.label.as_str()).collect();
	assert_eq!(labels, vec!["Title", "Cta Text", "Show Cta", "Background Color"]);
	assert_eq!(form.control("title").unwrap().text, "Welcome");
	assert_eq!(form.control("ctaText").unwrap().text, "Learn more");
	assert_eq!(form.control("showCta").unwrap().field.widget, WidgetKind::Boolean);
	assert_eq!(form.control("backgroundColor").unwrap().field.widget, WidgetKind::Color);
}

#[rstest]
fn test_edit_then_render(registry: Arc<ComponentRegistry>) {
	// Arrange
	let mut page = PageConfig::new("en", false);
	let property_editor = PropertyEditor::new(registry.clone());
	let mut editor = PageEditor::for_config(&mut page);
	let text = editor.insert(ComponentInstance::new("Text").prop("body", "below"), 0);
	let hero = editor.insert(ComponentInstance::new("Hero").prop("title", "Old"), 0);

	// Act
	editor
		.edit_props(
			&property_editor,
			&hero,
			[
				("title", EditValue::text("New & improved")),
				("showCta", EditValue::text("true")),
			],
		)
		.unwrap();
	editor.move_to(&text, 0).unwrap();
	let report = PageRenderer::new(registry).render_page(&page);

	// Assert
	assert_eq!(
		report.html,
		"<p>below</p><h1>New &amp; improved</h1><a>Learn more</a>"
	);
	assert_eq!(report.rendered_ids(), vec![text.as_str(), hero.as_str()]);
}

#[rstest]
fn test_failed_edit_leaves_page_unchanged(registry: Arc<ComponentRegistry>) {
	// Arrange
	let mut page = PageConfig::new("en", true)
		.component(ComponentInstance::new("Hero").with_id("h").prop("title", "Keep"));
	let before = page.clone();
	let property_editor = PropertyEditor::new(registry);

	// Act
	let result = PageEditor::for_config(&mut page).edit_props(
		&property_editor,
		"h",
		[
			("title", EditValue::text("Changed")),
			("showCta", EditValue::text("sometimes")),
		],
	);

	// Assert
	assert!(matches!(result, Err(EditorError::InvalidBoolean { .. })));
	assert_eq!(page, before);
}

#[rstest]
fn test_edited_page_round_trips_json(registry: Arc<ComponentRegistry>) {
	// Arrange
	let mut page = PageConfig::new("en", true)
		.component(ComponentInstance::new("Hero").with_id("h").prop("title", "A"));
	let property_editor = PropertyEditor::new(registry);
	let mut editor = PageEditor::for_config(&mut page);
	editor
		.edit_props(&property_editor, "h", [("title", EditValue::text("B"))])
		.unwrap();
	editor.set_visibility("h", false).unwrap();

	// Act
	let restored = PageConfig::from_json(&page.to_json().unwrap()).unwrap();

	// Assert
	assert_eq!(restored, page);
	assert_eq!(restored.find("h").unwrap().props["title"], json!("B"));
	assert!(!restored.find("h").unwrap().is_visible());
}

proptest! {
	#[test]
	fn moves_keep_orders_contiguous(
		count in 1usize..8,
		moves in proptest::collection::vec((0usize..8, 0usize..10), 0..16),
	) {
		let mut components: Vec<ComponentInstance> = (0..count)
			.map(|i| ComponentInstance::new("Text").with_id(format!("t{i}")).order(i as i64 * 10))
			.collect();
		let mut editor = PageEditor::new(&mut components);

		for (pick, target) in moves {
			let id = format!("t{}", pick % count);
			editor.move_to(&id, target).unwrap();
		}

		let orders: Vec<i64> = components.iter().map(|c| c.order).collect();
		let expected: Vec<i64> = (0..count as i64).collect();
		prop_assert_eq!(orders, expected);
		prop_assert_eq!(components.len(), count);
	}
}

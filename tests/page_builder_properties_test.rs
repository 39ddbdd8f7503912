//! End-to-end behavior of the page builder: registration, field generation,
//! rendering and editing through the facade.

use proptest::prelude::*;
use reinhardt_pagebuilder::prelude::*;
use reinhardt_pagebuilder::generate_fields;
use reinhardt_pagebuilder::schema::FieldHints;
use rstest::{fixture, rstest};
use serde_json::json;

fn text_component() -> Registration {
	Registration::from_fn("Text", |input| Ok(format!("<p>{}</p>", input.escaped("body"))))
}

fn text(id: &str, order: i64, body: &str) -> ComponentInstance {
	ComponentInstance::new("Text")
		.with_id(id)
		.order(order)
		.prop("body", body)
}

#[fixture]
fn builder() -> PageBuilder {
	let components = ComponentRegistry::builder()
		.register(text_component())
		.register(Registration::from_fn("Broken", |_| {
			Err(RenderError::failed("data source offline"))
		}))
		.register(Registration::from_fn("Exploding", |_| -> Result<String, RenderError> {
			panic!("index out of bounds")
		}))
		.register(
			Registration::from_fn("Hero", |input| {
				Ok(format!(
					"<h1>{}</h1><a>{}</a>",
					input.escaped("title"),
					input.escaped("ctaText")
				))
			})
			.schema(
				Schema::builder()
					.field("title", SchemaType::string())
					.field("ctaText", SchemaType::string().optional())
					.field("backgroundColor", SchemaType::string().optional())
					.build()
					.unwrap(),
			),
		);
	PageBuilder::new(Settings::default(), components).unwrap()
}

#[rstest]
fn test_reregistration_keeps_latest(builder: PageBuilder) {
	// Arrange
	let registry = builder.registry();
	let page = PageConfig::new("en", false).component(text("t", 0, "x"));

	// Act
	registry
		.register(Registration::from_fn("Text", |_| Ok("<p>first</p>".to_string())))
		.unwrap();
	registry
		.register(Registration::from_fn("text", |_| Ok("<p>second</p>".to_string())))
		.unwrap();

	// Assert
	assert_eq!(registry.names().iter().filter(|n| n.eq_ignore_ascii_case("text")).count(), 1);
	assert_eq!(builder.render(&page).html, "<p>second</p>");
}

#[rstest]
#[case("backgroundColor", "Background Color")]
#[case("ctaText", "Cta Text")]
#[case("title", "Title")]
fn test_labels_are_humanized(builder: PageBuilder, #[case] field: &str, #[case] label: &str) {
	// Act
	let fields = builder.fields_for("Hero").unwrap();

	// Assert
	assert_eq!(fields.get(field).unwrap().label, label);
}

#[rstest]
fn test_select_and_boolean_widgets() {
	// Arrange
	let schema = Schema::builder()
		.field("align", SchemaType::enumeration(["left", "center", "right"]))
		.field("showCta", SchemaType::boolean().with_default(json!(true)))
		.build()
		.unwrap();

	// Act
	let fields = generate_fields(&schema, &FieldHints::default());

	// Assert
	let align = fields.get("align").unwrap();
	assert_eq!(align.widget, WidgetKind::Select);
	let options: Vec<_> = align
		.options
		.iter()
		.map(|o| (o.value.as_str(), o.label.as_str()))
		.collect();
	assert_eq!(
		options,
		vec![("left", "Left"), ("center", "Center"), ("right", "Right")]
	);

	let show_cta = fields.get("showCta").unwrap();
	assert_eq!(show_cta.widget, WidgetKind::Boolean);
	assert_eq!(show_cta.default_value, Some(json!(true)));
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_unknown_type(builder: PageBuilder, #[case] edit_mode: bool) {
	// Arrange
	let page = PageConfig::new("en", edit_mode)
		.component(text("a", 0, "before"))
		.component(ComponentInstance::new("MysteryWidget").with_id("m").order(1))
		.component(text("b", 2, "after"));

	// Act
	let report = builder.render(&page);

	// Assert
	assert!(report.html.contains("<p>before</p>"));
	assert!(report.html.contains("<p>after</p>"));
	assert_eq!(report.html.contains("MysteryWidget"), edit_mode);
	assert_eq!(report.instance("m").unwrap().state, InstanceState::Unknown);
	if !edit_mode {
		assert_eq!(report.html, "<p>before</p><p>after</p>");
	}
}

#[rstest]
#[case("Broken", "data source offline")]
#[case("Exploding", "index out of bounds")]
fn test_failure_isolated_to_instance(
	builder: PageBuilder,
	#[case] failing_type: &str,
	#[case] message: &str,
) {
	// Arrange
	let page = PageConfig::new("en", true)
		.component(text("first", 1, "one"))
		.component(ComponentInstance::new(failing_type).with_id("second").order(2))
		.component(text("third", 3, "three"));

	// Act
	let report = builder.render(&page);

	// Assert
	assert!(report.html.contains("<p>one</p>"));
	assert!(report.html.contains("<p>three</p>"));
	assert!(report.html.contains(message));
	let states: Vec<_> = ["first", "second", "third"]
		.iter()
		.map(|id| report.instance(id).unwrap().state)
		.collect();
	assert_eq!(
		states,
		vec![InstanceState::Resolved, InstanceState::Error, InstanceState::Resolved]
	);
}

#[rstest]
fn test_failure_hidden_from_viewers(builder: PageBuilder) {
	// Arrange
	let page = PageConfig::new("en", false)
		.component(text("first", 1, "one"))
		.component(ComponentInstance::new("Broken").with_id("second").order(2))
		.component(text("third", 3, "three"));

	// Act
	let report = builder.render(&page);

	// Assert
	assert_eq!(
		report.html,
		"<p>one</p><div class=\"pb-unavailable\">Content unavailable</div><p>three</p>"
	);
	assert!(!report.html.contains("data source offline"));
}

#[rstest]
fn test_render_follows_order(builder: PageBuilder) {
	// Arrange
	let page = PageConfig::new("en", false)
		.component(text("c", 3, "three"))
		.component(text("a", 1, "one"))
		.component(text("b", 2, "two"));

	// Act
	let report = builder.render(&page);

	// Assert
	assert_eq!(report.html, "<p>one</p><p>two</p><p>three</p>");
	assert_eq!(report.rendered_ids(), vec!["a", "b", "c"]);
}

#[rstest]
fn test_title_edit_preserves_other_props(builder: PageBuilder) {
	// Arrange
	let mut page = PageConfig::new("en", true).component(
		ComponentInstance::new("Hero")
			.with_id("hero")
			.prop("title", "Old Title")
			.prop("ctaText", "Sign up")
			.prop("backgroundColor", "#ff0000"),
	);

	// Act
	builder
		.edit(&mut page, "hero", [("title", EditValue::text("New Title"))])
		.unwrap();

	// Assert
	let props = &page.find("hero").unwrap().props;
	assert_eq!(props["title"], json!("New Title"));
	assert_eq!(props["ctaText"], json!("Sign up"));
	assert_eq!(props["backgroundColor"], json!("#ff0000"));
	assert_eq!(props.len(), 3);
}

proptest! {
	#[test]
	fn generated_fields_keep_declaration_order(
		names in proptest::collection::hash_set("[a-z][a-zA-Z]{0,7}", 1..10),
	) {
		let names: Vec<String> = names.into_iter().collect();
		let schema = names
			.iter()
			.fold(Schema::builder(), |builder, name| builder.field(name.clone(), SchemaType::string()))
			.build()
			.unwrap();

		let fields = generate_fields(&schema, &FieldHints::default());

		let generated: Vec<&str> = fields.names().collect();
		let declared: Vec<&str> = names.iter().map(String::as_str).collect();
		prop_assert_eq!(generated, declared);
	}
}

//! Property editor panel: builds forms and merges edits into instances.

use crate::error::{EditorError, EditorResult};
use crate::form::{EditorControl, EditorForm};
use crate::value::{EditValue, coerce};
use reinhardt_pagebuilder_registry::ComponentRegistry;
use reinhardt_pagebuilder_render::ComponentInstance;
use reinhardt_pagebuilder_schema::FieldSet;
use serde_json::Value;
use std::sync::Arc;

/// Edits the props of component instances using registry schemas.
///
/// Edits use merge semantics: only the edited keys change, every other prop
/// is carried over untouched.
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder_editor::{EditValue, PropertyEditor};
/// use reinhardt_pagebuilder_registry::{ComponentRegistry, Registration};
/// use reinhardt_pagebuilder_render::ComponentInstance;
/// use reinhardt_pagebuilder_schema::{Schema, SchemaType};
///
/// let registry = ComponentRegistry::builder()
/// 	.register(
/// 		Registration::from_fn("Hero", |_| Ok(String::new())).schema(
/// 			Schema::builder()
/// 				.field("title", SchemaType::string())
/// 				.field("subtitle", SchemaType::string().optional())
/// 				.build()
/// 				.unwrap(),
/// 		),
/// 	)
/// 	.build()
/// 	.unwrap();
///
/// let instance = ComponentInstance::new("Hero")
/// 	.prop("title", "Old")
/// 	.prop("subtitle", "Kept");
/// let edited = PropertyEditor::new(registry)
/// 	.apply_edit(&instance, "title", EditValue::text("New Title"))
/// 	.unwrap();
///
/// assert_eq!(edited.props["title"], "New Title");
/// assert_eq!(edited.props["subtitle"], "Kept");
/// ```
#[derive(Debug, Clone)]
pub struct PropertyEditor {
	registry: Arc<ComponentRegistry>,
}

impl PropertyEditor {
	/// Creates an editor backed by `registry`.
	pub fn new(registry: Arc<ComponentRegistry>) -> Self {
		Self { registry }
	}

	/// Editable fields of an instance's type, and whether it declares a schema.
	/// Schemaless types accept free-form props.
	fn fields(&self, instance: &ComponentInstance) -> EditorResult<(FieldSet, bool)> {
		let component = self
			.registry
			.get(&instance.type_name)
			.ok_or_else(|| EditorError::UnknownComponent(instance.type_name.clone()))?;
		let has_schema = component.schema().is_some();
		let fields = self
			.registry
			.fields_for(&instance.type_name)
			.unwrap_or_default();
		Ok((fields, has_schema))
	}

	/// Builds the editing form for an instance.
	///
	/// # Errors
	///
	/// Returns [`EditorError::UnknownComponent`] if the type is not registered.
	pub fn form(&self, instance: &ComponentInstance) -> EditorResult<EditorForm> {
		let (fields, _) = self.fields(instance)?;
		let controls = fields
			.fields
			.into_values()
			.map(|field| {
				let current = instance.props.get(&field.field_name);
				EditorControl::seed(field, current)
			})
			.collect();

		Ok(EditorForm {
			instance_id: instance.id.clone(),
			type_name: instance.type_name.clone(),
			controls,
		})
	}

	/// Applies one edit, returning the updated instance.
	///
	/// # Errors
	///
	/// Returns an error for unknown types, unknown fields (when the type has a
	/// schema) or unparseable input. The input instance is never modified.
	pub fn apply_edit(
		&self,
		instance: &ComponentInstance,
		field: &str,
		value: impl Into<EditValue>,
	) -> EditorResult<ComponentInstance> {
		self.apply_edits(instance, [(field, value.into())])
	}

	/// Applies several edits atomically: either all are committed or none.
	///
	/// # Errors
	///
	/// Returns the first failing edit's error.
	pub fn apply_edits<I, K>(
		&self,
		instance: &ComponentInstance,
		edits: I,
	) -> EditorResult<ComponentInstance>
	where
		I: IntoIterator<Item = (K, EditValue)>,
		K: AsRef<str>,
	{
		let (fields, has_schema) = self.fields(instance)?;

		let mut staged: Vec<(String, Value)> = Vec::new();
		for (name, value) in edits {
			let name = name.as_ref();
			let field = fields.get(name);
			if field.is_none() && has_schema {
				return Err(EditorError::UnknownField {
					component: instance.type_name.clone(),
					field: name.to_string(),
				});
			}
			let value = coerce(name, field, value).inspect_err(|error| {
				tracing::debug!(instance_id = %instance.id, field = name, %error, "edit rejected");
			})?;
			staged.push((name.to_string(), value));
		}

		let mut updated = instance.clone();
		for (name, value) in staged {
			updated.props.insert(name, value);
		}
		tracing::debug!(instance_id = %instance.id, component = %instance.type_name, "props edited");
		Ok(updated)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use reinhardt_pagebuilder_registry::Registration;
	use reinhardt_pagebuilder_schema::{Schema, SchemaType};
	use rstest::{fixture, rstest};
	use serde_json::json;

	#[fixture]
	fn editor() -> PropertyEditor {
		let registry = ComponentRegistry::builder()
			.register(
				Registration::from_fn("Hero", |_| Ok(String::new())).schema(
					Schema::builder()
						.field("title", SchemaType::string())
						.field("columns", SchemaType::integer().optional())
						.field("links", SchemaType::array(SchemaType::string()).optional())
						.field("onClick", SchemaType::function())
						.build()
						.unwrap(),
				),
			)
			.register(Registration::from_fn("Embed", |_| Ok(String::new())))
			.build()
			.unwrap();
		PropertyEditor::new(registry)
	}

	fn hero() -> ComponentInstance {
		ComponentInstance::new("Hero")
			.with_id("h")
			.prop("title", "Old")
			.prop("links", json!(["/a"]))
			.prop("legacy", "kept")
	}

	#[rstest]
	fn test_form_follows_schema_order(editor: PropertyEditor) {
		// Act
		let form = editor.form(&hero()).unwrap();

		// Assert
		let names: Vec<_> = form.controls.iter().map(|c| c.field.field_name.as_str()).collect();
		assert_eq!(names, vec!["title", "columns", "links"]);
		assert_eq!(form.control("links").unwrap().text, "[\n  \"/a\"\n]");
		assert!(form.render_html().starts_with("<form class=\"pb-property-editor\" data-component-id=\"h\""));
	}

	#[rstest]
	fn test_edit_merges(editor: PropertyEditor) {
		// Act
		let edited = editor.apply_edit(&hero(), "title", "New Title").unwrap();

		// Assert
		assert_eq!(edited.props["title"], json!("New Title"));
		assert_eq!(edited.props["links"], json!(["/a"]));
		assert_eq!(edited.props["legacy"], json!("kept"));
		assert_eq!(edited.id, "h");
	}

	#[rstest]
	fn test_batch_is_all_or_nothing(editor: PropertyEditor) {
		// Arrange
		let original = hero();

		// Act
		let result = editor.apply_edits(
			&original,
			[
				("title", EditValue::text("Changed")),
				("links", EditValue::text("[not json")),
			],
		);

		// Assert
		assert!(matches!(result, Err(EditorError::InvalidJson { .. })));
		assert_eq!(original.props["title"], json!("Old"));
	}

	#[rstest]
	#[case("subtitle")]
	#[case("onClick")]
	fn test_unknown_field_rejected(editor: PropertyEditor, #[case] field: &str) {
		// Act
		let err = editor.apply_edit(&hero(), field, "x").unwrap_err();

		// Assert
		assert_eq!(
			err,
			EditorError::UnknownField {
				component: "Hero".to_string(),
				field: field.to_string(),
			}
		);
	}

	#[rstest]
	fn test_schemaless_accepts_free_form(editor: PropertyEditor) {
		// Arrange
		let embed = ComponentInstance::new("Embed");

		// Act
		let edited = editor
			.apply_edits(
				&embed,
				[
					("src", EditValue::text("https://example.com")),
					("height", EditValue::Json(json!(300))),
				],
			)
			.unwrap();

		// Assert
		assert_eq!(edited.props["src"], json!("https://example.com"));
		assert_eq!(edited.props["height"], json!(300));
		assert!(editor.form(&embed).unwrap().controls.is_empty());
	}

	#[rstest]
	fn test_unregistered_type(editor: PropertyEditor) {
		// Act
		let err = editor.form(&ComponentInstance::new("Ghost")).unwrap_err();

		// Assert
		assert_eq!(err, EditorError::UnknownComponent("Ghost".to_string()));
	}
}

//! Schema-to-editor-field generation.
//!
//! [`generate_fields`] is a pure function from a [`Schema`] to an ordered
//! [`FieldSet`] describing the input control needed to edit each prop.
//!
//! # Architecture
//!
//! ```text
//! SchemaType (after unwrapping Optional/Default)  →  WidgetKind
//! ────────────────────────────────────────────────────────────
//! String { enum_values: Some(..) }                →  Select
//! String, name contains a color hint              →  Color
//! String, name contains a url hint                →  Url
//! String, name contains a long-form hint          →  Textarea
//! String                                          →  Text
//! Number                                          →  Number
//! Boolean                                         →  Boolean
//! Array / Object                                  →  Textarea (JSON)
//! Function                                        →  (excluded)
//! Unknown                                         →  Text
//! ```

use crate::schema::{Schema, SchemaType};
use crate::text::{humanize_field_name, humanize_option_label};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of input control used to edit a prop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
	/// Single-line text input.
	Text,
	/// Multi-line text input. Also used for JSON editing.
	Textarea,
	/// Numeric input.
	Number,
	/// Checkbox.
	Boolean,
	/// Drop-down of fixed options.
	Select,
	/// Color picker.
	Color,
	/// URL input.
	Url,
}

impl WidgetKind {
	/// Lowercase widget name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Text => "text",
			Self::Textarea => "textarea",
			Self::Number => "number",
			Self::Boolean => "boolean",
			Self::Select => "select",
			Self::Color => "color",
			Self::Url => "url",
		}
	}
}

/// One option of a select widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
	/// Raw enumerated value.
	pub value: String,
	/// Human-readable label.
	pub label: String,
}

/// Declarative description of one editable prop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescription {
	/// Prop name.
	pub field_name: String,
	/// Control kind.
	pub widget: WidgetKind,
	/// Human-readable label.
	pub label: String,
	/// Help text from the schema.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
	/// `false` when the schema wraps the field in `Optional`.
	pub required: bool,
	/// Declared default value.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub default_value: Option<Value>,
	/// Options for select widgets.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub options: Vec<FieldOption>,
	/// Lower bound for number widgets.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,
	/// Upper bound for number widgets.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,
	/// Step for number widgets.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,
	/// Number widgets accept whole numbers only.
	#[serde(default, skip_serializing_if = "std::ops::Not::not")]
	pub integer: bool,
	/// The textarea holds serialized JSON that must be parsed back on save.
	#[serde(default)]
	pub json: bool,
}

impl FieldDescription {
	fn new(field_name: &str, widget: WidgetKind) -> Self {
		Self {
			field_name: field_name.to_string(),
			widget,
			label: humanize_field_name(field_name),
			description: None,
			required: true,
			default_value: None,
			options: Vec::new(),
			min: None,
			max: None,
			step: None,
			integer: false,
			json: false,
		}
	}
}

/// Ordered mapping of prop name to [`FieldDescription`].
///
/// Serializes as `{ "fields": { name: description, ... } }` with keys in
/// schema declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldSet {
	/// Field descriptions keyed by prop name.
	pub fields: IndexMap<String, FieldDescription>,
}

impl FieldSet {
	/// Looks up a field by name.
	pub fn get(&self, name: &str) -> Option<&FieldDescription> {
		self.fields.get(name)
	}

	/// Field names in declaration order.
	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.fields.keys().map(String::as_str)
	}

	/// Iterates descriptions in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = &FieldDescription> {
		self.fields.values()
	}

	/// Number of editable fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns `true` when there is nothing to edit.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}
}

/// Field-name substrings used to pick a widget for plain strings.
///
/// Matching is case-insensitive and checked in the order color, url, textarea.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldHints {
	/// Substrings selecting the color widget.
	pub color: Vec<String>,
	/// Substrings selecting the url widget.
	pub url: Vec<String>,
	/// Substrings selecting the textarea widget.
	pub textarea: Vec<String>,
}

impl Default for FieldHints {
	fn default() -> Self {
		Self {
			color: vec!["color".to_string()],
			url: vec!["url".to_string(), "href".to_string(), "link".to_string()],
			textarea: vec!["description".to_string(), "content".to_string()],
		}
	}
}

impl FieldHints {
	fn string_widget(&self, field_name: &str) -> WidgetKind {
		let lowered = field_name.to_lowercase();
		let matches = |hints: &[String]| {
			hints
				.iter()
				.any(|hint| !hint.is_empty() && lowered.contains(&hint.to_lowercase()))
		};

		if matches(&self.color) {
			WidgetKind::Color
		} else if matches(&self.url) {
			WidgetKind::Url
		} else if matches(&self.textarea) {
			WidgetKind::Textarea
		} else {
			WidgetKind::Text
		}
	}
}

/// Generates editor field descriptions for every editable prop of `schema`.
///
/// Function-typed fields are excluded. Every other field yields exactly one
/// description, in declaration order; descriptors that cannot be classified
/// fall back to a text widget rather than being dropped.
///
/// # Examples
///
/// ```
/// use reinhardt_pagebuilder_schema::{FieldHints, Schema, SchemaType, WidgetKind, generate_fields};
///
/// let schema = Schema::builder()
/// 	.field("backgroundColor", SchemaType::string())
/// 	.field("onClick", SchemaType::function())
/// 	.build()
/// 	.unwrap();
///
/// let fields = generate_fields(&schema, &FieldHints::default());
/// let field = fields.get("backgroundColor").unwrap();
/// assert_eq!(field.widget, WidgetKind::Color);
/// assert_eq!(field.label, "Background Color");
/// assert!(fields.get("onClick").is_none());
/// ```
pub fn generate_fields(schema: &Schema, hints: &FieldHints) -> FieldSet {
	let mut fields = IndexMap::with_capacity(schema.len());

	for field in schema.fields() {
		let unwrapped = field.ty.unwrap_modifiers();

		let mut description = match unwrapped.inner {
			SchemaType::Function => continue,
			SchemaType::String {
				enum_values: Some(values),
				..
			} => {
				let mut description = FieldDescription::new(&field.name, WidgetKind::Select);
				description.options = values
					.iter()
					.map(|value| FieldOption {
						value: value.clone(),
						label: humanize_option_label(value),
					})
					.collect();
				description
			}
			SchemaType::String {
				enum_values: None,
				..
			} => FieldDescription::new(&field.name, hints.string_widget(&field.name)),
			SchemaType::Number {
				min,
				max,
				step,
				integer,
			} => {
				let mut description = FieldDescription::new(&field.name, WidgetKind::Number);
				description.min = *min;
				description.max = *max;
				description.step = *step;
				description.integer = *integer;
				description
			}
			SchemaType::Boolean => FieldDescription::new(&field.name, WidgetKind::Boolean),
			SchemaType::Array { .. } | SchemaType::Object { .. } => {
				let mut description = FieldDescription::new(&field.name, WidgetKind::Textarea);
				description.json = true;
				description
			}
			SchemaType::Unknown { tag } => {
				tracing::debug!(
					field = %field.name,
					tag = %tag,
					"unclassified schema descriptor, falling back to text widget"
				);
				FieldDescription::new(&field.name, WidgetKind::Text)
			}
			SchemaType::Optional { .. } | SchemaType::Default { .. } => {
				unreachable!("schema modifiers are unwrapped before widget selection")
			}
		};

		description.required = !unwrapped.optional;
		description.default_value = unwrapped.default.cloned();
		description.description = field.description.clone();
		fields.insert(field.name.clone(), description);
	}

	FieldSet { fields }
}

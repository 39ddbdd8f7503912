//! Closed, explicitly tagged schema descriptions for component props.
//!
//! A [`Schema`] is an ordered list of named fields. Declaration order is part
//! of the contract: generated editor fields and validation issues are always
//! reported in the order the fields were declared.
//!
//! # Example
//!
//! ```
//! use reinhardt_pagebuilder_schema::{Schema, SchemaType};
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//! 	.field("title", SchemaType::string())
//! 	.field("align", SchemaType::enumeration(["left", "center", "right"]).with_default(json!("left")))
//! 	.field("showCta", SchemaType::boolean().optional())
//! 	.build()
//! 	.unwrap();
//!
//! assert_eq!(schema.field_names().collect::<Vec<_>>(), vec!["title", "align", "showCta"]);
//! assert_eq!(schema.defaults().get("align"), Some(&json!("left")));
//! ```

use crate::error::{SchemaError, SchemaResult};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Type descriptor for a single schema field.
///
/// `Optional` and `Default` are wrappers; every other variant is a leaf or a
/// container. `Unknown` carries a free-form tag for descriptors this crate
/// cannot classify (they still produce an editable text field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum SchemaType {
	/// String value, optionally restricted to an enumerated set.
	#[serde(rename_all = "camelCase")]
	String {
		/// Allowed values when the string is an enumeration.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		enum_values: Option<Vec<String>>,
		/// Minimum length in characters.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		min_length: Option<usize>,
		/// Maximum length in characters.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		max_length: Option<usize>,
	},
	/// Numeric value.
	Number {
		/// Inclusive lower bound.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		min: Option<f64>,
		/// Inclusive upper bound.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		max: Option<f64>,
		/// Editor step.
		#[serde(default, skip_serializing_if = "Option::is_none")]
		step: Option<f64>,
		/// Whether only whole numbers are accepted.
		#[serde(default)]
		integer: bool,
	},
	/// Boolean flag.
	Boolean,
	/// The wrapped type may be absent or null.
	Optional {
		/// Wrapped type.
		inner: Box<SchemaType>,
	},
	/// The wrapped type has a declared default value.
	Default {
		/// Wrapped type.
		inner: Box<SchemaType>,
		/// Default used when the prop is omitted.
		value: Value,
	},
	/// Homogeneous list.
	Array {
		/// Element type.
		items: Box<SchemaType>,
	},
	/// Nested object with its own ordered fields.
	Object {
		/// Nested schema.
		schema: Schema,
	},
	/// Callback prop. Never user-editable.
	Function,
	/// Descriptor that could not be classified.
	Unknown {
		/// Original descriptor tag, for diagnostics.
		tag: String,
	},
}

impl SchemaType {
	/// Plain string.
	pub fn string() -> Self {
		Self::String {
			enum_values: None,
			min_length: None,
			max_length: None,
		}
	}

	/// String restricted to the given values.
	pub fn enumeration<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::String {
			enum_values: Some(values.into_iter().map(Into::into).collect()),
			min_length: None,
			max_length: None,
		}
	}

	/// Unbounded number.
	pub fn number() -> Self {
		Self::Number {
			min: None,
			max: None,
			step: None,
			integer: false,
		}
	}

	/// Whole number.
	pub fn integer() -> Self {
		Self::Number {
			min: None,
			max: None,
			step: Some(1.0),
			integer: true,
		}
	}

	/// Boolean flag.
	pub fn boolean() -> Self {
		Self::Boolean
	}

	/// Callback prop.
	pub fn function() -> Self {
		Self::Function
	}

	/// List of `items`.
	pub fn array(items: SchemaType) -> Self {
		Self::Array {
			items: Box::new(items),
		}
	}

	/// Nested object.
	pub fn object(schema: Schema) -> Self {
		Self::Object { schema }
	}

	/// Unclassifiable descriptor.
	pub fn unknown(tag: impl Into<String>) -> Self {
		Self::Unknown { tag: tag.into() }
	}

	/// Wraps `self` so the prop may be omitted.
	pub fn optional(self) -> Self {
		Self::Optional {
			inner: Box::new(self),
		}
	}

	/// Wraps `self` with a default value.
	pub fn with_default(self, value: impl Into<Value>) -> Self {
		Self::Default {
			inner: Box::new(self),
			value: value.into(),
		}
	}

	/// Sets the lower bound of the innermost number type.
	pub fn min(mut self, bound: f64) -> Self {
		if let Self::Number { min, .. } = self.innermost_mut() {
			*min = Some(bound);
		}
		self
	}

	/// Sets the upper bound of the innermost number type.
	pub fn max(mut self, bound: f64) -> Self {
		if let Self::Number { max, .. } = self.innermost_mut() {
			*max = Some(bound);
		}
		self
	}

	/// Sets the editor step of the innermost number type.
	pub fn step(mut self, value: f64) -> Self {
		if let Self::Number { step, .. } = self.innermost_mut() {
			*step = Some(value);
		}
		self
	}

	/// Sets the minimum length of the innermost string type.
	pub fn min_length(mut self, len: usize) -> Self {
		if let Self::String { min_length, .. } = self.innermost_mut() {
			*min_length = Some(len);
		}
		self
	}

	/// Sets the maximum length of the innermost string type.
	pub fn max_length(mut self, len: usize) -> Self {
		if let Self::String { max_length, .. } = self.innermost_mut() {
			*max_length = Some(len);
		}
		self
	}

	/// Strips `Optional` and `Default` wrappers.
	///
	/// Returns the inner type, whether an `Optional` wrapper was seen, and the
	/// outermost declared default.
	pub fn unwrap_modifiers(&self) -> Unwrapped<'_> {
		let mut optional = false;
		let mut default = None;
		let mut current = self;

		loop {
			match current {
				Self::Optional { inner } => {
					optional = true;
					current = inner;
				}
				Self::Default { inner, value } => {
					if default.is_none() {
						default = Some(value);
					}
					current = inner;
				}
				_ => break,
			}
		}

		Unwrapped {
			inner: current,
			optional,
			default,
		}
	}

	fn innermost_mut(&mut self) -> &mut SchemaType {
		match self {
			Self::Optional { inner } | Self::Default { inner, .. } => inner.innermost_mut(),
			other => other,
		}
	}
}

/// Result of [`SchemaType::unwrap_modifiers`].
#[derive(Debug, Clone, Copy)]
pub struct Unwrapped<'a> {
	/// Type with all wrappers removed.
	pub inner: &'a SchemaType,
	/// Whether an `Optional` wrapper was present.
	pub optional: bool,
	/// Outermost declared default, if any.
	pub default: Option<&'a Value>,
}

/// One named field of a [`Schema`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaField {
	/// Prop name as it appears in the component's props.
	pub name: String,
	/// Type descriptor.
	#[serde(rename = "type")]
	pub ty: SchemaType,
	/// Help text shown next to the editor control.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl SchemaField {
	/// Creates a field without a description.
	pub fn new(name: impl Into<String>, ty: SchemaType) -> Self {
		Self {
			name: name.into(),
			ty,
			description: None,
		}
	}

	/// Sets the help text.
	pub fn description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Ordered collection of prop fields.
///
/// Deserialization applies the same checks as [`SchemaBuilder::build`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<SchemaField>", into = "Vec<SchemaField>")]
pub struct Schema {
	fields: Vec<SchemaField>,
}

impl TryFrom<Vec<SchemaField>> for Schema {
	type Error = SchemaError;

	fn try_from(fields: Vec<SchemaField>) -> SchemaResult<Self> {
		SchemaBuilder { fields }.build()
	}
}

impl From<Schema> for Vec<SchemaField> {
	fn from(schema: Schema) -> Self {
		schema.fields
	}
}

impl Schema {
	/// Creates a schema builder.
	pub fn builder() -> SchemaBuilder {
		SchemaBuilder::default()
	}

	/// Returns the fields in declaration order.
	pub fn fields(&self) -> &[SchemaField] {
		&self.fields
	}

	/// Returns field names in declaration order.
	pub fn field_names(&self) -> impl Iterator<Item = &str> {
		self.fields.iter().map(|f| f.name.as_str())
	}

	/// Looks up a field by exact name.
	pub fn field(&self, name: &str) -> Option<&SchemaField> {
		self.fields.iter().find(|f| f.name == name)
	}

	/// Number of declared fields.
	pub fn len(&self) -> usize {
		self.fields.len()
	}

	/// Returns `true` when no fields are declared.
	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	/// Top-level declared defaults, in declaration order.
	pub fn defaults(&self) -> IndexMap<String, Value> {
		self.fields
			.iter()
			.filter_map(|field| {
				field
					.ty
					.unwrap_modifiers()
					.default
					.map(|value| (field.name.clone(), value.clone()))
			})
			.collect()
	}
}

/// Builder for [`Schema`].
#[derive(Debug, Default)]
pub struct SchemaBuilder {
	fields: Vec<SchemaField>,
}

impl SchemaBuilder {
	/// Declares a field.
	pub fn field(mut self, name: impl Into<String>, ty: SchemaType) -> Self {
		self.fields.push(SchemaField::new(name, ty));
		self
	}

	/// Declares a field with help text.
	pub fn described_field(
		mut self,
		name: impl Into<String>,
		ty: SchemaType,
		description: impl Into<String>,
	) -> Self {
		self.fields
			.push(SchemaField::new(name, ty).description(description));
		self
	}

	/// Appends a prebuilt field.
	pub fn push(mut self, field: SchemaField) -> Self {
		self.fields.push(field);
		self
	}

	/// Builds the schema.
	///
	/// # Errors
	///
	/// Returns an error if a field name is empty or declared twice.
	pub fn build(self) -> SchemaResult<Schema> {
		let mut seen = HashSet::with_capacity(self.fields.len());
		for field in &self.fields {
			if field.name.trim().is_empty() {
				return Err(SchemaError::EmptyFieldName);
			}
			if !seen.insert(field.name.as_str()) {
				return Err(SchemaError::DuplicateField(field.name.clone()));
			}
		}

		Ok(Schema {
			fields: self.fields,
		})
	}
}

//! Prop validation against a [`Schema`].
//!
//! Validation never panics and never stops at the first problem: every issue
//! found is collected, in field declaration order, so callers can surface the
//! full list as a developer warning.

use crate::schema::{Schema, SchemaType};
use serde_json::{Map, Value};
use std::fmt;

/// What went wrong with a single prop.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum IssueKind {
	/// A required prop is absent or null.
	Missing,
	/// The value has the wrong JSON type.
	TypeMismatch {
		/// Expected type name.
		expected: &'static str,
		/// Actual type name.
		found: &'static str,
	},
	/// The value is not one of the enumerated strings.
	NotInEnum {
		/// Allowed values.
		allowed: Vec<String>,
	},
	/// A number fell below the declared minimum.
	BelowMinimum(f64),
	/// A number exceeded the declared maximum.
	AboveMaximum(f64),
	/// A number had a fractional part where an integer was required.
	NotInteger,
	/// A string was shorter than the declared minimum length.
	TooShort(usize),
	/// A string was longer than the declared maximum length.
	TooLong(usize),
}

/// A single validation problem at a prop path such as `items[2].title`.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
	/// Dotted path to the offending value.
	pub path: String,
	/// The problem found.
	pub kind: IssueKind,
}

impl fmt::Display for ValidationIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match &self.kind {
			IssueKind::Missing => write!(f, "{}: required value is missing", self.path),
			IssueKind::TypeMismatch { expected, found } => {
				write!(f, "{}: expected {}, found {}", self.path, expected, found)
			}
			IssueKind::NotInEnum { allowed } => write!(
				f,
				"{}: value must be one of [{}]",
				self.path,
				allowed.join(", ")
			),
			IssueKind::BelowMinimum(min) => write!(f, "{}: must be >= {}", self.path, min),
			IssueKind::AboveMaximum(max) => write!(f, "{}: must be <= {}", self.path, max),
			IssueKind::NotInteger => write!(f, "{}: must be a whole number", self.path),
			IssueKind::TooShort(len) => {
				write!(f, "{}: must be at least {} characters", self.path, len)
			}
			IssueKind::TooLong(len) => {
				write!(f, "{}: must be at most {} characters", self.path, len)
			}
		}
	}
}

impl Schema {
	/// Validates a props object.
	///
	/// Function-typed fields and props not declared in the schema are ignored.
	///
	/// # Errors
	///
	/// Returns every issue found, in declaration order.
	pub fn validate(&self, props: &Map<String, Value>) -> Result<(), Vec<ValidationIssue>> {
		let mut issues = Vec::new();
		check_object(self, props, "", &mut issues);
		if issues.is_empty() {
			Ok(())
		} else {
			Err(issues)
		}
	}
}

fn check_object(
	schema: &Schema,
	props: &Map<String, Value>,
	prefix: &str,
	issues: &mut Vec<ValidationIssue>,
) {
	for field in schema.fields() {
		let path = if prefix.is_empty() {
			field.name.clone()
		} else {
			format!("{}.{}", prefix, field.name)
		};
		check_value(&field.ty, props.get(&field.name), &path, issues);
	}
}

fn check_value(ty: &SchemaType, value: Option<&Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
	let unwrapped = ty.unwrap_modifiers();
	let value = match value {
		None | Some(Value::Null) => {
			if !unwrapped.optional
				&& unwrapped.default.is_none()
				&& !matches!(unwrapped.inner, SchemaType::Function | SchemaType::Unknown { .. })
			{
				issues.push(issue(path, IssueKind::Missing));
			}
			return;
		}
		Some(value) => value,
	};

	match unwrapped.inner {
		SchemaType::String {
			enum_values,
			min_length,
			max_length,
		} => {
			let Some(text) = value.as_str() else {
				issues.push(mismatch(path, "string", value));
				return;
			};
			if let Some(allowed) = enum_values
				&& !allowed.iter().any(|v| v == text)
			{
				issues.push(issue(
					path,
					IssueKind::NotInEnum {
						allowed: allowed.clone(),
					},
				));
			}
			let len = text.chars().count();
			if let Some(min) = min_length
				&& len < *min
			{
				issues.push(issue(path, IssueKind::TooShort(*min)));
			}
			if let Some(max) = max_length
				&& len > *max
			{
				issues.push(issue(path, IssueKind::TooLong(*max)));
			}
		}
		SchemaType::Number {
			min, max, integer, ..
		} => {
			let Some(number) = value.as_f64() else {
				issues.push(mismatch(path, "number", value));
				return;
			};
			if *integer && number.fract() != 0.0 {
				issues.push(issue(path, IssueKind::NotInteger));
			}
			if let Some(min) = min
				&& number < *min
			{
				issues.push(issue(path, IssueKind::BelowMinimum(*min)));
			}
			if let Some(max) = max
				&& number > *max
			{
				issues.push(issue(path, IssueKind::AboveMaximum(*max)));
			}
		}
		SchemaType::Boolean => {
			if !value.is_boolean() {
				issues.push(mismatch(path, "boolean", value));
			}
		}
		SchemaType::Array { items } => {
			let Some(elements) = value.as_array() else {
				issues.push(mismatch(path, "array", value));
				return;
			};
			for (index, element) in elements.iter().enumerate() {
				check_value(items, Some(element), &format!("{}[{}]", path, index), issues);
			}
		}
		SchemaType::Object { schema } => {
			let Some(nested) = value.as_object() else {
				issues.push(mismatch(path, "object", value));
				return;
			};
			check_object(schema, nested, path, issues);
		}
		SchemaType::Function | SchemaType::Unknown { .. } => {}
		// unwrap_modifiers never yields a wrapper
		SchemaType::Optional { .. } | SchemaType::Default { .. } => {}
	}
}

fn issue(path: &str, kind: IssueKind) -> ValidationIssue {
	ValidationIssue {
		path: path.to_string(),
		kind,
	}
}

fn mismatch(path: &str, expected: &'static str, value: &Value) -> ValidationIssue {
	issue(
		path,
		IssueKind::TypeMismatch {
			expected,
			found: json_type_name(value),
		},
	)
}

/// Name of a JSON value's type, as used in validation messages.
pub fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}

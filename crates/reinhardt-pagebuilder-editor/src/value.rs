//! Conversion of operator input into prop values.

use crate::error::{EditorError, EditorResult};
use reinhardt_pagebuilder_conf::sources::parse_bool;
use reinhardt_pagebuilder_schema::{FieldDescription, WidgetKind};
use serde_json::{Number, Value};

/// A value submitted from an editor control.
#[derive(Debug, Clone, PartialEq)]
pub enum EditValue {
	/// An already-structured value, committed as-is.
	Json(Value),
	/// Raw control text, parsed according to the field's widget.
	Text(String),
}

impl EditValue {
	/// Creates a text value.
	pub fn text(text: impl Into<String>) -> Self {
		Self::Text(text.into())
	}
}

impl From<Value> for EditValue {
	fn from(value: Value) -> Self {
		Self::Json(value)
	}
}

impl From<&str> for EditValue {
	fn from(text: &str) -> Self {
		Self::Text(text.to_string())
	}
}

impl From<String> for EditValue {
	fn from(text: String) -> Self {
		Self::Text(text)
	}
}

/// Converts an edit into the value to store.
///
/// `field` is `None` for free-form props of schemaless components, which are
/// stored as strings.
///
/// # Errors
///
/// Returns an error when text does not parse for the field's widget; the
/// caller must not commit anything in that case.
pub fn coerce(name: &str, field: Option<&FieldDescription>, value: EditValue) -> EditorResult<Value> {
	let text = match value {
		EditValue::Json(value) => return Ok(value),
		EditValue::Text(text) => text,
	};
	let Some(field) = field else {
		return Ok(Value::String(text));
	};

	if !field.required && text.trim().is_empty() && clears_when_empty(field) {
		return Ok(Value::Null);
	}

	if field.json {
		return serde_json::from_str(&text).map_err(|e| EditorError::InvalidJson {
			field: name.to_string(),
			message: e.to_string(),
		});
	}

	match field.widget {
		WidgetKind::Number => parse_number(name, field, &text),
		WidgetKind::Boolean => parse_bool(&text)
			.map(Value::Bool)
			.map_err(|_| EditorError::InvalidBoolean {
				field: name.to_string(),
				value: text,
			}),
		WidgetKind::Select => {
			if field.options.is_empty() || field.options.iter().any(|o| o.value == text) {
				Ok(Value::String(text))
			} else {
				Err(EditorError::InvalidOption {
					field: name.to_string(),
					value: text,
				})
			}
		}
		WidgetKind::Text | WidgetKind::Textarea | WidgetKind::Color | WidgetKind::Url => {
			Ok(Value::String(text))
		}
	}
}

/// Optional non-text fields store `null` for blank input; text widgets keep
/// the empty string.
fn clears_when_empty(field: &FieldDescription) -> bool {
	field.json || matches!(field.widget, WidgetKind::Select | WidgetKind::Boolean)
}

fn parse_number(name: &str, field: &FieldDescription, text: &str) -> EditorResult<Value> {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return Ok(Value::Null);
	}
	let invalid = || EditorError::InvalidNumber {
		field: name.to_string(),
		value: text.to_string(),
	};

	let (value, number) = match trimmed.parse::<i64>() {
		Ok(integer) => (Value::from(integer), integer as f64),
		Err(_) => {
			let number = trimmed
				.parse::<f64>()
				.ok()
				.filter(|number| number.is_finite())
				.ok_or_else(invalid)?;
			if field.integer {
				if number.fract() != 0.0 || number.abs() >= i64::MAX as f64 {
					return Err(invalid());
				}
				(Value::from(number as i64), number)
			} else {
				let value = Number::from_f64(number).map(Value::Number).ok_or_else(invalid)?;
				(value, number)
			}
		}
	};

	let below = field.min.is_some_and(|min| number < min);
	let above = field.max.is_some_and(|max| number > max);
	if below || above {
		return Err(EditorError::OutOfRange {
			field: name.to_string(),
			value: trimmed.to_string(),
		});
	}
	Ok(value)
}

/// Text shown in a control for a stored value.
///
/// JSON-backed fields show pretty-printed JSON; strings show as-is; `null`
/// shows as an empty control.
pub fn display_text(field: &FieldDescription, value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(text) if !field.json => text.clone(),
		other if field.json => serde_json::to_string_pretty(other).unwrap_or_default(),
		other => other.to_string(),
	}
}

//! Property editor forms.
//!
//! An [`EditorForm`] holds one [`EditorControl`] per generated field, seeded
//! from the instance's current props, and renders them as HTML inputs.

use crate::value::display_text;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};
use reinhardt_pagebuilder_schema::{FieldDescription, WidgetKind};
use serde::Serialize;
use serde_json::Value;
use std::fmt::Write;

/// One input control of the property editor.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorControl {
	/// Field being edited.
	pub field: FieldDescription,
	/// Seeded value: the instance prop, else the field default, else the
	/// widget's empty value.
	pub value: Value,
	/// Text shown in the control.
	pub text: String,
}

impl EditorControl {
	pub(crate) fn seed(field: FieldDescription, current: Option<&Value>) -> Self {
		let value = current
			.filter(|v| !v.is_null())
			.or(field.default_value.as_ref())
			.cloned()
			.unwrap_or_else(|| empty_value(&field));
		let text = display_text(&field, &value);
		Self { field, value, text }
	}

	/// HTML `id` of the input.
	pub fn input_id(&self) -> String {
		format!("pb-field-{}", self.field.field_name)
	}

	/// Renders the label, input and help text.
	pub fn render_html(&self) -> String {
		let field = &self.field;
		let id = self.input_id();
		let mut html = format!(
			"<div class=\"pb-field\" data-field=\"{}\" data-widget=\"{}\">",
			attr(&field.field_name),
			field.widget.as_str()
		);

		if field.widget == WidgetKind::Boolean {
			let _ = write!(
				html,
				"<label for=\"{id}\">{control}{label}</label>",
				id = attr(&id),
				control = self.render_input(&id),
				label = text(&field.label)
			);
		} else {
			let _ = write!(
				html,
				"<label for=\"{}\">{}</label>{}",
				attr(&id),
				text(&field.label),
				self.render_input(&id)
			);
		}

		if let Some(description) = &field.description {
			let _ = write!(html, "<p class=\"pb-help\">{}</p>", text(description));
		}
		html.push_str("</div>");
		html
	}

	fn render_input(&self, id: &str) -> String {
		let field = &self.field;
		let common = format!(
			"id=\"{}\" name=\"{}\"{}",
			attr(id),
			attr(&field.field_name),
			if field.required { " required" } else { "" }
		);

		match field.widget {
			WidgetKind::Text | WidgetKind::Color | WidgetKind::Url => format!(
				"<input type=\"{}\" {} value=\"{}\">",
				field.widget.as_str(),
				common,
				attr(&self.text)
			),
			WidgetKind::Number => {
				let mut bounds = String::new();
				for (name, bound) in [("min", field.min), ("max", field.max), ("step", field.step)] {
					if let Some(bound) = bound {
						let _ = write!(bounds, " {}=\"{}\"", name, bound);
					}
				}
				format!(
					"<input type=\"number\" {}{} value=\"{}\">",
					common,
					bounds,
					attr(&self.text)
				)
			}
			WidgetKind::Boolean => format!(
				"<input type=\"checkbox\" id=\"{}\" name=\"{}\"{}>",
				attr(id),
				attr(&field.field_name),
				if self.value.as_bool().unwrap_or(false) {
					" checked"
				} else {
					""
				}
			),
			WidgetKind::Textarea => format!(
				"<textarea {}{}>{}</textarea>",
				common,
				if field.json { " data-json=\"true\"" } else { "" },
				text(&self.text)
			),
			WidgetKind::Select => {
				let mut options = String::new();
				for option in &field.options {
					let _ = write!(
						options,
						"<option value=\"{}\"{}>{}</option>",
						attr(&option.value),
						if option.value == self.text { " selected" } else { "" },
						text(&option.label)
					);
				}
				format!("<select {}>{}</select>", common, options)
			}
		}
	}
}

fn empty_value(field: &FieldDescription) -> Value {
	match field.widget {
		WidgetKind::Boolean => Value::Bool(false),
		WidgetKind::Number => Value::Null,
		_ if field.json => Value::Null,
		_ => Value::String(String::new()),
	}
}

/// Editing form for one component instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorForm {
	/// Instance being edited.
	pub instance_id: String,
	/// Its component type.
	pub type_name: String,
	/// One control per editable field, in schema order.
	pub controls: Vec<EditorControl>,
}

impl EditorForm {
	/// Looks up a control by field name.
	pub fn control(&self, field: &str) -> Option<&EditorControl> {
		self.controls.iter().find(|c| c.field.field_name == field)
	}

	/// Renders the whole form.
	pub fn render_html(&self) -> String {
		let mut html = format!(
			"<form class=\"pb-property-editor\" data-component-id=\"{}\" data-component-type=\"{}\">",
			attr(&self.instance_id),
			attr(&self.type_name)
		);
		for control in &self.controls {
			html.push_str(&control.render_html());
		}
		html.push_str("</form>");
		html
	}
}

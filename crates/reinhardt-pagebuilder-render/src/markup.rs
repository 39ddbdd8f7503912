//! HTML fragments emitted around component output.
//!
//! All interpolated text is escaped; component output itself is trusted
//! HTML and inserted as-is.

use crate::messages::{MessageKey, Messages};
use crate::page::ComponentInstance;
use html_escape::{encode_double_quoted_attribute, encode_text};
use reinhardt_pagebuilder_registry::RenderError;

/// CSS class on every edit-mode wrapper.
pub const COMPONENT_CLASS: &str = "pb-component";
/// Extra class on hidden instances in edit mode.
pub const HIDDEN_CLASS: &str = "pb-hidden";

fn open_wrapper(instance: &ComponentInstance, extra_class: Option<&str>) -> String {
	let mut class = COMPONENT_CLASS.to_string();
	if let Some(extra) = extra_class {
		class.push(' ');
		class.push_str(extra);
	}
	if !instance.is_visible() {
		class.push(' ');
		class.push_str(HIDDEN_CLASS);
	}

	let mut html = format!(
		"<div class=\"{}\" data-component-id=\"{}\" data-component-type=\"{}\" data-order=\"{}\"",
		class,
		encode_double_quoted_attribute(&instance.id),
		encode_double_quoted_attribute(&instance.type_name),
		instance.order
	);
	if !instance.is_visible() {
		html.push_str(" data-hidden=\"true\"");
	}
	html.push('>');
	html
}

fn hidden_badge(instance: &ComponentInstance, messages: &Messages, locale: &str) -> String {
	if instance.is_visible() {
		String::new()
	} else {
		format!(
			"<span class=\"pb-hidden-badge\">{}</span>",
			encode_text(&messages.get(locale, MessageKey::HiddenBadge))
		)
	}
}

/// Edit-mode wrapper around successful component output.
pub fn edit_wrapper(
	instance: &ComponentInstance,
	inner: &str,
	messages: &Messages,
	locale: &str,
) -> String {
	format!(
		"{}{}{}</div>",
		open_wrapper(instance, None),
		hidden_badge(instance, messages, locale),
		inner
	)
}

/// Edit-mode diagnostic panel for an unregistered type.
pub fn unknown_panel(instance: &ComponentInstance, messages: &Messages, locale: &str) -> String {
	format!(
		"{}{}<div class=\"pb-diagnostic pb-unknown\" role=\"alert\"><strong>{}</strong></div></div>",
		open_wrapper(instance, Some("pb-state-unknown")),
		hidden_badge(instance, messages, locale),
		encode_text(&messages.unknown_component(locale, &instance.type_name))
	)
}

/// Edit-mode diagnostic panel for a failed render.
///
/// Shows the error, the instance id and order, its raw props and a retry
/// action addressed by instance id.
pub fn error_panel(
	instance: &ComponentInstance,
	error: &RenderError,
	messages: &Messages,
	locale: &str,
) -> String {
	let props = serde_json::to_string_pretty(&instance.props).unwrap_or_default();
	format!(
		concat!(
			"{open}{badge}<div class=\"pb-diagnostic pb-error\" role=\"alert\">",
			"<strong>{title}: {type_name}</strong>",
			"<p class=\"pb-error-message\">{message}</p>",
			"<p class=\"pb-error-meta\">id={id} order={order}</p>",
			"<pre class=\"pb-error-props\">{props}</pre>",
			"<button type=\"button\" class=\"pb-retry\" data-retry=\"{id_attr}\">{retry}</button>",
			"</div></div>"
		),
		open = open_wrapper(instance, Some("pb-state-error")),
		badge = hidden_badge(instance, messages, locale),
		title = encode_text(&messages.get(locale, MessageKey::RenderError)),
		type_name = encode_text(&instance.type_name),
		message = encode_text(&error.to_string()),
		id = encode_text(&instance.id),
		order = instance.order,
		props = encode_text(&props),
		id_attr = encode_double_quoted_attribute(&instance.id),
		retry = encode_text(&messages.get(locale, MessageKey::Retry)),
	)
}

/// Viewer-facing placeholder for a failed render.
pub fn unavailable_placeholder(messages: &Messages, locale: &str) -> String {
	format!(
		"<div class=\"pb-unavailable\">{}</div>",
		encode_text(&messages.get(locale, MessageKey::ContentUnavailable))
	)
}

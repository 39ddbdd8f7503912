//! The render capability implemented by every component.

use crate::context::RenderContext;
use crate::error::{RenderError, RenderResult};
use serde_json::{Map, Value};
use std::fmt;

/// Everything a component sees while rendering.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
	/// Props after defaults have been applied.
	pub props: &'a Map<String, Value>,
	/// Already-rendered HTML of the instance's children.
	pub children: &'a str,
	/// Render-pass context.
	pub context: &'a RenderContext,
}

impl<'a> RenderInput<'a> {
	/// Returns a prop by name.
	pub fn prop(&self, name: &str) -> Option<&'a Value> {
		self.props.get(name)
	}

	/// Returns a string prop.
	pub fn str_prop(&self, name: &str) -> Option<&'a str> {
		self.prop(name).and_then(Value::as_str)
	}

	/// Returns a boolean prop.
	pub fn bool_prop(&self, name: &str) -> Option<bool> {
		self.prop(name).and_then(Value::as_bool)
	}

	/// Returns a string prop, failing with [`RenderError::InvalidProps`] when it
	/// is absent or not a string.
	pub fn require_str(&self, name: &str) -> RenderResult<&'a str> {
		self.str_prop(name)
			.ok_or_else(|| RenderError::invalid_props(format!("'{}' must be a string", name)))
	}

	/// Returns a string prop escaped for HTML text content, or an empty string.
	pub fn escaped(&self, name: &str) -> String {
		self.str_prop(name)
			.map(|text| html_escape::encode_text(text).into_owned())
			.unwrap_or_default()
	}
}

/// A component's render capability.
///
/// Implementations produce an HTML fragment for one instance. Returning an
/// error (or panicking) only affects that instance; the renderer isolates it
/// from its siblings.
pub trait Renderable: Send + Sync {
	/// Renders one instance.
	fn render(&self, input: &RenderInput<'_>) -> RenderResult<String>;
}

/// [`Renderable`] adapter for closures.
pub struct FnRenderable<F> {
	func: F,
}

impl<F> fmt::Debug for FnRenderable<F> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FnRenderable").finish_non_exhaustive()
	}
}

impl<F> Renderable for FnRenderable<F>
where
	F: Fn(&RenderInput<'_>) -> RenderResult<String> + Send + Sync,
{
	fn render(&self, input: &RenderInput<'_>) -> RenderResult<String> {
		(self.func)(input)
	}
}

/// Wraps a closure as a [`Renderable`].
///
/// # Example
///
/// ```
/// use reinhardt_pagebuilder_registry::{RenderContext, RenderInput, Renderable, from_fn};
/// use serde_json::{Map, json};
///
/// let heading = from_fn(|input| Ok(format!("<h1>{}</h1>", input.escaped("title"))));
///
/// let mut props = Map::new();
/// props.insert("title".to_string(), json!("Fish & Chips"));
/// let context = RenderContext::new(false, "en");
/// let html = heading
/// 	.render(&RenderInput { props: &props, children: "", context: &context })
/// 	.unwrap();
/// assert_eq!(html, "<h1>Fish &amp; Chips</h1>");
/// ```
pub fn from_fn<F>(func: F) -> FnRenderable<F>
where
	F: Fn(&RenderInput<'_>) -> RenderResult<String> + Send + Sync + 'static,
{
	FnRenderable { func }
}

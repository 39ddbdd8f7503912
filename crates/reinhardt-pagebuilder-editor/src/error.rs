//! Error types for the property and page editors.

use thiserror::Error;

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;

/// Errors raised at the edit boundary. A failed edit is never committed.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditorError {
	/// A JSON-backed field received text that does not parse.
	#[error("field '{field}' expects JSON: {message}")]
	InvalidJson {
		/// Field name.
		field: String,
		/// Parser message.
		message: String,
	},

	/// A number field received text that is not a finite number, or a
	/// fraction where only whole numbers are allowed.
	#[error("field '{field}' expects a number, got '{value}'")]
	InvalidNumber {
		/// Field name.
		field: String,
		/// Rejected input.
		value: String,
	},

	/// A number field received a value outside its declared bounds.
	#[error("field '{field}' value {value} is outside the allowed range")]
	OutOfRange {
		/// Field name.
		field: String,
		/// Rejected input.
		value: String,
	},

	/// A boolean field received unrecognized text.
	#[error("field '{field}' expects a boolean, got '{value}'")]
	InvalidBoolean {
		/// Field name.
		field: String,
		/// Rejected input.
		value: String,
	},

	/// A select field received a value outside its options.
	#[error("field '{field}' does not offer option '{value}'")]
	InvalidOption {
		/// Field name.
		field: String,
		/// Rejected input.
		value: String,
	},

	/// The field is not part of the component's schema.
	#[error("component '{component}' has no editable field '{field}'")]
	UnknownField {
		/// Component type name.
		component: String,
		/// Field name.
		field: String,
	},

	/// The instance's type is not registered.
	#[error("unknown component type: {0}")]
	UnknownComponent(String),

	/// No instance in the page has the given id.
	#[error("component instance not found: {0}")]
	InstanceNotFound(String),
}

//! Error types for schema construction.

use thiserror::Error;

/// Result type for schema operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while building a [`Schema`](crate::Schema).
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SchemaError {
	/// A field name was empty after trimming.
	#[error("schema field name cannot be empty")]
	EmptyFieldName,

	/// The same field name was declared twice in one object.
	#[error("duplicate schema field: {0}")]
	DuplicateField(String),
}

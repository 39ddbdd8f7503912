//! Error types for page handling.

use thiserror::Error;

/// Result type for page operations.
pub type PageResult<T> = Result<T, PageError>;

/// Errors raised while reading pages or addressing instances.
///
/// Component render failures are not page errors; they are recorded on the
/// instance's report.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PageError {
	/// The page configuration is not valid JSON of the expected shape.
	#[error("invalid page configuration: {0}")]
	InvalidJson(#[from] serde_json::Error),

	/// No component instance has the given id.
	#[error("component instance not found: {0}")]
	InstanceNotFound(String),
}

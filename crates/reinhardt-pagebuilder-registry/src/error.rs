//! Error types for registration and rendering.

use thiserror::Error;

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

/// Result type returned by component render functions.
pub type RenderResult<T> = Result<T, RenderError>;

/// Errors raised while registering components.
///
/// Lookups never fail; only malformed registrations do.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
	/// The type name was empty after trimming.
	#[error("component type name cannot be empty")]
	EmptyTypeName,

	/// The metadata version is not valid semver.
	#[error("invalid component version: {0}")]
	InvalidVersion(String),
}

/// Errors produced while rendering a single component instance.
///
/// These never propagate past the instance that raised them.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RenderError {
	/// The render function reported a failure.
	#[error("render failed: {0}")]
	Failed(String),

	/// The render function rejected its props.
	#[error("invalid props: {0}")]
	InvalidProps(String),

	/// The render function panicked.
	#[error("render panicked: {0}")]
	Panicked(String),

	/// Children were nested deeper than the configured limit.
	#[error("nesting depth {depth} exceeds the limit of {limit}")]
	DepthExceeded {
		/// Depth of the offending instance.
		depth: usize,
		/// Configured maximum depth.
		limit: usize,
	},
}

impl RenderError {
	/// Creates a [`RenderError::Failed`] from any message.
	pub fn failed(message: impl Into<String>) -> Self {
		Self::Failed(message.into())
	}

	/// Creates a [`RenderError::InvalidProps`] from any message.
	pub fn invalid_props(message: impl Into<String>) -> Self {
		Self::InvalidProps(message.into())
	}
}

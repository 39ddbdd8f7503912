//! Facade error type.

use reinhardt_pagebuilder_conf::SettingsError;
use reinhardt_pagebuilder_editor::EditorError;
use reinhardt_pagebuilder_registry::{RegistryError, RenderError};
use reinhardt_pagebuilder_render::PageError;
use reinhardt_pagebuilder_schema::SchemaError;
use thiserror::Error;

/// Result type for [`PageBuilder`](crate::PageBuilder) operations.
pub type PageBuilderResult<T> = Result<T, PageBuilderError>;

/// Any error raised by the page-builder crates.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum PageBuilderError {
	/// Settings could not be loaded or are invalid.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// A schema declaration is malformed.
	#[error(transparent)]
	Schema(#[from] SchemaError),

	/// A registration was rejected.
	#[error(transparent)]
	Registry(#[from] RegistryError),

	/// A component render failed.
	#[error(transparent)]
	Render(#[from] RenderError),

	/// A page could not be parsed or addressed.
	#[error(transparent)]
	Page(#[from] PageError),

	/// An edit was rejected.
	#[error(transparent)]
	Editor(#[from] EditorError),
}

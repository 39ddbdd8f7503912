//! # Reinhardt Page Builder Editor
//!
//! Editing support for page-builder pages.
//!
//! - [`PropertyEditor`] builds a form for an instance from its registered
//!   schema and merges operator edits into a new instance. Text input is
//!   parsed per widget; a failed edit commits nothing.
//! - [`PageEditor`] mutates a page's component tree: insert, remove, move,
//!   toggle visibility and replace instances by id.
//!
//! ```
//! use reinhardt_pagebuilder_editor::{EditValue, PageEditor, PropertyEditor};
//! use reinhardt_pagebuilder_registry::{ComponentRegistry, Registration};
//! use reinhardt_pagebuilder_render::{ComponentInstance, PageConfig};
//! use reinhardt_pagebuilder_schema::{Schema, SchemaType};
//!
//! let registry = ComponentRegistry::builder()
//! 	.register(
//! 		Registration::from_fn("Counter", |_| Ok(String::new())).schema(
//! 			Schema::builder()
//! 				.field("start", SchemaType::integer())
//! 				.build()
//! 				.unwrap(),
//! 		),
//! 	)
//! 	.build()
//! 	.unwrap();
//!
//! let mut page = PageConfig::new("en", true);
//! let mut editor = PageEditor::for_config(&mut page);
//! let id = editor.insert(ComponentInstance::new("Counter"), 0);
//! editor
//! 	.edit_props(&PropertyEditor::new(registry), &id, [("start", EditValue::text("5"))])
//! 	.unwrap();
//!
//! assert_eq!(page.find(&id).unwrap().props["start"], 5);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod form;
pub mod page_editor;
pub mod property;
pub mod value;

pub use error::{EditorError, EditorResult};
pub use form::{EditorControl, EditorForm};
pub use page_editor::{PageEditor, renumber};
pub use property::PropertyEditor;
pub use value::{EditValue, coerce, display_text};

//! # Reinhardt Page Builder Schema
//!
//! Closed schema descriptions for component props, plus the two pure
//! operations the page builder derives from them:
//!
//! - **Validation**: [`Schema::validate`] checks a props object and reports
//!   every mismatch as a [`ValidationIssue`].
//! - **Editor field generation**: [`generate_fields`] turns a schema into an
//!   ordered [`FieldSet`] of [`FieldDescription`]s, one per editable prop.
//!
//! Schemas are plain data. There is no runtime reflection: a component
//! declares its props with [`SchemaType`] constructors and the generator maps
//! each variant exhaustively.
//!
//! ```
//! use reinhardt_pagebuilder_schema::prelude::*;
//! use serde_json::json;
//!
//! let schema = Schema::builder()
//! 	.field("title", SchemaType::string())
//! 	.field("align", SchemaType::enumeration(["left", "center", "right"]).with_default(json!("left")))
//! 	.build()
//! 	.unwrap();
//!
//! let fields = generate_fields(&schema, &FieldHints::default());
//! assert_eq!(fields.names().collect::<Vec<_>>(), vec!["title", "align"]);
//! assert_eq!(fields.get("align").unwrap().widget, WidgetKind::Select);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod fields;
pub mod schema;
pub mod text;
pub mod validation;

pub use error::{SchemaError, SchemaResult};
pub use fields::{FieldDescription, FieldHints, FieldOption, FieldSet, WidgetKind, generate_fields};
pub use schema::{Schema, SchemaBuilder, SchemaField, SchemaType, Unwrapped};
pub use validation::{IssueKind, ValidationIssue, json_type_name};

/// Re-export commonly used types.
pub mod prelude {
	pub use crate::error::{SchemaError, SchemaResult};
	pub use crate::fields::{
		FieldDescription, FieldHints, FieldOption, FieldSet, WidgetKind, generate_fields,
	};
	pub use crate::schema::{Schema, SchemaField, SchemaType};
	pub use crate::validation::{IssueKind, ValidationIssue};
}

//! Property editor forms and page tree mutations.

pub use reinhardt_pagebuilder_editor::*;

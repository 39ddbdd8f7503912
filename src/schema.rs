//! Schema descriptions, prop validation and editor field generation.

pub use reinhardt_pagebuilder_schema::*;

//! Layered settings.
//!
//! # Examples
//!
//! ```rust,no_run
//! use reinhardt_pagebuilder::conf::{Settings, TomlFileSource};
//!
//! let settings = Settings::builder()
//! 	.add_source(TomlFileSource::new("pagebuilder.toml").optional())
//! 	.build()
//! 	.unwrap();
//! ```

pub use reinhardt_pagebuilder_conf::*;

//! Component registry, registration wrapper and link-time discovery.
//!
//! # Examples
//!
//! ```rust
//! use reinhardt_pagebuilder::registry::{ComponentRegistry, Registration};
//!
//! let registry = ComponentRegistry::builder()
//! 	.register(Registration::from_fn("Divider", |_| Ok("<hr/>".to_string())))
//! 	.build()
//! 	.unwrap();
//! assert!(registry.has("divider"));
//! ```

pub use reinhardt_pagebuilder_registry::*;

//! # Reinhardt Page Builder Registry
//!
//! The component registry: a map from normalized type name to a
//! [`RegisteredComponent`] holding its render capability, prop schema,
//! metadata and default props.
//!
//! ## Initialization
//!
//! Registries are built explicitly at startup with
//! [`ComponentRegistry::builder`] and shared by `Arc`. Components declared
//! with [`register_component!`] are discovered at link time but only inserted
//! when the builder asks for them, sorted by key.
//!
//! ```
//! use reinhardt_pagebuilder_registry::{ComponentMetadata, ComponentRegistry, Registration};
//!
//! let registry = ComponentRegistry::builder()
//! 	.register(
//! 		Registration::from_fn("HeroSection", |input| {
//! 			Ok(format!("<section>{}</section>", input.escaped("title")))
//! 		})
//! 		.metadata(ComponentMetadata::builder("layout").build().unwrap()),
//! 	)
//! 	.build()
//! 	.unwrap();
//!
//! assert!(registry.has("herosection"));
//! assert_eq!(registry.stats().total, 1);
//! ```
//!
//! ## Keys
//!
//! Type names are trimmed and lowercased into a [`ComponentKey`]; every
//! operation applies the same rule, so lookups are case-insensitive.

#![warn(missing_docs)]

pub mod builder;
pub mod context;
pub mod discovery;
pub mod error;
pub mod key;
pub mod listing;
pub mod metadata;
pub mod registration;
pub mod registry;
pub mod renderable;

pub use builder::ComponentRegistryBuilder;
pub use context::RenderContext;
pub use discovery::{StaticComponent, registered_components};
pub use error::{RegistryError, RegistryResult, RenderError, RenderResult};
pub use key::ComponentKey;
pub use listing::{CategoryGroup, ComponentListing};
pub use metadata::{ComponentMetadata, ComponentMetadataBuilder, DEFAULT_CATEGORY};
pub use registration::{Invocation, RegisteredComponent, Registration};
pub use registry::{ComponentRegistry, RegistryStats};
pub use renderable::{FnRenderable, RenderInput, Renderable, from_fn};

// Re-exported for `register_component!`.
#[doc(hidden)]
pub use inventory;

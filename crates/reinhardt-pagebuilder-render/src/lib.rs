//! # Reinhardt Page Builder Render
//!
//! The page model and the dynamic page renderer.
//!
//! A [`PageConfig`] is a tree of [`ComponentInstance`]s. [`PageRenderer`]
//! sorts each sibling list by `order`, resolves every type in the registry
//! and isolates failures per instance: unknown types and failed renders show
//! diagnostics in edit mode and degrade silently for viewers.
//!
//! ```
//! use reinhardt_pagebuilder_registry::{ComponentRegistry, Registration};
//! use reinhardt_pagebuilder_render::{ComponentInstance, PageConfig, PageRenderer};
//!
//! let registry = ComponentRegistry::builder()
//! 	.register(Registration::from_fn("Text", |input| {
//! 		Ok(format!("<p>{}</p>", input.escaped("body")))
//! 	}))
//! 	.build()
//! 	.unwrap();
//!
//! let page = PageConfig::new("en", false)
//! 	.component(ComponentInstance::new("Text").order(2).prop("body", "world"))
//! 	.component(ComponentInstance::new("Text").order(1).prop("body", "hello"))
//! 	.component(ComponentInstance::new("Missing"));
//!
//! let report = PageRenderer::new(registry).render_page(&page);
//! assert_eq!(report.html, "<p>hello</p><p>world</p>");
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod markup;
pub mod messages;
pub mod page;
pub mod renderer;
pub mod report;

pub use error::{PageError, PageResult};
pub use messages::{MessageKey, Messages};
pub use page::{ComponentInstance, Page, PageConfig, find_with_depth};
pub use renderer::PageRenderer;
pub use report::{InstanceReport, InstanceState, RenderReport};

//! Page model and renderer.

pub use reinhardt_pagebuilder_render::*;

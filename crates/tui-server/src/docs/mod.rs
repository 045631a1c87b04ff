//! Built-in reference material served as tools and resources.
//!
//! Everything here is immutable and built on first use.

pub mod components;
pub mod css;
pub mod patterns;

pub use components::{ComponentDoc, container_page, containers, widget_page, widgets};
pub use patterns::{LayoutPattern, layouts_page};

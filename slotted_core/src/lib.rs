//! `slotted_core` renders HTML `<template>` elements with data. Given a
//! parsed document, a selector for a template element, a container element,
//! and a mapping from a data item to per-slot attribute/text updates, the
//! renderer clones the template content once per item, applies the
//! whitelisted updates, and swaps the result into the container atomically.
//!
//! ## Render pipeline
//!
//! ```text
//! HTML text
//!   → Document (html5ever parse, <template> content kept inert)
//!   → TemplateRenderer::new (validate options, resolve template once)
//!   → render(items)
//!       → per item: clone content, map data, write whitelisted values
//!         into `data-template` slots, strip the marker
//!       → replace the container's children in one operation
//! ```
//!
//! ## Modules
//!
//! - [`attrs`] — The fixed whitelist of permitted HTML attribute names plus
//!   the `textContent` pseudo-attribute.
//! - [`dom`] — The [`Document`] model and node helpers over the rcdom tree.
//! - [`mapping`] — Declarative [`MappingSpec`] configs loaded from
//!   `slotted.toml`, with minijinja attribute-value interpolation.
//!
//! ## Key Types
//!
//! - [`TemplateRenderer`] — A reusable renderer bound to one resolved
//!   template and container.
//! - [`RendererOptions`] — Factory configuration (selectors, timing, and
//!   attribute policy).
//! - [`RenderValues`] / [`SlotValues`] — The slot-key → attribute → value
//!   structure a mapping function produces per item.
//! - [`Selector`] — The compound simple selector used to address elements.
//! - [`SlottedError`] — Every failure the factory or a render pass can
//!   surface.
//!
//! ## Quick Start
//!
//! ```rust
//! use slotted_core::Document;
//! use slotted_core::RenderValues;
//! use slotted_core::RendererOptions;
//! use slotted_core::SlotValues;
//! use slotted_core::TemplateRenderer;
//!
//! let document = Document::parse(
//! 	r##"<section id="results"></section>
//! 	<template id="row"><p data-template="name"></p></template>"##,
//! );
//!
//! let container = document.query_selector("#results").unwrap().unwrap();
//! let renderer = TemplateRenderer::new(
//! 	&document,
//! 	RendererOptions::new("#row", container),
//! 	|name: &&str| Ok(RenderValues::new().slot("name", SlotValues::new().text(*name))),
//! )
//! .unwrap();
//!
//! renderer.render(&["Ada", "Grace"]).unwrap();
//! assert!(document.to_html().unwrap().contains("Ada"));
//! ```

pub use attrs::*;
pub use dom::*;
pub use error::*;
pub use mapping::*;
pub use renderer::*;
pub use selector::*;

pub mod attrs;
pub mod dom;
mod error;
pub mod mapping;
mod renderer;
mod selector;

#[cfg(test)]
mod __fixtures;

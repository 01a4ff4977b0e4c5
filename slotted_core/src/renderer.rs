use std::collections::BTreeMap;
use std::collections::BTreeSet;
use std::marker::PhantomData;
use std::time::Instant;

use derive_more::Deref;
use derive_more::DerefMut;
use markup5ever_rcdom::Handle;
use serde::Deserialize;
use serde::Serialize;

use crate::AnyError;
use crate::Document;
use crate::SlottedError;
use crate::SlottedResult;
use crate::attrs::TEXT_CONTENT;
use crate::attrs::is_valid_attribute;
use crate::dom;

/// The attribute that tags an element inside a template as a slot. The value
/// is the slot key that mapped data is addressed to. The marker is stripped
/// from every rendered slot so it cannot interfere with other scripts or
/// styling in the output.
pub const SLOT_MARKER: &str = "data-template";

/// Attribute updates for one slot: a map from attribute name to the string
/// value to write. The [`TEXT_CONTENT`] pseudo-attribute targets the slot's
/// text instead of a literal attribute.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
pub struct SlotValues(BTreeMap<String, String>);

impl SlotValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Set the slot's text content.
	#[must_use]
	pub fn text(mut self, value: impl Into<String>) -> Self {
		self.0.insert(TEXT_CONTENT.to_string(), value.into());
		self
	}

	/// Set a literal attribute. The name is validated against the whitelist
	/// at write-time during the render pass, not here.
	#[must_use]
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.0.insert(name.into(), value.into());
		self
	}
}

/// The full update produced by a mapping function for one data item: a map
/// from slot key to that slot's [`SlotValues`]. `BTreeMap`-backed, so slots
/// and attributes are applied in a deterministic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Deref, DerefMut)]
pub struct RenderValues(BTreeMap<String, SlotValues>);

impl RenderValues {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add the values for one slot key.
	#[must_use]
	pub fn slot(mut self, key: impl Into<String>, values: SlotValues) -> Self {
		self.0.insert(key.into(), values);
		self
	}
}

/// Configuration for [`TemplateRenderer::new`].
#[derive(Clone)]
pub struct RendererOptions {
	/// Selector resolving the `<template>` element, checked exactly once at
	/// renderer creation.
	pub template: String,
	/// The live element whose children each render pass replaces. Resolve it
	/// with [`Document::query_selector`]; it must outlive the renderer's use.
	pub container: Handle,
	/// Report the elapsed duration of each render pass (and warn on empty
	/// input) through `tracing`.
	pub debug_timing: bool,
	/// Fail the render pass with [`SlottedError::InvalidAttribute`] when a
	/// mapped attribute name falls outside the whitelist, instead of the
	/// default drop-with-warning policy.
	pub strict_attributes: bool,
}

impl RendererOptions {
	pub fn new(template: impl Into<String>, container: Handle) -> Self {
		Self {
			template: template.into(),
			container,
			debug_timing: false,
			strict_attributes: false,
		}
	}
}

/// A reusable template renderer bound to one resolved `<template>` element
/// and one container.
///
/// Created by [`TemplateRenderer::new`], which validates the configuration
/// and resolves the template selector exactly once. Each call to
/// [`render`](Self::render) clones the template's inert content per data
/// item, applies the mapped values, and atomically replaces the container's
/// children with the result. The renderer keeps no mutable state between
/// calls; rendering the same items twice produces the same container.
pub struct TemplateRenderer<T, F>
where
	F: Fn(&T) -> Result<RenderValues, AnyError>,
{
	template: Handle,
	container: Handle,
	map_data: F,
	debug_timing: bool,
	strict_attributes: bool,
	item: PhantomData<fn(&T)>,
}

impl<T, F> TemplateRenderer<T, F>
where
	F: Fn(&T) -> Result<RenderValues, AnyError>,
{
	/// Validate the options, resolve the template element, and return a
	/// renderer bound to the resolved state.
	///
	/// Fails with [`SlottedError::Configuration`] when the container is not
	/// an element, [`SlottedError::TemplateNotFound`] when the selector
	/// matches nothing, and [`SlottedError::NotATemplate`] when it matches a
	/// non-template element.
	pub fn new(document: &Document, options: RendererOptions, map_data: F) -> SlottedResult<Self> {
		let RendererOptions {
			template,
			container,
			debug_timing,
			strict_attributes,
		} = options;

		if !dom::is_element(&container) {
			return Err(SlottedError::Configuration(
				"the container must be an element node".to_string(),
			));
		}

		let Some(resolved) = document.query_selector(&template)? else {
			return Err(SlottedError::TemplateNotFound(template));
		};

		if dom::element_name(&resolved) != Some("template") {
			let found = dom::element_name(&resolved).unwrap_or("unknown").to_string();
			return Err(SlottedError::NotATemplate {
				selector: template,
				found,
			});
		}

		Ok(Self {
			template: resolved,
			container,
			map_data,
			debug_timing,
			strict_attributes,
			item: PhantomData,
		})
	}

	/// Render a sequence of data items into the container.
	///
	/// For each item, in input order: the template content is cloned into a
	/// detached fragment, the mapping function produces the slot values, and
	/// each value is written into the first element of the clone tagged
	/// `data-template=key` (document order — a duplicate key shadows later
	/// occurrences). A slot key with no matching element is skipped. After
	/// every item succeeded, the container's existing children are replaced
	/// with all produced clones in one operation.
	///
	/// An empty sequence is not an error: the pass is a no-op and the
	/// container keeps its current children. Any failure (mapping error,
	/// missing template content, strict-mode attribute rejection) aborts the
	/// pass before the container is touched.
	pub fn render(&self, items: &[T]) -> SlottedResult<()> {
		let started = self.debug_timing.then(Instant::now);

		if items.is_empty() {
			if self.debug_timing {
				tracing::warn!("no items provided for the render pass");
			}
			return Ok(());
		}

		let contents =
			dom::template_contents(&self.template).ok_or(SlottedError::TemplateClone)?;

		// Every clone is built detached before the container is touched, so a
		// failing item can never leave it half-updated.
		let mut rendered = Vec::new();
		for item in items {
			let fragment: Vec<Handle> = contents
				.children
				.borrow()
				.iter()
				.map(dom::deep_clone)
				.collect();

			let values =
				(self.map_data)(item).map_err(|error| SlottedError::Mapping(error.to_string()))?;

			self.apply_values(&fragment, &values)?;
			rendered.extend(fragment);
		}

		dom::replace_children(&self.container, rendered);

		if let Some(started) = started {
			tracing::debug!(
				elapsed = ?started.elapsed(),
				items = items.len(),
				"render pass complete"
			);
		}

		Ok(())
	}

	/// Render a single item, the normalized one-element form of
	/// [`render`](Self::render).
	pub fn render_one(&self, item: &T) -> SlottedResult<()> {
		self.render(std::slice::from_ref(item))
	}

	fn apply_values(&self, fragment: &[Handle], values: &RenderValues) -> SlottedResult<()> {
		for (key, slot_values) in values.iter() {
			let Some(element) = dom::find_by_attribute(fragment, SLOT_MARKER, key) else {
				tracing::debug!(slot = %key, "no element carries this slot key, skipping");
				continue;
			};

			for (name, value) in slot_values.iter() {
				if name == TEXT_CONTENT {
					dom::set_text_content(&element, value);
				} else if is_valid_attribute(name) {
					dom::set_attribute(&element, name, value);
				} else if self.strict_attributes {
					return Err(SlottedError::InvalidAttribute(name.clone()));
				} else {
					tracing::warn!(
						attribute = %name,
						slot = %key,
						"dropping attribute outside the whitelist"
					);
				}
			}

			dom::remove_attribute(&element, SLOT_MARKER);
		}

		Ok(())
	}
}

/// One slot marker found inside a template's content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SlotEntry {
	/// The slot key, the value of the `data-template` marker.
	pub key: String,
	/// The tag name of the element carrying the marker.
	pub element: String,
	/// Whether an earlier element already claimed this key. Shadowed entries
	/// are never rendered: slot lookup takes the first match in document
	/// order.
	pub shadowed: bool,
}

/// Enumerate the slot markers inside a template element's content, in
/// document order. Returns an empty list for elements without an inert
/// content fragment.
pub fn collect_slots(template: &Handle) -> Vec<SlotEntry> {
	let mut seen = BTreeSet::new();
	let mut entries = Vec::new();

	if let Some(contents) = dom::template_contents(template) {
		for child in contents.children.borrow().iter() {
			collect_slots_in(child, &mut seen, &mut entries);
		}
	}

	entries
}

fn collect_slots_in(node: &Handle, seen: &mut BTreeSet<String>, entries: &mut Vec<SlotEntry>) {
	if let Some(key) = dom::get_attribute(node, SLOT_MARKER) {
		let shadowed = !seen.insert(key.clone());
		entries.push(SlotEntry {
			key,
			element: dom::element_name(node).unwrap_or("unknown").to_string(),
			shadowed,
		});
	}

	for child in node.children.borrow().iter() {
		collect_slots_in(child, seen, entries);
	}
}

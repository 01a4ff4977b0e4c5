use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::AnyError;
use crate::Document;
use crate::RenderValues;
use crate::RendererOptions;
use crate::SlotValues;
use crate::SlottedError;
use crate::SlottedResult;
use crate::TemplateRenderer;

/// A declarative mapping from JSON data items to slot values, loaded from a
/// `slotted.toml` (or `.json`) file. The data-driven equivalent of the
/// mapping closure passed to [`TemplateRenderer::new`].
///
/// ```toml
/// template = "#result-template"
/// container = "#results-container"
///
/// [slots.link]
/// textContent = "{{ linkText }}"
/// href = "{{ linkUrl }}"
/// class = "link"
/// ```
///
/// Attribute values may use [`minijinja`] template syntax, rendered against
/// each data item; plain strings pass through untouched. Missing item fields
/// render as empty strings rather than failing.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct MappingSpec {
	/// Selector for the `<template>` element.
	pub template: String,
	/// Selector for the container element whose children are replaced.
	pub container: String,
	/// Report render-pass timing through `tracing`.
	#[serde(default)]
	pub debug_timing: bool,
	/// Reject attribute names outside the whitelist instead of dropping
	/// them.
	#[serde(default)]
	pub strict_attributes: bool,
	/// Slot key → attribute name → value template.
	#[serde(default)]
	pub slots: BTreeMap<String, BTreeMap<String, String>>,
}

impl MappingSpec {
	/// Load a mapping spec from a TOML or JSON file, chosen by extension.
	pub fn load(path: impl AsRef<Path>) -> SlottedResult<Self> {
		let path = path.as_ref();
		let content = std::fs::read_to_string(path)?;
		let extension = path
			.extension()
			.and_then(|extension| extension.to_str())
			.unwrap_or_default();

		match extension {
			"toml" => {
				toml::from_str(&content).map_err(|error| SlottedError::ConfigParse(error.to_string()))
			}
			"json" => {
				serde_json::from_str(&content)
					.map_err(|error| SlottedError::ConfigParse(error.to_string()))
			}
			other => Err(SlottedError::UnsupportedConfigFormat(other.to_string())),
		}
	}

	/// Compute the [`RenderValues`] for one data item by rendering each
	/// attribute value template against it.
	pub fn values_for(&self, item: &serde_json::Value) -> SlottedResult<RenderValues> {
		let mut values = RenderValues::new();

		for (key, attributes) in &self.slots {
			let mut slot = SlotValues::new();
			for (name, template) in attributes {
				let value = if has_template_syntax(template) {
					render_attribute_template(template, item).map_err(|reason| {
						SlottedError::AttributeTemplate {
							slot: key.clone(),
							reason,
						}
					})?
				} else {
					template.clone()
				};
				slot = slot.attr(name.clone(), value);
			}
			values = values.slot(key.clone(), slot);
		}

		Ok(values)
	}

	/// The mapping closure form of this spec, as consumed by
	/// [`TemplateRenderer::new`].
	pub fn mapper(&self) -> impl Fn(&serde_json::Value) -> Result<RenderValues, AnyError> + '_ {
		move |item| self.values_for(item).map_err(Into::into)
	}

	/// Resolve the spec's container selector and build the renderer options
	/// it describes.
	pub fn renderer_options(&self, document: &Document) -> SlottedResult<RendererOptions> {
		let Some(container) = document.query_selector(&self.container)? else {
			return Err(SlottedError::Configuration(format!(
				"no element matches the container selector `{}`",
				self.container
			)));
		};

		Ok(RendererOptions {
			template: self.template.clone(),
			container,
			debug_timing: self.debug_timing,
			strict_attributes: self.strict_attributes,
		})
	}

	/// Build the complete renderer this spec describes against a document.
	pub fn renderer<'spec>(
		&'spec self,
		document: &Document,
	) -> SlottedResult<
		TemplateRenderer<
			serde_json::Value,
			impl Fn(&serde_json::Value) -> Result<RenderValues, AnyError> + 'spec,
		>,
	> {
		let options = self.renderer_options(document)?;
		TemplateRenderer::new(document, options, self.mapper())
	}
}

/// Render an attribute value template through minijinja using the item as
/// context. Undefined references resolve to empty output so partial data
/// does not abort a render pass.
fn render_attribute_template(content: &str, item: &serde_json::Value) -> Result<String, String> {
	let mut env = minijinja::Environment::new();
	env.set_undefined_behavior(minijinja::UndefinedBehavior::Chainable);
	env.add_template("__inline__", content)
		.map_err(|error| error.to_string())?;

	let template = env
		.get_template("__inline__")
		.map_err(|error| error.to_string())?;

	let ctx = minijinja::Value::from_serialize(item);
	template.render(ctx).map_err(|error| error.to_string())
}

/// Check whether a value contains minijinja template syntax.
fn has_template_syntax(content: &str) -> bool {
	content.contains("{{") || content.contains("{%") || content.contains("{#")
}

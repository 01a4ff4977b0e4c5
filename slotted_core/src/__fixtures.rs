//! Shared fixtures for the core test suite.

use crate::AnyError;
use crate::Document;
use crate::RenderValues;
use crate::RendererOptions;
use crate::SlotValues;
use crate::SlottedResult;

/// A sample page with one container (holding a placeholder child) and one
/// template with two slots.
pub const SAMPLE_PAGE: &str = r##"<!doctype html>
<html>
	<head><title>slotted sample</title></head>
	<body>
		<section id="results-container"><p class="placeholder">Loading</p></section>
		<template id="result-template">
			<article class="result">
				<h3 data-template="category"></h3>
				<a data-template="link"></a>
			</article>
		</template>
	</body>
</html>
"##;

/// A page whose template carries the same slot key twice.
pub const DUPLICATE_SLOT_PAGE: &str = r##"<!doctype html>
<html>
	<body>
		<div id="out"></div>
		<template id="tpl">
			<p data-template="name"></p>
			<span data-template="name"></span>
		</template>
	</body>
</html>
"##;

#[derive(Debug, Clone)]
pub struct SampleItem {
	pub category: &'static str,
	pub link_text: &'static str,
	pub link_url: &'static str,
}

pub fn sample_items() -> Vec<SampleItem> {
	vec![
		SampleItem {
			category: "Technology",
			link_text: "Learn JavaScript",
			link_url: "https://example.com/learn-js",
		},
		SampleItem {
			category: "Health",
			link_text: "Fitness Tips",
			link_url: "https://example.com/fitness-tips",
		},
		SampleItem {
			category: "Finance",
			link_text: "Investing 101",
			link_url: "https://example.com/investing-101",
		},
		SampleItem {
			category: "Education",
			link_text: "Online Courses",
			link_url: "https://example.com/online-courses",
		},
		SampleItem {
			category: "Entertainment",
			link_text: "Movie Reviews",
			link_url: "https://example.com/movie-reviews",
		},
		SampleItem {
			category: "Travel",
			link_text: "Top Destinations",
			link_url: "https://example.com/top-destinations",
		},
	]
}

/// The canonical mapping for [`SampleItem`]: category text plus a link with
/// text, href, and class.
pub fn sample_map(item: &SampleItem) -> Result<RenderValues, AnyError> {
	Ok(RenderValues::new()
		.slot("category", SlotValues::new().text(item.category))
		.slot(
			"link",
			SlotValues::new()
				.text(item.link_text)
				.attr("href", item.link_url)
				.attr("class", "link"),
		))
}

/// Renderer options for [`SAMPLE_PAGE`] with the container already resolved.
pub fn sample_options(document: &Document) -> SlottedResult<RendererOptions> {
	let container = document
		.query_selector("#results-container")?
		.expect("the sample page has a results container");

	Ok(RendererOptions::new("#result-template", container))
}

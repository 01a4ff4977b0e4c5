use assert_cmd::Command;

pub fn slotted_cmd() -> Command {
	let mut cmd = Command::cargo_bin("slotted").expect("the slotted binary is built");
	cmd.env("NO_COLOR", "1");
	cmd
}

/// A minimal page with one template (two slots) and one container.
pub const PAGE: &str = r##"<!doctype html>
<html>
	<body>
		<section id="results-container"></section>
		<template id="result-template">
			<article>
				<h3 data-template="category"></h3>
				<a data-template="link"></a>
			</article>
		</template>
	</body>
</html>
"##;

pub const CONFIG: &str = r##"template = "#result-template"
container = "#results-container"

[slots.category]
textContent = "{{ category }}"

[slots.link]
textContent = "{{ linkText }}"
href = "{{ linkUrl }}"
class = "link"
"##;

pub const ITEMS: &str = r#"[
	{ "category": "Finance", "linkText": "Investing 101", "linkUrl": "https://example.com/investing-101" },
	{ "category": "Travel", "linkText": "Top Destinations", "linkUrl": "https://example.com/top-destinations" }
]
"#;

mod common;

use predicates::prelude::PredicateBooleanExt;
use slotted_core::AnyEmptyResult;

fn write_fixtures(dir: &std::path::Path) -> AnyEmptyResult {
	std::fs::write(dir.join("page.html"), common::PAGE)?;
	std::fs::write(dir.join("slotted.toml"), common::CONFIG)?;
	std::fs::write(dir.join("items.json"), common::ITEMS)?;

	Ok(())
}

#[test]
fn render_prints_the_updated_document() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_fixtures(tmp.path())?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("render")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("items.json"))
		.arg("--config")
		.arg(tmp.path().join("slotted.toml"))
		.assert()
		.success()
		.stdout(
			predicates::str::contains("Investing 101")
				.and(predicates::str::contains("https://example.com/top-destinations"))
				.and(predicates::str::contains("data-template").not()),
		);

	Ok(())
}

#[test]
fn render_writes_to_the_output_path() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_fixtures(tmp.path())?;
	let output = tmp.path().join("out.html");

	let mut cmd = common::slotted_cmd();
	cmd.arg("render")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("items.json"))
		.arg("--config")
		.arg(tmp.path().join("slotted.toml"))
		.arg("--output")
		.arg(&output)
		.assert()
		.success()
		.stdout(predicates::str::contains("rendered 2 item(s)"));

	let html = std::fs::read_to_string(&output)?;
	assert!(html.contains("Top Destinations"));
	assert!(html.contains(r#"class="link""#));

	Ok(())
}

#[test]
fn render_normalizes_a_single_object_to_one_item() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_fixtures(tmp.path())?;
	std::fs::write(
		tmp.path().join("items.json"),
		r#"{ "category": "Solo", "linkText": "One Item", "linkUrl": "https://example.com/one" }"#,
	)?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("render")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("items.json"))
		.arg("--config")
		.arg(tmp.path().join("slotted.toml"))
		.assert()
		.success()
		.stdout(predicates::str::contains("One Item"));

	Ok(())
}

#[test]
fn render_fails_under_strict_attributes() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_fixtures(tmp.path())?;
	std::fs::write(
		tmp.path().join("slotted.toml"),
		r##"template = "#result-template"
container = "#results-container"

[slots.link]
onclick = "alert(1)"
"##,
	)?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("render")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("items.json"))
		.arg("--config")
		.arg(tmp.path().join("slotted.toml"))
		.arg("--strict-attributes")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("not a permitted attribute"));

	Ok(())
}

#[test]
fn render_fails_when_the_template_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_fixtures(tmp.path())?;
	std::fs::write(
		tmp.path().join("slotted.toml"),
		r##"template = "#no-such-template"
container = "#results-container"
"##,
	)?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("render")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("items.json"))
		.arg("--config")
		.arg(tmp.path().join("slotted.toml"))
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("no element matches selector"));

	Ok(())
}

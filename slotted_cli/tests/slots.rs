mod common;

use predicates::prelude::PredicateBooleanExt;
use slotted_core::AnyEmptyResult;

#[test]
fn slots_lists_markers_in_document_order() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.html"), common::PAGE)?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("slots")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.assert()
		.success()
		.stdout(
			predicates::str::contains("category <h3>")
				.and(predicates::str::contains("link <a>"))
				.and(predicates::str::contains("2 slot marker(s)")),
		);

	Ok(())
}

#[test]
fn slots_flags_shadowed_duplicates() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("page.html"),
		r##"<template id="tpl">
	<p data-template="name"></p>
	<span data-template="name"></span>
</template>
"##,
	)?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("slots")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--template")
		.arg("#tpl")
		.assert()
		.success()
		.stdout(predicates::str::contains("[shadowed]"));

	Ok(())
}

#[test]
fn slots_emits_json_when_requested() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.html"), common::PAGE)?;

	let output = common::slotted_cmd()
		.arg("slots")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--format")
		.arg("json")
		.assert()
		.success()
		.get_output()
		.stdout
		.clone();

	let slots: serde_json::Value = serde_json::from_slice(&output)?;
	let entries = slots.as_array().expect("a JSON array of slot entries");
	assert_eq!(entries.len(), 2);
	assert_eq!(entries[0]["key"], "category");
	assert_eq!(entries[1]["key"], "link");

	Ok(())
}

#[test]
fn slots_fails_on_a_non_template_selector() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("page.html"), common::PAGE)?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("slots")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--template")
		.arg("#results-container")
		.assert()
		.failure()
		.code(2)
		.stderr(predicates::str::contains("not a <template>"));

	Ok(())
}

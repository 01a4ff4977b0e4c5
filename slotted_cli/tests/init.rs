mod common;

use similar_asserts::assert_eq;
use slotted_core::AnyEmptyResult;

#[test]
fn init_creates_the_sample_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created page file"));

	assert!(tmp.path().join("page.html").is_file());
	assert!(tmp.path().join("slotted.toml").is_file());
	assert!(tmp.path().join("items.json").is_file());

	Ok(())
}

#[test]
fn init_leaves_existing_files_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let page_path = tmp.path().join("page.html");
	std::fs::write(&page_path, "<p>hand-written</p>\n")?;

	let mut cmd = common::slotted_cmd();
	cmd.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	let content = std::fs::read_to_string(&page_path)?;
	assert_eq!(content, "<p>hand-written</p>\n");

	Ok(())
}

#[test]
fn initialized_samples_render_end_to_end() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::slotted_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::slotted_cmd()
		.arg("render")
		.arg("--page")
		.arg(tmp.path().join("page.html"))
		.arg("--data")
		.arg(tmp.path().join("items.json"))
		.arg("--config")
		.arg(tmp.path().join("slotted.toml"))
		.assert()
		.success()
		.stdout(predicates::str::contains("Learn JavaScript"));

	Ok(())
}

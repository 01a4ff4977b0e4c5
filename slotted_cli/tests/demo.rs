mod common;

use predicates::prelude::PredicateBooleanExt;
use slotted_core::AnyEmptyResult;

#[test]
fn demo_renders_the_mock_items() -> AnyEmptyResult {
	let mut cmd = common::slotted_cmd();
	cmd.arg("demo")
		.arg("--delay-ms")
		.arg("10")
		.assert()
		.success()
		.stdout(
			predicates::str::contains("Investing 101")
				.and(predicates::str::contains("https://example.com/top-destinations"))
				.and(predicates::str::contains("data-template").not()),
		);

	Ok(())
}

use predicates::str;
use rstest::rstest;
use test_utilities::*;

#[test]
fn no_arguments_prints_usage() {
	tileutils_cmd()
		.assert()
		.failure()
		.code(2)
		.stdout(str::is_empty())
		.stderr(str::contains("Usage: tileutils [OPTIONS] <COMMAND>"));
}

#[test]
fn help_lists_all_subcommands() {
	let assert = tileutils_cmd().arg("--help").assert().success();
	let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
	for subcommand in [
		"mbtiles-to-archive",
		"archive-to-mbtiles",
		"archive-to-tree",
		"tree-to-archive",
		"export-index",
		"import-index",
	] {
		assert!(stdout.contains(subcommand), "missing {subcommand} in:\n{stdout}");
	}
}

#[rstest]
#[case("mbtiles-to-archive", "--metadata-path")]
#[case("archive-to-mbtiles", "--name")]
#[case("archive-to-tree", "out/{z}/{x}/{y}.png")]
#[case("tree-to-archive", "tiles.pmtiles")]
#[case("import-index", "--input-index-path")]
fn subcommand_help_shows_flags(#[case] subcommand: &str, #[case] pattern: &str) {
	tileutils_cmd()
		.args([subcommand, "--help"])
		.assert()
		.success()
		.stdout(str::contains(pattern));
}

#[test]
fn unknown_flag_is_a_usage_error() {
	tileutils_cmd()
		.args(["export-index", "--input-path", "a", "--output-path", "b", "--bogus"])
		.assert()
		.failure()
		.code(2);
}

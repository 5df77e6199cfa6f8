use assert_fs::{TempDir, prelude::*};
use predicates::{prelude::PredicateBooleanExt, str};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::path::{Path, PathBuf};
use test_utilities::*;

struct Inputs {
	archive: PathBuf,
	database: PathBuf,
	index: PathBuf,
}

/// Builds an archive, a database and an index file to feed the converters.
fn prepare_inputs(dir: &Path) -> Inputs {
	write_tree(&dir.join("tree"), 1);
	let template = format!("{}/tree/{{z}}/{{x}}/{{y}}.png", dir.display());
	let inputs = Inputs {
		archive: dir.join("in.pmtiles"),
		database: dir.join("in.mbtiles"),
		index: dir.join("in.index"),
	};

	for args in [
		["tree-to-archive", "--input-path", template.as_str(), "--output-path", path_str(&inputs.archive)],
		["archive-to-mbtiles", "--input-path", path_str(&inputs.archive), "--output-path", path_str(&inputs.database)],
		["export-index", "--input-path", path_str(&inputs.archive), "--output-path", path_str(&inputs.index)],
	] {
		tileutils_cmd().args(args).assert().success();
	}
	inputs
}

#[rstest]
#[case::archive_to_mbtiles("archive-to-mbtiles")]
#[case::mbtiles_to_archive("mbtiles-to-archive")]
#[case::export_index("export-index")]
#[case::import_index("import-index")]
fn existing_output_stays_byte_identical(#[case] subcommand: &str) {
	let dir = TempDir::new().unwrap();
	let inputs = prepare_inputs(dir.path());
	let output = dir.child("existing.out");
	output.write_binary(b"precious bytes").unwrap();
	let output_path = path_str(output.path());

	let args = match subcommand {
		"import-index" => vec![
			subcommand,
			"--input-index-path",
			path_str(&inputs.index),
			"--input-tiles-path",
			path_str(&inputs.archive),
			"--output-path",
			output_path,
		],
		"mbtiles-to-archive" => vec![subcommand, "--input-path", path_str(&inputs.database), "--output-path", output_path],
		_ => vec![subcommand, "--input-path", path_str(&inputs.archive), "--output-path", output_path],
	};

	tileutils_cmd()
		.args(&args)
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("--output-path").and(str::contains("already exists")));

	assert_eq!(std::fs::read(output.path()).unwrap(), b"precious bytes");
}

#[test]
fn existing_output_is_left_untouched() {
	let dir = TempDir::new().unwrap();
	write_tree(&dir.path().join("tree"), 1);
	let output = dir.child("tiles.pmtiles");
	output.write_binary(b"precious bytes").unwrap();

	let template = format!("{}/tree/{{z}}/{{x}}/{{y}}.png", dir.path().display());
	tileutils_cmd()
		.args(["tree-to-archive", "--input-path", &template, "--output-path", path_str(output.path())])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("already exists"));

	assert_eq!(std::fs::read(output.path()).unwrap(), b"precious bytes");
}

#[test]
fn missing_input_fails() {
	let dir = TempDir::new().unwrap();
	let output = dir.path().join("out.mbtiles");
	tileutils_cmd()
		.args([
			"archive-to-mbtiles",
			"--input-path",
			path_str(&dir.path().join("missing.pmtiles")),
			"--output-path",
			path_str(&output),
		])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("--input-path").and(str::contains("does not exist")));
	assert!(!output.exists());
}

#[test]
fn empty_input_path_fails() {
	tileutils_cmd()
		.args(["export-index", "--input-path", "", "--output-path", "never.index"])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("--input-path must not be empty"));
}

#[test]
fn existing_tree_root_is_rejected() {
	let dir = TempDir::new().unwrap();
	write_tree(&dir.path().join("tree"), 0);
	let archive = dir.path().join("tiles.pmtiles");
	let template = format!("{}/tree/{{z}}/{{x}}/{{y}}.png", dir.path().display());

	tileutils_cmd()
		.args(["tree-to-archive", "--input-path", &template, "--output-path", path_str(&archive)])
		.assert()
		.success();

	tileutils_cmd()
		.args(["archive-to-tree", "--input-path", path_str(&archive), "--output-path", &template])
		.assert()
		.failure()
		.code(1)
		.stderr(str::contains("already exists"));
}

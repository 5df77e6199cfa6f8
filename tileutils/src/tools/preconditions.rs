//! Argument checks that run before any file is opened.

use anyhow::{Context, Result, ensure};
use std::{fs, path::Path};
use tileutils_core::Blob;

/// `path` must be non-empty and exist.
pub fn ensure_input<'a>(flag: &str, path: &'a str) -> Result<&'a Path> {
	ensure!(!path.is_empty(), "{flag} must not be empty");
	let path = Path::new(path);
	ensure!(path.exists(), "{flag} {path:?} does not exist");
	Ok(path)
}

/// `path` must be non-empty and must not exist yet.
pub fn ensure_output<'a>(flag: &str, path: &'a str) -> Result<&'a Path> {
	ensure!(!path.is_empty(), "{flag} must not be empty");
	let path = Path::new(path);
	ensure!(!path.exists(), "{flag} {path:?} already exists");
	Ok(path)
}

/// `value` must be non-empty. Used for path templates, which are checked by their adapters.
pub fn ensure_not_empty<'a>(flag: &str, value: &'a str) -> Result<&'a str> {
	ensure!(!value.is_empty(), "{flag} must not be empty");
	Ok(value)
}

/// Contents of the optional metadata file, empty if none is given.
pub fn read_metadata(path: Option<&str>) -> Result<Blob> {
	match path.filter(|path| !path.is_empty()) {
		None => Ok(Blob::new_empty()),
		Some(path) => {
			let path = ensure_input("--metadata-path", path)?;
			let bytes = fs::read(path).with_context(|| format!("reading metadata from {path:?}"))?;
			Ok(Blob::from(bytes))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_fs::{NamedTempFile, prelude::*};
	use pretty_assertions::assert_eq;

	#[test]
	fn input_and_output_checks() -> Result<()> {
		let file = NamedTempFile::new("present.bin")?;
		file.write_str("x")?;
		let existing = file.path().to_str().unwrap();

		assert_eq!(ensure_input("--input-path", existing)?, file.path());
		assert_eq!(
			ensure_input("--input-path", "").unwrap_err().to_string(),
			"--input-path must not be empty"
		);
		assert!(
			ensure_input("--input-path", "/no/such/file")
				.unwrap_err()
				.to_string()
				.ends_with("does not exist")
		);

		assert!(
			ensure_output("--output-path", existing)
				.unwrap_err()
				.to_string()
				.ends_with("already exists")
		);
		assert!(ensure_output("--output-path", "/no/such/file").is_ok());
		assert!(ensure_not_empty("--output-path", "").is_err());
		Ok(())
	}

	#[test]
	fn metadata_is_optional() -> Result<()> {
		assert!(read_metadata(None)?.is_empty());
		assert!(read_metadata(Some(""))?.is_empty());

		let file = NamedTempFile::new("meta.json")?;
		file.write_str("{\"name\":\"x\"}")?;
		assert_eq!(read_metadata(file.path().to_str())?, Blob::from("{\"name\":\"x\"}"));

		assert!(read_metadata(Some("/no/such/meta.json")).is_err());
		Ok(())
	}
}

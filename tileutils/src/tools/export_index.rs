use super::preconditions::{ensure_input, ensure_output};
use anyhow::Result;
use tileutils_container::{ArchiveReader, IndexFileWriter, export_index};
use tileutils_core::progress::{DEFAULT_PROGRESS_INTERVAL, ProgressReporter};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// archive to read
	#[arg(long, value_name = "PATH")]
	input_path: String,

	/// index file to create
	#[arg(long, value_name = "PATH")]
	output_path: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let input = ensure_input("--input-path", &arguments.input_path)?;
	let output = ensure_output("--output-path", &arguments.output_path)?;

	log::info!("Creating reader...");
	let mut reader = ArchiveReader::open(input)?;
	let writer = IndexFileWriter::create(output)?;

	log::info!("Writing index...");
	let count = export_index(&mut reader, writer, ProgressReporter::log_every(DEFAULT_PROGRESS_INTERVAL))?;
	log::debug!("{count} index items written");

	log::info!("Done!");
	Ok(())
}

use super::{
	convert,
	preconditions::{ensure_input, ensure_output},
};
use anyhow::Result;
use tileutils_container::{ArchiveWriter, IndexReplaySource};
use tileutils_core::Blob;

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// index file written by export-index
	#[arg(long, value_name = "PATH")]
	input_index_path: String,

	/// file the index points into, usually the archive it was exported from
	#[arg(long, value_name = "PATH")]
	input_tiles_path: String,

	/// archive to create
	#[arg(long, value_name = "PATH")]
	output_path: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let index = ensure_input("--input-index-path", &arguments.input_index_path)?;
	let tiles = ensure_input("--input-tiles-path", &arguments.input_tiles_path)?;
	let output = ensure_output("--output-path", &arguments.output_path)?;

	log::info!("Creating reader...");
	let reader = IndexReplaySource::open(index, tiles)?;
	let writer = ArchiveWriter::create(output, Blob::new_empty())?;

	convert(reader, writer)
}

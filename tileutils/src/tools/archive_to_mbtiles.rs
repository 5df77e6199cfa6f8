use super::{
	convert,
	preconditions::{ensure_input, ensure_output},
};
use anyhow::Result;
use tileutils_container::{ArchiveReader, DEFAULT_FORMAT, DEFAULT_NAME, MBTilesWriter};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// archive to read
	#[arg(long, value_name = "PATH")]
	input_path: String,

	/// MBTiles database to create
	#[arg(long, value_name = "PATH")]
	output_path: String,

	/// value of the "name" metadata row
	#[arg(long, default_value = DEFAULT_NAME)]
	name: String,

	/// value of the "format" metadata row
	#[arg(long, default_value = DEFAULT_FORMAT)]
	format: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let input = ensure_input("--input-path", &arguments.input_path)?;
	let output = ensure_output("--output-path", &arguments.output_path)?;

	log::info!("Creating reader...");
	let reader = ArchiveReader::open(input)?;
	let metadata = [("name", arguments.name.as_str()), ("format", arguments.format.as_str())];
	let writer = MBTilesWriter::create(output, &metadata)?;

	convert(reader, writer)
}

use super::{
	convert,
	preconditions::{ensure_input, ensure_not_empty},
};
use anyhow::Result;
use tileutils_container::{ArchiveReader, DirectoryWriter, PathTemplate};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// archive to read
	#[arg(long, value_name = "PATH")]
	input_path: String,

	/// path template with {x}, {y} and {z}; its root directory must not exist
	#[arg(long, value_name = "TEMPLATE", default_value = "out/{z}/{x}/{y}.png")]
	output_path: String,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let input = ensure_input("--input-path", &arguments.input_path)?;
	let template = PathTemplate::parse(ensure_not_empty("--output-path", &arguments.output_path)?)?;

	let writer = DirectoryWriter::create(template)?;

	log::info!("Creating reader...");
	let reader = ArchiveReader::open(input)?;

	convert(reader, writer)
}

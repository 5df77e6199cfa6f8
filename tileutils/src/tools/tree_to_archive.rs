use super::{
	convert,
	preconditions::{ensure_not_empty, ensure_output, read_metadata},
};
use anyhow::Result;
use tileutils_container::{ArchiveWriter, DirectoryReader, PathTemplate};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// path template with {x}, {y} and {z}; every file below its root must match it
	#[arg(long, value_name = "TEMPLATE")]
	input_path: String,

	/// archive to create
	#[arg(long, value_name = "PATH", default_value = "tiles.pmtiles")]
	output_path: String,

	/// file whose contents are stored as archive metadata
	#[arg(long, value_name = "PATH")]
	metadata_path: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let template = PathTemplate::parse(ensure_not_empty("--input-path", &arguments.input_path)?)?;
	let output = ensure_output("--output-path", &arguments.output_path)?;
	let metadata = read_metadata(arguments.metadata_path.as_deref())?;

	log::info!("Creating reader...");
	let reader = DirectoryReader::open(template)?;
	let writer = ArchiveWriter::create(output, metadata)?;

	convert(reader, writer)
}

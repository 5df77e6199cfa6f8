use super::{
	convert,
	preconditions::{ensure_input, ensure_output, read_metadata},
};
use anyhow::Result;
use tileutils_container::{ArchiveWriter, MBTilesReader};

#[derive(clap::Args, Debug)]
#[command(arg_required_else_help = true, disable_version_flag = true)]
pub struct Subcommand {
	/// MBTiles database to read
	#[arg(long, value_name = "PATH")]
	input_path: String,

	/// archive to create
	#[arg(long, value_name = "PATH", default_value = "tiles.pmtiles")]
	output_path: String,

	/// file whose contents are stored as archive metadata
	#[arg(long, value_name = "PATH")]
	metadata_path: Option<String>,
}

pub fn run(arguments: &Subcommand) -> Result<()> {
	let input = ensure_input("--input-path", &arguments.input_path)?;
	let output = ensure_output("--output-path", &arguments.output_path)?;
	let metadata = read_metadata(arguments.metadata_path.as_deref())?;

	log::info!("Creating reader...");
	let reader = MBTilesReader::open(input)?;
	let writer = ArchiveWriter::create(output, metadata)?;

	convert(reader, writer)
}

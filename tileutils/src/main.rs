mod tools;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};

#[derive(Parser, Debug)]
#[command(
	author,
	version,
	about,
	long_about = None,
	propagate_version = true,
	disable_help_subcommand = true,
)]
struct Cli {
	#[command(subcommand)]
	command: Commands,

	#[command(flatten)]
	verbose: Verbosity<InfoLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
	/// Convert an MBTiles database into an archive
	MbtilesToArchive(tools::mbtiles_to_archive::Subcommand),

	/// Convert an archive into an MBTiles database
	ArchiveToMbtiles(tools::archive_to_mbtiles::Subcommand),

	/// Write the tiles of an archive into a directory tree
	ArchiveToTree(tools::archive_to_tree::Subcommand),

	/// Collect the files of a directory tree into an archive
	TreeToArchive(tools::tree_to_archive::Subcommand),

	/// Write the tile locations of an archive into an index file
	ExportIndex(tools::export_index::Subcommand),

	/// Build an archive from an index file and the tiles it points into
	ImportIndex(tools::import_index::Subcommand),
}

fn main() -> Result<()> {
	let cli = Cli::parse();

	env_logger::Builder::new()
		.filter_level(cli.verbose.log_level_filter())
		.format_timestamp(None)
		.init();

	run(cli)
}

fn run(cli: Cli) -> Result<()> {
	match &cli.command {
		Commands::MbtilesToArchive(arguments) => tools::mbtiles_to_archive::run(arguments),
		Commands::ArchiveToMbtiles(arguments) => tools::archive_to_mbtiles::run(arguments),
		Commands::ArchiveToTree(arguments) => tools::archive_to_tree::run(arguments),
		Commands::TreeToArchive(arguments) => tools::tree_to_archive::run(arguments),
		Commands::ExportIndex(arguments) => tools::export_index::run(arguments),
		Commands::ImportIndex(arguments) => tools::import_index::run(arguments),
	}
}

//! Tile database in the MBTiles layout: a SQLite file with a `tiles` table holding top-origin
//! rows and a `metadata` table of name/value pairs.

mod reader;
mod writer;

pub use reader::MBTilesReader;
pub use writer::MBTilesWriter;

/// Value of the `name` metadata row when nothing else is configured.
pub const DEFAULT_NAME: &str = "dataset_name";

/// Value of the `format` metadata row when nothing else is configured.
pub const DEFAULT_FORMAT: &str = "png";

//! Tiles as one file per tile, laid out by a [`PathTemplate`]. Paths carry the archive's rows.

mod reader;
mod template;
mod writer;

pub use reader::DirectoryReader;
pub use template::PathTemplate;
pub use writer::DirectoryWriter;

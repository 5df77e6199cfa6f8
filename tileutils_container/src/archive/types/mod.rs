mod compression;
mod directory;
mod entries;
mod entry;
mod header;

pub use compression::ArchiveCompression;
pub use directory::Directory;
pub use entries::Entries;
pub use entry::Entry;
pub use header::{HEADER_LENGTH, Header, ROOT_AREA_LENGTH};

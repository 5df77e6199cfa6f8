//! Tile sources, sinks and the streaming bridge between them.
//!
//! | Container       | Source                 | Sink                | Row origin |
//! |-----------------|------------------------|---------------------|------------|
//! | archive         | [`ArchiveReader`]      | [`ArchiveWriter`]   | bottom     |
//! | tile database   | [`MBTilesReader`]      | [`MBTilesWriter`]   | top        |
//! | directory tree  | [`DirectoryReader`]    | [`DirectoryWriter`] | as archive |
//! | index + blob    | [`IndexReplaySource`]  | [`IndexFileWriter`] | bottom     |
//!
//! Tiles travel through the [`ConversionJob`] in archive convention. The tile database adapters
//! flip rows at their own boundary, so every transfer between an archive and a database applies
//! the flip exactly once. Tree paths carry the archive's rows and are never flipped.

mod archive;
pub use archive::{ArchiveReader, ArchiveWriter};

mod bridge;
pub use bridge::{ConversionAborted, ConversionJob, TileSink, TileSource};

mod directory;
pub use directory::{DirectoryReader, DirectoryWriter, PathTemplate};

mod index;
pub use index::{IndexFileWriter, IndexReplaySource, export_index, read_index_file};

mod mbtiles;
pub use mbtiles::{DEFAULT_FORMAT, DEFAULT_NAME, MBTilesReader, MBTilesWriter};

mod blob;
mod byte_range;
mod hilbert;
mod index_item;
mod tile_id;

pub use blob::Blob;
pub use byte_range::ByteRange;
pub use hilbert::{hilbert_index_to_tile_id, tile_id_to_hilbert_index};
pub use index_item::{INDEX_ITEM_SIZE, IndexItem};
pub use tile_id::{MAX_ZOOM, TileId, to_archive_row, to_tree_row};

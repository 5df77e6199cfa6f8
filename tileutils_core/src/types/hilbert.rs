//! Hilbert curve indices used as archive tile ids.
//!
//! Zoom levels are stacked: the ids of level `z` start after all `4^0 + ... + 4^(z-1)` ids of the
//! lower levels, and within a level the tiles follow a Hilbert curve.

use super::{MAX_ZOOM, TileId};
use anyhow::{Result, bail};

pub fn tile_id_to_hilbert_index(id: &TileId) -> Result<u64> {
	let (x, y, z) = (id.x, id.y, id.z);
	if z > MAX_ZOOM {
		bail!("zoom level {z} exceeds the maximum of {MAX_ZOOM}");
	}

	let n = 1u64 << z;
	if u64::from(x) >= n || u64::from(y) >= n {
		bail!("tile {id} lies outside of its zoom level");
	}

	let acc: u64 = (0..z).map(|level| 1u64 << (level * 2)).sum();

	let (mut tx, mut ty) = (u64::from(x), u64::from(y));
	let mut d = 0u64;
	let mut s = n / 2;
	while s > 0 {
		let rx = u64::from(tx & s > 0);
		let ry = u64::from(ty & s > 0);
		d += s * s * ((3 * rx) ^ ry);
		rotate(s, &mut tx, &mut ty, rx, ry);
		s /= 2;
	}

	Ok(acc + d)
}

pub fn hilbert_index_to_tile_id(index: u64) -> Result<TileId> {
	let mut acc = 0u64;
	for z in 0..=MAX_ZOOM {
		let num_tiles = 1u64 << (z * 2);
		if acc + num_tiles > index {
			let n = 1u64 << z;
			let mut t = index - acc;
			let (mut tx, mut ty) = (0u64, 0u64);

			let mut s = 1u64;
			while s < n {
				let rx = (t / 2) & 1;
				let ry = (t ^ rx) & 1;
				rotate(s, &mut tx, &mut ty, rx, ry);
				tx += s * rx;
				ty += s * ry;
				t /= 4;
				s *= 2;
			}

			return TileId::new(tx as u32, ty as u32, z);
		}
		acc += num_tiles;
	}
	bail!("hilbert index {index} exceeds the maximum zoom level {MAX_ZOOM}")
}

/// Rotates the quadrant of size `s`. Only the bits below `s` are kept, higher ones are never
/// read again.
fn rotate(s: u64, tx: &mut u64, ty: &mut u64, rx: u64, ry: u64) {
	if ry == 0 {
		if rx == 1 {
			*tx = s - 1 - (*tx & (s - 1));
			*ty = s - 1 - (*ty & (s - 1));
		}
		std::mem::swap(tx, ty);
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(0, 0, 0, 0)]
	#[case(1, 1, 1, 3)]
	#[case(2, 2, 2, 13)]
	#[case(5, 3, 3, 73)]
	#[case(7, 7, 3, 63)]
	#[case(0, 0, 31, 1537228672809129301)]
	#[case((1 << 31) - 1, (1 << 31) - 1, 31, 4611686018427387903)]
	fn known_indices(#[case] x: u32, #[case] y: u32, #[case] z: u32, #[case] index: u64) {
		let id = TileId::new(x, y, z).unwrap();
		assert_eq!(tile_id_to_hilbert_index(&id).unwrap(), index);
		assert_eq!(hilbert_index_to_tile_id(index).unwrap(), id);
	}

	#[test]
	fn rejects_out_of_range() {
		let id = TileId { x: 1, y: 0, z: 0 };
		assert_eq!(
			tile_id_to_hilbert_index(&id).unwrap_err().to_string(),
			"tile 0/1/0 lies outside of its zoom level"
		);
		assert!(hilbert_index_to_tile_id(u64::MAX).is_err());
	}

	#[test]
	fn small_levels_fill_their_index_range() {
		let mut offset = 0u64;
		for z in 0..=5u32 {
			let n = 1u32 << z;
			let mut indices = Vec::new();
			for x in 0..n {
				for y in 0..n {
					let id = TileId::new(x, y, z).unwrap();
					let index = tile_id_to_hilbert_index(&id).unwrap();
					assert_eq!(hilbert_index_to_tile_id(index).unwrap(), id);
					indices.push(index);
				}
			}
			indices.sort_unstable();
			let level_size = u64::from(n) * u64::from(n);
			assert_eq!(indices, (offset..offset + level_size).collect::<Vec<_>>(), "zoom {z}");
			offset += level_size;
		}
	}

	#[test]
	fn indices_round_trip() {
		let mut f = 0f64;
		loop {
			let index = f as u64;
			let id = hilbert_index_to_tile_id(index).unwrap();
			assert_eq!(tile_id_to_hilbert_index(&id).unwrap(), index);
			if id.z > 30 {
				break;
			}
			f = f * 1.1 + 1.0;
		}
	}
}

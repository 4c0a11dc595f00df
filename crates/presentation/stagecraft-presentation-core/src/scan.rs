//! Region scanning for computed masks.

use stagecraft_api_core::BlockPos;

/// Positions in the cube of Chebyshev radius `extents` around `center`,
/// excluding everything closer than `min_distance`. With `min_distance`
/// zero the center itself is included.
pub fn scan_region(center: BlockPos, extents: u32, min_distance: u32) -> Vec<BlockPos> {
    let e = extents as i32;
    let mut positions = Vec::new();
    for dx in -e..=e {
        for dy in -e..=e {
            for dz in -e..=e {
                let pos = center.offset(dx, dy, dz);
                if center.chebyshev(&pos) >= min_distance {
                    positions.push(pos);
                }
            }
        }
    }
    positions
}

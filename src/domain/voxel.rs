// Coarse occupancy codes for sampled blocks.

/// Occupancy of one grid cell as sent on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum VoxelCode {
    Empty = 0,
    Solid = 1,
    Liquid = 2,
}

impl VoxelCode {
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

const AIR_BLOCKS: [&str; 3] = ["air", "cave_air", "void_air"];
const LIQUID_MARKERS: [&str; 2] = ["water", "lava"];

/// Maps a block type id (e.g. `minecraft:stone`) to its occupancy code.
///
/// Absent blocks and every air variant are empty; anything naming water or
/// lava is liquid; everything else is solid.
pub fn encode(block_type: Option<&str>) -> VoxelCode {
    let Some(id) = block_type else {
        return VoxelCode::Empty;
    };

    // Compare the path part so both `air` and `minecraft:air` match.
    let path = id.rsplit_once(':').map_or(id, |(_, path)| path);
    if path.is_empty() || AIR_BLOCKS.contains(&path) {
        return VoxelCode::Empty;
    }

    if LIQUID_MARKERS.iter().any(|marker| path.contains(marker)) {
        return VoxelCode::Liquid;
    }

    VoxelCode::Solid
}

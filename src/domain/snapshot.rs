// Voxelized neighborhood around an actor.

use super::ports::BlockSource;
use super::state::{ActorInfo, BlockPos, Rotation, Vec3};
use super::voxel::{self, VoxelCode};

/// Largest radius or half-height a scan will cover; larger requests are clamped.
pub const MAX_SCAN_EXTENT: u32 = 64;

/// Actor metadata carried with a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorPose {
    pub name: String,
    pub pos: Vec3,
    pub rot: Rotation,
    pub dimension: String,
}

/// Dense occupancy grid centered on an actor.
///
/// `grid` is flattened y-major, then z, then x (x varies fastest), with
/// `width = 2 * radius + 1` and `height = 2 * half_height + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxelSnapshot {
    pub actor: ActorPose,
    pub origin: BlockPos,
    pub radius: u32,
    pub half_height: u32,
    pub width: u32,
    pub height: u32,
    pub grid: Vec<u8>,
}

impl VoxelSnapshot {
    /// Code at an offset relative to `origin`, if inside the grid.
    pub fn code_at(&self, dx: i32, dy: i32, dz: i32) -> Option<u8> {
        let r = self.radius as i32;
        let h = self.half_height as i32;
        if dx.abs() > r || dz.abs() > r || dy.abs() > h {
            return None;
        }
        let width = self.width as usize;
        let iy = (dy + h) as usize;
        let iz = (dz + r) as usize;
        let ix = (dx + r) as usize;
        self.grid.get((iy * width + iz) * width + ix).copied()
    }
}

/// Samples the cuboid around `actor` through `source`, one lookup per cell.
///
/// A failing lookup yields [`VoxelCode::Empty`] for that cell only. Both
/// extents are clamped to [`MAX_SCAN_EXTENT`].
pub fn build<S>(source: &S, actor: &ActorInfo, radius: u32, half_height: u32) -> VoxelSnapshot
where
    S: BlockSource + ?Sized,
{
    let radius = radius.min(MAX_SCAN_EXTENT);
    let half_height = half_height.min(MAX_SCAN_EXTENT);
    let origin = actor.location.floor();
    let width = 2 * radius + 1;
    let height = 2 * half_height + 1;
    let r = radius as i32;
    let h = half_height as i32;

    let cells = (width as usize) * (width as usize) * (height as usize);
    let mut grid = Vec::with_capacity(cells);
    let mut failures = 0usize;
    for dy in -h..=h {
        for dz in -r..=r {
            for dx in -r..=r {
                let pos = origin.offset(dx, dy, dz);
                let code = match source.block_type(&actor.dimension, pos) {
                    Ok(block) => voxel::encode(block.as_deref()),
                    Err(_) => {
                        failures += 1;
                        VoxelCode::Empty
                    }
                };
                grid.push(code.as_u8());
            }
        }
    }

    if failures > 0 {
        tracing::debug!(actor = %actor.name, failures, "voxel scan had failed lookups");
    }

    VoxelSnapshot {
        actor: ActorPose {
            name: actor.name.clone(),
            pos: actor.location,
            rot: actor.rotation,
            dimension: actor.dimension.clone(),
        },
        origin,
        radius,
        half_height,
        width,
        height,
        grid,
    }
}

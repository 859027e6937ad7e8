// Domain layer: world types, pure algorithms and the ports the bridge talks through.

pub mod camera;
pub mod commands;
pub mod errors;
pub mod ports;
pub mod snapshot;
pub mod state;
pub mod voxel;

pub use commands::{ActorCommand, CameraControl, GlobalCommand, LegacyCommand, MoveMethod};
pub use errors::{LookupError, TransportError, WorldError};
pub use ports::{BlockSource, Clock, Inbound, Outbound, Transport, WorldPort};
pub use snapshot::{ActorPose, VoxelSnapshot};
pub use state::{
    ActorInfo, BlockPos, ChatEvent, HitEvent, PlayerSummary, ReportPayload, Rotation, TagSets,
    Vec3,
};

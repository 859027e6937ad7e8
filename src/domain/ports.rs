use async_trait::async_trait;

use super::camera::CameraPose;
use super::commands::{ActorCommand, GlobalCommand, LegacyCommand};
use super::errors::{LookupError, TransportError, WorldError};
use super::snapshot::VoxelSnapshot;
use super::state::{ActorInfo, BlockPos, HitEvent, ReportPayload, Vec3};

// The bridge depends on these traits, not on the engine or HTTP client.
// Dependencies point inwards to the domain layer.

/// Read access to block types.
pub trait BlockSource {
    /// Block type id at `pos`, `None` when the engine reports no block.
    fn block_type(&self, dimension: &str, pos: BlockPos) -> Result<Option<String>, LookupError>;
}

/// Engine adapter owned by the tick task.
pub trait WorldPort: BlockSource {
    /// Every participant currently in the world.
    fn actors(&self) -> Vec<ActorInfo>;

    fn look_at(&mut self, actor_id: &str, target: Vec3) -> Result<(), WorldError>;
    /// Translate the actor along its facing by `step` blocks.
    fn move_forward(&mut self, actor_id: &str, step: f64) -> Result<(), WorldError>;
    fn jump(&mut self, actor_id: &str) -> Result<(), WorldError>;
    fn set_sprinting(&mut self, actor_id: &str, sprinting: bool) -> Result<(), WorldError>;
    fn attack(&mut self, actor_id: &str, target_id: &str) -> Result<(), WorldError>;
    fn teleport(
        &mut self,
        actor_id: &str,
        location: Vec3,
        dimension: &str,
    ) -> Result<(), WorldError>;

    /// Message to every observer.
    fn broadcast(&mut self, message: &str);
    fn send_message(&mut self, actor_id: &str, message: &str) -> Result<(), WorldError>;
    fn show_title(&mut self, title: &str, subtitle: &str);

    fn set_camera(&mut self, operator_id: &str, pose: &CameraPose) -> Result<(), WorldError>;
    fn clear_camera(&mut self, operator_id: &str) -> Result<(), WorldError>;
}

/// One request to the decision service.
#[derive(Debug, Clone, PartialEq)]
pub enum Outbound {
    /// `POST /v1/report`
    Report(ReportPayload),
    /// `POST /v1/pull` on behalf of one bot.
    LegacyPull { actor_id: String },
    /// `POST /v1/mc/state`
    State(VoxelSnapshot),
    /// `POST /v1/mc/next_move` on behalf of one actor.
    NextMove { actor_id: String },
    /// `GET /v1/mc/commands`
    PollCommands,
    /// `POST /v1/mc/events`
    Hit(HitEvent),
    /// `POST /v1/discord/unmute`
    Unmute { mc_name: String },
}

/// Decoded reply for the requests that carry one.
///
/// Replies carry no correlation id; the actor id is the only routing key.
#[derive(Debug, Clone, PartialEq)]
pub enum Inbound {
    NextMove {
        actor_id: String,
        command: ActorCommand,
    },
    LegacyCommands {
        actor_id: String,
        commands: Vec<LegacyCommand>,
    },
    GlobalCommands(Vec<GlobalCommand>),
}

/// Network boundary to the decision service.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `request`, returning the decoded reply if that request has one.
    async fn deliver(&self, request: Outbound) -> Result<Option<Inbound>, TransportError>;
}

/// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_epoch_millis(&self) -> u64;
}

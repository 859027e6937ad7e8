// Commands received from the decision service, already decoded from the wire.

use super::state::BlockPos;

/// How a `move_to` step should be taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveMethod {
    Walk,
    JumpUp,
    LongJump,
}

impl MoveMethod {
    /// Jumping methods also keep the actor sprinting.
    pub fn is_jump(self) -> bool {
        matches!(self, MoveMethod::JumpUp | MoveMethod::LongJump)
    }
}

/// Single per-actor command returned by a next-move poll.
#[derive(Debug, Clone, PartialEq)]
pub enum ActorCommand {
    Idle,
    /// Step toward `target`, given relative to the actor's current block.
    MoveTo { target: BlockPos, method: MoveMethod },
    /// Unknown or malformed command type.
    Ignored,
}

/// Camera control request forwarded to the camera director.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraControl {
    Next,
    Stop,
}

/// Cluster-wide command from the global command queue.
#[derive(Debug, Clone, PartialEq)]
pub enum GlobalCommand {
    /// Move `player` to where `target` stands.
    Teleport { player: String, target: String },
    Camera { operator: String, control: CameraControl },
    Chat { message: String },
    Title { title: String, subtitle: String },
    /// Unknown action tag or malformed entry.
    Ignored,
}

/// Command from the per-bot legacy pull channel.
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyCommand {
    Chat { message: String },
    /// Face the named player and step forward.
    Move { target: String },
    Attack { target: String },
    Ignored,
}

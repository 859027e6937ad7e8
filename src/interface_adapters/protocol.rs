// Wire protocol DTOs and conversions for the decision service.
// Field names follow the service's JSON exactly; domain types stay wire-agnostic.

use crate::domain::{
    ActorCommand, ActorPose, BlockPos, CameraControl, ChatEvent, GlobalCommand, HitEvent,
    LegacyCommand, MoveMethod, PlayerSummary, ReportPayload, Rotation, Vec3, VoxelSnapshot,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// Body for requests that carry no payload.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EmptyBody {}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlockPosDto {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl From<BlockPos> for BlockPosDto {
    fn from(pos: BlockPos) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            z: pos.z,
        }
    }
}

impl From<BlockPosDto> for BlockPos {
    fn from(pos: BlockPosDto) -> Self {
        BlockPos::new(pos.x, pos.y, pos.z)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Vec3Dto {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<Vec3> for Vec3Dto {
    fn from(v: Vec3) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct RotationDto {
    pub x: f64,
    pub y: f64,
}

// The engine names pitch `x` and yaw `y`.
impl From<Rotation> for RotationDto {
    fn from(rot: Rotation) -> Self {
        Self {
            x: rot.pitch,
            y: rot.yaw,
        }
    }
}

/// `POST /v1/report`
#[derive(Debug, Clone, Serialize)]
pub struct ReportDto {
    pub players: Vec<PlayerSummaryDto>,
    pub chats: Vec<ChatEventDto>,
}

impl From<&ReportPayload> for ReportDto {
    fn from(payload: &ReportPayload) -> Self {
        Self {
            players: payload.players.iter().map(PlayerSummaryDto::from).collect(),
            chats: payload.chats.iter().map(ChatEventDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSummaryDto {
    pub name: String,
    pub location: BlockPosDto,
    pub tags: TagSetsDto,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagSetsDto {
    #[serde(rename = "pub")]
    pub public: Vec<String>,
    #[serde(rename = "sec")]
    pub secret: Vec<String>,
}

impl From<&PlayerSummary> for PlayerSummaryDto {
    fn from(player: &PlayerSummary) -> Self {
        Self {
            name: player.name.clone(),
            location: player.location.into(),
            tags: TagSetsDto {
                public: player.tags.public.clone(),
                secret: player.tags.secret.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatEventDto {
    pub sender: String,
    pub message: String,
}

impl From<&ChatEvent> for ChatEventDto {
    fn from(chat: &ChatEvent) -> Self {
        Self {
            sender: chat.sender.clone(),
            message: chat.message.clone(),
        }
    }
}

/// `POST /v1/mc/state`
#[derive(Debug, Clone, Serialize)]
pub struct StateDto {
    pub player: ActorPoseDto,
    pub origin: BlockPosDto,
    pub radius: u32,
    #[serde(rename = "halfHeight")]
    pub half_height: u32,
    pub width: u32,
    pub height: u32,
    pub grid: Vec<u8>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActorPoseDto {
    pub name: String,
    pub pos: Vec3Dto,
    pub rot: RotationDto,
    pub dimension: String,
}

impl From<&ActorPose> for ActorPoseDto {
    fn from(pose: &ActorPose) -> Self {
        Self {
            name: pose.name.clone(),
            pos: pose.pos.into(),
            rot: pose.rot.into(),
            dimension: pose.dimension.clone(),
        }
    }
}

impl From<&VoxelSnapshot> for StateDto {
    fn from(snapshot: &VoxelSnapshot) -> Self {
        Self {
            player: ActorPoseDto::from(&snapshot.actor),
            origin: snapshot.origin.into(),
            radius: snapshot.radius,
            half_height: snapshot.half_height,
            width: snapshot.width,
            height: snapshot.height,
            grid: snapshot.grid.clone(),
        }
    }
}

/// `POST /v1/mc/events`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GameEventDto {
    Hit {
        victim: String,
        attacker: String,
        timestamp: f64,
    },
}

impl From<&HitEvent> for GameEventDto {
    fn from(hit: &HitEvent) -> Self {
        GameEventDto::Hit {
            victim: hit.victim.clone(),
            attacker: hit.attacker.clone(),
            timestamp: hit.timestamp,
        }
    }
}

/// `POST /v1/discord/unmute`
#[derive(Debug, Clone, Serialize)]
pub struct UnmuteDto {
    #[serde(rename = "mcName")]
    pub mc_name: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveMethodDto {
    Walk,
    JumpUp,
    LongJump,
}

impl From<MoveMethodDto> for MoveMethod {
    fn from(method: MoveMethodDto) -> Self {
        match method {
            MoveMethodDto::Walk => MoveMethod::Walk,
            MoveMethodDto::JumpUp => MoveMethod::JumpUp,
            MoveMethodDto::LongJump => MoveMethod::LongJump,
        }
    }
}

/// Reply of `POST /v1/mc/next_move`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActorCommandDto {
    Idle,
    MoveTo {
        target: BlockPosDto,
        method: MoveMethodDto,
    },
    #[serde(other)]
    Unknown,
}

impl From<ActorCommandDto> for ActorCommand {
    fn from(command: ActorCommandDto) -> Self {
        match command {
            ActorCommandDto::Idle => ActorCommand::Idle,
            ActorCommandDto::MoveTo { target, method } => ActorCommand::MoveTo {
                target: target.into(),
                method: method.into(),
            },
            ActorCommandDto::Unknown => ActorCommand::Ignored,
        }
    }
}

/// Decodes a next-move reply; a body that is JSON but not a command is ignored.
pub fn parse_actor_command(body: Value) -> ActorCommand {
    match serde_json::from_value::<ActorCommandDto>(body) {
        Ok(command) => command.into(),
        Err(e) => {
            debug!(error = %e, "unrecognized next move");
            ActorCommand::Ignored
        }
    }
}

/// `{commands: [...]}` envelope used by both command queues.
///
/// Entries stay untyped so each one decodes on its own.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommandListDto {
    #[serde(default)]
    pub commands: Vec<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
enum GlobalCommandDto {
    Tp {
        player: String,
        target: String,
    },
    CameraControl {
        player: String,
        target: String,
    },
    Chat {
        message: String,
    },
    Title {
        title: String,
        #[serde(default)]
        subtitle: String,
    },
    #[serde(other)]
    Unknown,
}

impl From<GlobalCommandDto> for GlobalCommand {
    fn from(command: GlobalCommandDto) -> Self {
        match command {
            GlobalCommandDto::Tp { player, target } => GlobalCommand::Teleport { player, target },
            GlobalCommandDto::CameraControl { player, target } => {
                let control = match target.as_str() {
                    "next" => CameraControl::Next,
                    "stop" => CameraControl::Stop,
                    _ => return GlobalCommand::Ignored,
                };
                GlobalCommand::Camera {
                    operator: player,
                    control,
                }
            }
            GlobalCommandDto::Chat { message } => GlobalCommand::Chat { message },
            GlobalCommandDto::Title { title, subtitle } => GlobalCommand::Title { title, subtitle },
            GlobalCommandDto::Unknown => GlobalCommand::Ignored,
        }
    }
}

/// Decodes each entry independently; malformed ones become `Ignored`.
pub fn parse_global_commands(list: CommandListDto) -> Vec<GlobalCommand> {
    list.commands
        .into_iter()
        .map(|entry| match serde_json::from_value::<GlobalCommandDto>(entry) {
            Ok(command) => command.into(),
            Err(e) => {
                debug!(error = %e, "malformed global command");
                GlobalCommand::Ignored
            }
        })
        .collect()
}

#[derive(Debug, Clone, Deserialize)]
struct LegacyCommandDto {
    action: String,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    target: Option<String>,
}

impl From<LegacyCommandDto> for LegacyCommand {
    fn from(command: LegacyCommandDto) -> Self {
        match (command.action.as_str(), command.message, command.target) {
            ("chat", Some(message), _) if !message.is_empty() => LegacyCommand::Chat { message },
            ("move", _, Some(target)) => LegacyCommand::Move { target },
            ("attack", _, Some(target)) => LegacyCommand::Attack { target },
            _ => LegacyCommand::Ignored,
        }
    }
}

pub fn parse_legacy_commands(list: CommandListDto) -> Vec<LegacyCommand> {
    list.commands
        .into_iter()
        .map(|entry| {
            serde_json::from_value::<LegacyCommandDto>(entry)
                .map(LegacyCommand::from)
                .unwrap_or(LegacyCommand::Ignored)
        })
        .collect()
}

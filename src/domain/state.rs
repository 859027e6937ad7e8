// Domain-level world entities and the value types exchanged with the decision service.

/// Continuous world position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Containing block of this position (floor on every axis).
    pub fn floor(self) -> BlockPos {
        BlockPos {
            x: self.x.floor() as i32,
            y: self.y.floor() as i32,
            z: self.z.floor() as i32,
        }
    }
}

/// Integer block coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

/// Facing of an actor in degrees.
///
/// Yaw 0 faces +Z and grows clockwise seen from above (90 faces -X).
/// Negative pitch looks up.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rotation {
    pub pitch: f64,
    pub yaw: f64,
}

/// Roster entry for one in-world participant, as reported by the engine adapter.
#[derive(Debug, Clone, PartialEq)]
pub struct ActorInfo {
    /// Stable engine id; survives renames.
    pub id: String,
    pub name: String,
    pub location: Vec3,
    pub rotation: Rotation,
    pub dimension: String,
    pub tags: Vec<String>,
}

impl ActorInfo {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Chat line captured from the engine's chat-send hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatEvent {
    pub sender: String,
    pub message: String,
}

/// Tags split by visibility prefix.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagSets {
    /// Tags prefixed `pub:` (visible to everyone).
    pub public: Vec<String>,
    /// Tags prefixed `sec:` (role secrets).
    pub secret: Vec<String>,
}

/// Per-report view of a participant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub name: String,
    pub location: BlockPos,
    pub tags: TagSets,
}

impl From<&ActorInfo> for PlayerSummary {
    fn from(actor: &ActorInfo) -> Self {
        let public = actor
            .tags
            .iter()
            .filter(|t| t.starts_with("pub:"))
            .cloned()
            .collect();
        let secret = actor
            .tags
            .iter()
            .filter(|t| t.starts_with("sec:"))
            .cloned()
            .collect();
        Self {
            name: actor.name.clone(),
            location: actor.location.floor(),
            tags: TagSets { public, secret },
        }
    }
}

/// Payload for one report cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportPayload {
    pub players: Vec<PlayerSummary>,
    pub chats: Vec<ChatEvent>,
}

/// Out-of-band notification that a controlled actor was struck.
#[derive(Debug, Clone, PartialEq)]
pub struct HitEvent {
    pub victim: String,
    pub attacker: String,
    /// Epoch seconds.
    pub timestamp: f64,
}

// Use-case level inputs and settings for the bridge loop.

use crate::domain::camera::ChaseRig;
use std::time::Duration;

/// Engine notifications delivered to the bridge by the engine adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// A participant sent a chat line.
    ChatSent { sender: String, message: String },
    /// `victim_id` was struck; `attacker` is the attacker's name or entity type.
    EntityHit { victim_id: String, attacker: String },
    /// An actor used (right-clicked) an item.
    ItemUsed { actor_id: String, item: String },
}

/// Fixed tick cadence for a periodic job; zero disables the job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cadence(pub u64);

impl Cadence {
    pub fn is_due(self, tick: u64) -> bool {
        self.0 != 0 && tick % self.0 == 0
    }
}

/// Camera director configuration.
#[derive(Debug, Clone)]
pub struct CameraSettings {
    pub interval: Cadence,
    /// Camera runs this many of its own updates before switching target.
    pub switch_after: u32,
    pub operator_tag: String,
    pub rig: ChaseRig,
}

/// Shared configuration for one bridge instance.
#[derive(Debug, Clone)]
pub struct BridgeSettings {
    /// Wall-clock length of one tick.
    pub tick_interval: Duration,
    pub voxel_radius: u32,
    pub voxel_half_height: u32,
    pub sense_interval: Cadence,
    pub report_interval: Cadence,
    pub move_poll_interval: Cadence,
    pub legacy_pull_interval: Cadence,
    pub command_poll_interval: Cadence,
    /// Actors carrying this tag are polled for commands and report hits.
    pub control_tag: String,
    /// Actors carrying this tag get voxel snapshots.
    pub sensor_tag: String,
    pub ghost_tag: String,
    pub unmute_item: String,
    pub item_cooldown: Duration,
    pub camera: CameraSettings,
}

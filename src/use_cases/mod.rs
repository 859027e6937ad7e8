// Use cases layer: the bridge components and the loop that drives them.

pub mod actor;
pub mod bridge;
pub mod camera;
pub mod chat;
pub mod cooldown;
pub mod events;
pub mod global;
pub mod outbox;
pub mod puller;
pub mod report;
pub mod sensing;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use bridge::{Bridge, bridge_task};
pub use outbox::Outbox;
pub use types::{BridgeSettings, Cadence, CameraSettings, EngineEvent};

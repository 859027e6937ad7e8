use std::collections::{HashMap, HashSet};
use tokio::sync::mpsc;

use crate::domain::camera::CameraPose;
use crate::domain::ports::{BlockSource, Clock, Outbound, WorldPort};
use crate::domain::state::{ActorInfo, BlockPos, Rotation, Vec3};
use crate::domain::{LookupError, WorldError};

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) u64);

impl Clock for FixedClock {
    fn now_epoch_millis(&self) -> u64 {
        self.0
    }
}

/// Actuation recorded by [`RecordingWorld`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Action {
    LookAt { actor_id: String, target: Vec3 },
    MoveForward { actor_id: String, step: f64 },
    Jump { actor_id: String },
    Sprint { actor_id: String, sprinting: bool },
    Attack { actor_id: String, target_id: String },
    Teleport { actor_id: String, location: Vec3, dimension: String },
    Broadcast(String),
    Message { actor_id: String, message: String },
    Title { title: String, subtitle: String },
    SetCamera { operator_id: String, pose: CameraPose },
    ClearCamera { operator_id: String },
}

// Fake engine adapter that records every actuation instead of applying it.
#[derive(Default)]
pub(crate) struct RecordingWorld {
    pub(crate) actors: Vec<ActorInfo>,
    pub(crate) blocks: HashMap<BlockPos, String>,
    pub(crate) failing_lookups: HashSet<BlockPos>,
    pub(crate) actions: Vec<Action>,
}

impl RecordingWorld {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_actor(mut self, actor: ActorInfo) -> Self {
        self.actors.push(actor);
        self
    }

    pub(crate) fn actor_mut(&mut self, id: &str) -> &mut ActorInfo {
        self.actors
            .iter_mut()
            .find(|a| a.id == id)
            .expect("actor should exist")
    }

    pub(crate) fn remove_actor(&mut self, id: &str) {
        self.actors.retain(|a| a.id != id);
    }

    fn ensure_present(&self, id: &str) -> Result<(), WorldError> {
        if self.actors.iter().any(|a| a.id == id) {
            Ok(())
        } else {
            Err(WorldError::ActorGone(id.to_string()))
        }
    }
}

pub(crate) fn actor(id: &str, name: &str, location: Vec3, tags: &[&str]) -> ActorInfo {
    ActorInfo {
        id: id.to_string(),
        name: name.to_string(),
        location,
        rotation: Rotation::default(),
        dimension: "minecraft:overworld".to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

pub(crate) fn drain(rx: &mut mpsc::Receiver<Outbound>) -> Vec<Outbound> {
    let mut out = Vec::new();
    while let Ok(request) = rx.try_recv() {
        out.push(request);
    }
    out
}

impl BlockSource for RecordingWorld {
    fn block_type(&self, _dimension: &str, pos: BlockPos) -> Result<Option<String>, LookupError> {
        if self.failing_lookups.contains(&pos) {
            return Err(LookupError::Unloaded);
        }
        Ok(self.blocks.get(&pos).cloned())
    }
}

impl WorldPort for RecordingWorld {
    fn actors(&self) -> Vec<ActorInfo> {
        self.actors.clone()
    }

    fn look_at(&mut self, actor_id: &str, target: Vec3) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::LookAt {
            actor_id: actor_id.to_string(),
            target,
        });
        Ok(())
    }

    fn move_forward(&mut self, actor_id: &str, step: f64) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::MoveForward {
            actor_id: actor_id.to_string(),
            step,
        });
        Ok(())
    }

    fn jump(&mut self, actor_id: &str) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::Jump {
            actor_id: actor_id.to_string(),
        });
        Ok(())
    }

    fn set_sprinting(&mut self, actor_id: &str, sprinting: bool) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::Sprint {
            actor_id: actor_id.to_string(),
            sprinting,
        });
        Ok(())
    }

    fn attack(&mut self, actor_id: &str, target_id: &str) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::Attack {
            actor_id: actor_id.to_string(),
            target_id: target_id.to_string(),
        });
        Ok(())
    }

    fn teleport(
        &mut self,
        actor_id: &str,
        location: Vec3,
        dimension: &str,
    ) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::Teleport {
            actor_id: actor_id.to_string(),
            location,
            dimension: dimension.to_string(),
        });
        Ok(())
    }

    fn broadcast(&mut self, message: &str) {
        self.actions.push(Action::Broadcast(message.to_string()));
    }

    fn send_message(&mut self, actor_id: &str, message: &str) -> Result<(), WorldError> {
        self.ensure_present(actor_id)?;
        self.actions.push(Action::Message {
            actor_id: actor_id.to_string(),
            message: message.to_string(),
        });
        Ok(())
    }

    fn show_title(&mut self, title: &str, subtitle: &str) {
        self.actions.push(Action::Title {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
        });
    }

    fn set_camera(&mut self, operator_id: &str, pose: &CameraPose) -> Result<(), WorldError> {
        self.ensure_present(operator_id)?;
        self.actions.push(Action::SetCamera {
            operator_id: operator_id.to_string(),
            pose: pose.clone(),
        });
        Ok(())
    }

    fn clear_camera(&mut self, operator_id: &str) -> Result<(), WorldError> {
        self.ensure_present(operator_id)?;
        self.actions.push(Action::ClearCamera {
            operator_id: operator_id.to_string(),
        });
        Ok(())
    }
}

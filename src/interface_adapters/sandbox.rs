// In-memory engine adapter: a flat test world that honours the engine port.

use crate::domain::camera::CameraPose;
use crate::domain::{
    ActorInfo, BlockPos, BlockSource, LookupError, Rotation, Vec3, WorldError, WorldPort,
};
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// Top of the stone floor; actors stand at this height.
pub const GROUND_Y: i32 = 64;

/// Square water pool sunk into the floor, `(min, max)` on x and z.
const POOL: (i32, i32) = (4, 7);

/// Flat stone world with a single pool.
///
/// Blocks beyond `loaded_radius` on x or z report as unloaded. Actuations
/// are applied to in-memory state and kept for inspection.
#[derive(Debug, Default)]
pub struct SandboxWorld {
    loaded_radius: i32,
    actors: Vec<ActorInfo>,
    sprinting: HashSet<String>,
    jumps: HashMap<String, u32>,
    cameras: HashMap<String, CameraPose>,
    attacks: Vec<(String, String)>,
    broadcasts: Vec<String>,
    titles: Vec<(String, String)>,
    messages: Vec<(String, String)>,
}

impl SandboxWorld {
    pub fn new(loaded_radius: i32) -> Self {
        Self {
            loaded_radius,
            ..Self::default()
        }
    }

    /// Adds a participant in the overworld facing +z.
    pub fn spawn_actor(&mut self, id: &str, name: &str, location: Vec3, tags: &[&str]) {
        info!(actor = %name, "actor spawned");
        self.actors.push(ActorInfo {
            id: id.to_string(),
            name: name.to_string(),
            location,
            rotation: Rotation::default(),
            dimension: "minecraft:overworld".to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        });
    }

    pub fn despawn_actor(&mut self, id: &str) -> bool {
        let before = self.actors.len();
        self.actors.retain(|a| a.id != id);
        self.cameras.remove(id);
        self.actors.len() != before
    }

    pub fn actor(&self, id: &str) -> Option<&ActorInfo> {
        self.actors.iter().find(|a| a.id == id)
    }

    pub fn is_sprinting(&self, id: &str) -> bool {
        self.sprinting.contains(id)
    }

    pub fn jump_count(&self, id: &str) -> u32 {
        self.jumps.get(id).copied().unwrap_or(0)
    }

    pub fn camera(&self, operator_id: &str) -> Option<&CameraPose> {
        self.cameras.get(operator_id)
    }

    /// `(attacker_id, target_id)` pairs in order.
    pub fn attacks(&self) -> &[(String, String)] {
        &self.attacks
    }

    pub fn broadcasts(&self) -> &[String] {
        &self.broadcasts
    }

    pub fn titles(&self) -> &[(String, String)] {
        &self.titles
    }

    /// Messages sent to one actor.
    pub fn messages_to(&self, id: &str) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(to, _)| to == id)
            .map(|(_, message)| message.as_str())
            .collect()
    }

    fn actor_mut(&mut self, id: &str) -> Result<&mut ActorInfo, WorldError> {
        self.actors
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| WorldError::ActorGone(id.to_string()))
    }

    fn require_actor(&self, id: &str) -> Result<(), WorldError> {
        self.actor(id)
            .map(|_| ())
            .ok_or_else(|| WorldError::ActorGone(id.to_string()))
    }
}

/// Yaw and pitch (degrees) that face from `from` to `to`.
///
/// Yaw 0 faces +z and grows clockwise seen from above; negative pitch looks up.
pub fn facing(from: Vec3, to: Vec3) -> Rotation {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    let dz = to.z - from.z;
    let horizontal = (dx * dx + dz * dz).sqrt();
    Rotation {
        pitch: -dy.atan2(horizontal).to_degrees(),
        yaw: (-dx).atan2(dz).to_degrees(),
    }
}

impl BlockSource for SandboxWorld {
    fn block_type(&self, _dimension: &str, pos: BlockPos) -> Result<Option<String>, LookupError> {
        if pos.x.abs() > self.loaded_radius || pos.z.abs() > self.loaded_radius {
            return Err(LookupError::Unloaded);
        }
        let in_pool = (POOL.0..=POOL.1).contains(&pos.x) && (POOL.0..=POOL.1).contains(&pos.z);
        let block = match pos.y {
            y if y >= GROUND_Y => "minecraft:air",
            y if y == GROUND_Y - 1 && in_pool => "minecraft:water",
            _ => "minecraft:stone",
        };
        Ok(Some(block.to_string()))
    }
}

impl WorldPort for SandboxWorld {
    fn actors(&self) -> Vec<ActorInfo> {
        self.actors.clone()
    }

    fn look_at(&mut self, actor_id: &str, target: Vec3) -> Result<(), WorldError> {
        let actor = self.actor_mut(actor_id)?;
        actor.rotation = facing(actor.location, target);
        Ok(())
    }

    fn move_forward(&mut self, actor_id: &str, step: f64) -> Result<(), WorldError> {
        let actor = self.actor_mut(actor_id)?;
        let yaw = actor.rotation.yaw.to_radians();
        actor.location.x += -yaw.sin() * step;
        actor.location.z += yaw.cos() * step;
        debug!(actor = %actor.name, location = ?actor.location, "actor moved");
        Ok(())
    }

    fn jump(&mut self, actor_id: &str) -> Result<(), WorldError> {
        self.require_actor(actor_id)?;
        *self.jumps.entry(actor_id.to_string()).or_default() += 1;
        Ok(())
    }

    fn set_sprinting(&mut self, actor_id: &str, sprinting: bool) -> Result<(), WorldError> {
        self.require_actor(actor_id)?;
        if sprinting {
            self.sprinting.insert(actor_id.to_string());
        } else {
            self.sprinting.remove(actor_id);
        }
        Ok(())
    }

    fn attack(&mut self, actor_id: &str, target_id: &str) -> Result<(), WorldError> {
        self.require_actor(actor_id)?;
        self.require_actor(target_id)?;
        self.attacks.push((actor_id.to_string(), target_id.to_string()));
        Ok(())
    }

    fn teleport(
        &mut self,
        actor_id: &str,
        location: Vec3,
        dimension: &str,
    ) -> Result<(), WorldError> {
        let actor = self.actor_mut(actor_id)?;
        actor.location = location;
        actor.dimension = dimension.to_string();
        info!(actor = %actor.name, %dimension, "actor teleported");
        Ok(())
    }

    fn broadcast(&mut self, message: &str) {
        self.broadcasts.push(message.to_string());
    }

    fn send_message(&mut self, actor_id: &str, message: &str) -> Result<(), WorldError> {
        self.require_actor(actor_id)?;
        self.messages.push((actor_id.to_string(), message.to_string()));
        Ok(())
    }

    fn show_title(&mut self, title: &str, subtitle: &str) {
        self.titles.push((title.to_string(), subtitle.to_string()));
    }

    fn set_camera(&mut self, operator_id: &str, pose: &CameraPose) -> Result<(), WorldError> {
        self.require_actor(operator_id)?;
        self.cameras.insert(operator_id.to_string(), pose.clone());
        Ok(())
    }

    fn clear_camera(&mut self, operator_id: &str) -> Result<(), WorldError> {
        self.require_actor(operator_id)?;
        self.cameras.remove(operator_id);
        Ok(())
    }
}

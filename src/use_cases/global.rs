// Applies cluster-wide commands from the global command queue.

use super::camera::CameraDirector;
use crate::domain::ports::WorldPort;
use crate::domain::{CameraControl, GlobalCommand, WorldError};
use tracing::debug;

#[derive(Debug, Default)]
pub struct GlobalCommandDispatcher;

impl GlobalCommandDispatcher {
    pub fn new() -> Self {
        Self
    }

    /// Applies each command independently; a failing one never blocks the rest.
    pub fn apply(
        &self,
        world: &mut dyn WorldPort,
        camera: &mut CameraDirector,
        commands: &[GlobalCommand],
    ) {
        for command in commands {
            if let Err(e) = self.apply_one(world, camera, command) {
                debug!(?command, error = %e, "global command failed");
            }
        }
    }

    fn apply_one(
        &self,
        world: &mut dyn WorldPort,
        camera: &mut CameraDirector,
        command: &GlobalCommand,
    ) -> Result<(), WorldError> {
        match command {
            GlobalCommand::Teleport { player, target } => {
                let actors = world.actors();
                let from = actors.iter().find(|a| &a.name == player);
                let to = actors.iter().find(|a| &a.name == target);
                let (Some(from), Some(to)) = (from, to) else {
                    debug!(%player, %target, "teleport skipped; player not found");
                    return Ok(());
                };
                world.teleport(&from.id, to.location, &to.dimension)
            }
            GlobalCommand::Camera { operator, control } => {
                match control {
                    CameraControl::Next => camera.force_next_target(operator),
                    CameraControl::Stop => camera.stop_camera(world, operator),
                }
                Ok(())
            }
            GlobalCommand::Chat { message } => {
                world.broadcast(message);
                Ok(())
            }
            GlobalCommand::Title { title, subtitle } => {
                world.show_title(title, subtitle);
                Ok(())
            }
            GlobalCommand::Ignored => Ok(()),
        }
    }
}

// Executes per-actor commands against one controlled actor.

use crate::domain::ports::WorldPort;
use crate::domain::{ActorCommand, ActorInfo, BlockPos, LegacyCommand, MoveMethod, Vec3, WorldError};
use tracing::debug;

/// Forward translation applied per executed move.
pub const MOVE_STEP: f64 = 1.0;

/// World-space center of the block `relative` away from `origin` (y stays on the block floor).
pub fn resolve_move_target(origin: BlockPos, relative: BlockPos) -> Vec3 {
    Vec3 {
        x: f64::from(origin.x + relative.x) + 0.5,
        y: f64::from(origin.y + relative.y),
        z: f64::from(origin.z + relative.z) + 0.5,
    }
}

#[derive(Debug, Default)]
pub struct ActorCommandExecutor;

impl ActorCommandExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Applies one next-move command; failures leave the actor where it is.
    pub fn execute(&self, world: &mut dyn WorldPort, actor: &ActorInfo, command: &ActorCommand) {
        let result = match command {
            ActorCommand::Idle | ActorCommand::Ignored => Ok(()),
            ActorCommand::MoveTo { target, method } => {
                self.step_toward(world, actor, *target, *method)
            }
        };

        if let Err(e) = result {
            debug!(actor = %actor.name, error = %e, "actor command failed");
        }
    }

    // Sampled steering: one nudge toward the latest target, re-anchored on the
    // actor's current block every poll.
    fn step_toward(
        &self,
        world: &mut dyn WorldPort,
        actor: &ActorInfo,
        relative: BlockPos,
        method: MoveMethod,
    ) -> Result<(), WorldError> {
        let target = resolve_move_target(actor.location.floor(), relative);
        world.look_at(&actor.id, target)?;
        if method.is_jump() {
            world.jump(&actor.id)?;
            world.set_sprinting(&actor.id, true)?;
        } else {
            world.set_sprinting(&actor.id, false)?;
        }
        world.move_forward(&actor.id, MOVE_STEP)
    }

    /// Applies a batch from the legacy pull channel in order.
    pub fn execute_legacy(
        &self,
        world: &mut dyn WorldPort,
        bot: &ActorInfo,
        commands: &[LegacyCommand],
    ) {
        for command in commands {
            if let Err(e) = self.apply_legacy(world, bot, command) {
                debug!(bot = %bot.name, error = %e, "legacy command failed");
            }
        }
    }

    fn apply_legacy(
        &self,
        world: &mut dyn WorldPort,
        bot: &ActorInfo,
        command: &LegacyCommand,
    ) -> Result<(), WorldError> {
        match command {
            LegacyCommand::Chat { message } => {
                if !message.is_empty() {
                    world.broadcast(&format!("§a[AI] {}: {}", bot.name, message));
                }
                Ok(())
            }
            LegacyCommand::Move { target } => {
                let Some(player) = find_by_name(world, target) else {
                    return Ok(());
                };
                world.look_at(&bot.id, player.location)?;
                world.move_forward(&bot.id, MOVE_STEP)
            }
            LegacyCommand::Attack { target } => {
                let Some(player) = find_by_name(world, target) else {
                    return Ok(());
                };
                world.look_at(&bot.id, player.location)?;
                world.attack(&bot.id, &player.id)
            }
            LegacyCommand::Ignored => Ok(()),
        }
    }
}

fn find_by_name(world: &dyn WorldPort, name: &str) -> Option<ActorInfo> {
    world.actors().into_iter().find(|a| a.name == name)
}

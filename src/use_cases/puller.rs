// Pull cycles: issues command polls and forwards each reply to its executor.

use super::actor::ActorCommandExecutor;
use super::camera::CameraDirector;
use super::global::GlobalCommandDispatcher;
use super::outbox::Outbox;
use crate::domain::ports::WorldPort;
use crate::domain::{ActorInfo, Inbound, Outbound};
use tracing::debug;

pub struct CommandPuller {
    outbox: Outbox,
    control_tag: String,
    executor: ActorCommandExecutor,
    dispatcher: GlobalCommandDispatcher,
}

impl CommandPuller {
    pub fn new(outbox: Outbox, control_tag: String) -> Self {
        Self {
            outbox,
            control_tag,
            executor: ActorCommandExecutor::new(),
            dispatcher: GlobalCommandDispatcher::new(),
        }
    }

    /// Queues one next-move poll per controlled actor.
    pub fn poll_next_moves(&self, world: &dyn WorldPort) -> usize {
        self.poll_each_controlled(world, |actor_id| Outbound::NextMove { actor_id })
    }

    /// Queues one legacy pull per controlled actor.
    pub fn poll_legacy(&self, world: &dyn WorldPort) -> usize {
        self.poll_each_controlled(world, |actor_id| Outbound::LegacyPull { actor_id })
    }

    /// Queues a poll of the global command queue.
    pub fn poll_global(&self) -> bool {
        self.outbox.push(Outbound::PollCommands)
    }

    fn poll_each_controlled<F>(&self, world: &dyn WorldPort, request: F) -> usize
    where
        F: Fn(String) -> Outbound,
    {
        world
            .actors()
            .into_iter()
            .filter(|a| a.has_tag(&self.control_tag))
            .filter(|a| self.outbox.push(request(a.id.clone())))
            .count()
    }

    /// Applies a reply against current world state.
    ///
    /// Replies may arrive out of order and long after their poll; each one is
    /// applied on its own, and replies for actors that are gone are dropped.
    pub fn dispatch(&self, world: &mut dyn WorldPort, camera: &mut CameraDirector, reply: Inbound) {
        match reply {
            Inbound::NextMove { actor_id, command } => {
                let Some(actor) = self.controlled(world, &actor_id) else {
                    debug!(%actor_id, "next move for unknown actor dropped");
                    return;
                };
                self.executor.execute(world, &actor, &command);
            }
            Inbound::LegacyCommands { actor_id, commands } => {
                let Some(bot) = self.controlled(world, &actor_id) else {
                    debug!(%actor_id, "legacy commands for unknown actor dropped");
                    return;
                };
                self.executor.execute_legacy(world, &bot, &commands);
            }
            Inbound::GlobalCommands(commands) => {
                self.dispatcher.apply(world, camera, &commands);
            }
        }
    }

    fn controlled(&self, world: &dyn WorldPort, actor_id: &str) -> Option<ActorInfo> {
        world
            .actors()
            .into_iter()
            .find(|a| a.id == actor_id && a.has_tag(&self.control_tag))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::camera::ChaseRig;
    use crate::domain::{ActorCommand, BlockPos, GlobalCommand, MoveMethod, Vec3};
    use crate::use_cases::test_support::{Action, RecordingWorld, actor, drain};
    use crate::use_cases::types::{Cadence, CameraSettings};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn camera() -> CameraDirector {
        CameraDirector::new(
            CameraSettings {
                interval: Cadence(1),
                switch_after: 200,
                operator_tag: "cameraman".to_string(),
                rig: ChaseRig {
                    distance: 10.0,
                    height: 5.0,
                    ease_seconds: 0.5,
                },
            },
            StdRng::seed_from_u64(3),
        )
    }

    fn world() -> RecordingWorld {
        RecordingWorld::new()
            .with_actor(actor("bot1", "Bot1", Vec3::new(10.0, 64.0, 10.0), &["ai_bot"]))
            .with_actor(actor("bot2", "Bot2", Vec3::new(0.0, 64.0, 0.0), &["ai_bot"]))
            .with_actor(actor("p1", "Alice", Vec3::new(3.0, 64.0, 3.0), &[]))
    }

    #[test]
    fn when_polling_then_one_empty_poll_per_controlled_actor() {
        let (outbox, mut rx) = Outbox::channel(8);
        let puller = CommandPuller::new(outbox, "ai_bot".to_string());

        assert_eq!(puller.poll_next_moves(&world()), 2);

        assert_eq!(
            drain(&mut rx),
            vec![
                Outbound::NextMove {
                    actor_id: "bot1".to_string()
                },
                Outbound::NextMove {
                    actor_id: "bot2".to_string()
                },
            ]
        );
    }

    #[test]
    fn when_next_move_arrives_then_it_moves_only_its_actor() {
        let (outbox, _rx) = Outbox::channel(8);
        let puller = CommandPuller::new(outbox, "ai_bot".to_string());
        let mut world = world();
        let mut camera = camera();

        puller.dispatch(
            &mut world,
            &mut camera,
            Inbound::NextMove {
                actor_id: "bot1".to_string(),
                command: ActorCommand::MoveTo {
                    target: BlockPos::new(0, 0, 5),
                    method: MoveMethod::Walk,
                },
            },
        );

        assert_eq!(
            world.actions[0],
            Action::LookAt {
                actor_id: "bot1".to_string(),
                target: Vec3::new(10.5, 64.0, 15.5),
            }
        );
        assert!(world.actions.iter().all(|a| match a {
            Action::LookAt { actor_id, .. }
            | Action::Sprint { actor_id, .. }
            | Action::MoveForward { actor_id, .. } => actor_id == "bot1",
            _ => false,
        }));
    }

    #[test]
    fn when_reply_targets_departed_or_uncontrolled_actor_then_it_is_dropped() {
        let (outbox, _rx) = Outbox::channel(8);
        let puller = CommandPuller::new(outbox, "ai_bot".to_string());
        let mut world = world();
        let mut camera = camera();
        world.remove_actor("bot2");
        let command = ActorCommand::MoveTo {
            target: BlockPos::new(1, 0, 0),
            method: MoveMethod::Walk,
        };

        for actor_id in ["bot2", "p1"] {
            puller.dispatch(
                &mut world,
                &mut camera,
                Inbound::NextMove {
                    actor_id: actor_id.to_string(),
                    command: command.clone(),
                },
            );
        }

        assert!(world.actions.is_empty());
    }

    #[test]
    fn when_global_batch_arrives_then_it_goes_to_the_dispatcher() {
        let (outbox, _rx) = Outbox::channel(8);
        let puller = CommandPuller::new(outbox, "ai_bot".to_string());
        let mut world = world();
        let mut camera = camera();

        puller.dispatch(
            &mut world,
            &mut camera,
            Inbound::GlobalCommands(vec![GlobalCommand::Chat {
                message: "hello all".to_string(),
            }]),
        );

        assert_eq!(
            world.actions,
            vec![Action::Broadcast("hello all".to_string())]
        );
    }
}

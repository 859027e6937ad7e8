// Out-of-band engine event handling: hit notifications and item-triggered requests.

use super::cooldown::CooldownMap;
use super::outbox::Outbox;
use crate::domain::ports::{Clock, WorldPort};
use crate::domain::{HitEvent, Outbound};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Pushes a hit notification as soon as a controlled actor is struck.
pub struct EventReporter {
    outbox: Outbox,
    clock: Arc<dyn Clock>,
    control_tag: String,
}

impl EventReporter {
    pub fn new(outbox: Outbox, clock: Arc<dyn Clock>, control_tag: String) -> Self {
        Self {
            outbox,
            clock,
            control_tag,
        }
    }

    /// Returns whether a notification was queued.
    pub fn on_hit(&self, world: &dyn WorldPort, victim_id: &str, attacker: &str) -> bool {
        let Some(victim) = world
            .actors()
            .into_iter()
            .find(|a| a.id == victim_id && a.has_tag(&self.control_tag))
        else {
            return false;
        };

        info!(victim = %victim.name, %attacker, "controlled actor hit");
        self.outbox.push(Outbound::Hit(HitEvent {
            victim: victim.name,
            attacker: attacker.to_string(),
            timestamp: self.clock.now_epoch_millis() as f64 / 1000.0,
        }))
    }
}

/// Item use by ghost observers: the unmute item asks the voice bridge to unmute.
pub struct ItemUseHandler {
    outbox: Outbox,
    clock: Arc<dyn Clock>,
    ghost_tag: String,
    unmute_item: String,
    cooldown: Duration,
    cooldowns: CooldownMap,
}

impl ItemUseHandler {
    pub fn new(
        outbox: Outbox,
        clock: Arc<dyn Clock>,
        ghost_tag: String,
        unmute_item: String,
        cooldown: Duration,
    ) -> Self {
        Self {
            outbox,
            clock,
            ghost_tag,
            unmute_item,
            cooldown,
            cooldowns: CooldownMap::new(),
        }
    }

    /// Returns whether an unmute request was queued.
    pub fn on_item_used(&mut self, world: &mut dyn WorldPort, actor_id: &str, item: &str) -> bool {
        let Some(actor) = world
            .actors()
            .into_iter()
            .find(|a| a.id == actor_id && a.has_tag(&self.ghost_tag))
        else {
            return false;
        };

        let key = format!("{}:interact", actor.id);
        let window = self.cooldown.as_millis() as u64;
        if !self
            .cooldowns
            .try_acquire(&key, self.clock.now_epoch_millis(), window)
        {
            debug!(actor = %actor.name, "item use on cooldown");
            return false;
        }

        if item != self.unmute_item {
            return false;
        }

        let queued = self.outbox.push(Outbound::Unmute {
            mc_name: actor.name.clone(),
        });
        if let Err(e) = world.send_message(&actor.id, "§a[Discord] §fUnmute request sent.") {
            debug!(actor = %actor.name, error = %e, "unmute notice failed");
        }
        queued
    }

    /// Drops every cooldown; returns how many were still tracked.
    pub fn reset(&mut self) -> usize {
        self.cooldowns.clear()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Vec3;
    use crate::use_cases::test_support::{Action, FixedClock, RecordingWorld, actor, drain};

    #[test]
    fn when_controlled_actor_is_hit_then_event_is_pushed_immediately() {
        let (outbox, mut rx) = Outbox::channel(8);
        let reporter = EventReporter::new(
            outbox,
            Arc::new(FixedClock(1_700_000_000_250)),
            "ai_bot".to_string(),
        );
        let world =
            RecordingWorld::new().with_actor(actor("bot", "Bot", Vec3::default(), &["ai_bot"]));

        assert!(reporter.on_hit(&world, "bot", "Alice"));

        assert_eq!(
            drain(&mut rx),
            vec![Outbound::Hit(HitEvent {
                victim: "Bot".to_string(),
                attacker: "Alice".to_string(),
                timestamp: 1_700_000_000.25,
            })]
        );
    }

    #[test]
    fn when_untagged_actor_is_hit_then_nothing_is_sent() {
        let (outbox, mut rx) = Outbox::channel(8);
        let reporter = EventReporter::new(outbox, Arc::new(FixedClock(0)), "ai_bot".to_string());
        let world = RecordingWorld::new().with_actor(actor("p1", "Alice", Vec3::default(), &[]));

        assert!(!reporter.on_hit(&world, "p1", "Bot"));
        assert!(!reporter.on_hit(&world, "missing", "Bot"));
        assert!(drain(&mut rx).is_empty());
    }

    fn item_handler(outbox: Outbox, now: u64) -> ItemUseHandler {
        ItemUseHandler::new(
            outbox,
            Arc::new(FixedClock(now)),
            "ghost".to_string(),
            "minecraft:amethyst_shard".to_string(),
            Duration::from_millis(500),
        )
    }

    #[test]
    fn when_ghost_uses_unmute_item_then_request_is_sent_once_per_window() {
        let (outbox, mut rx) = Outbox::channel(8);
        let mut handler = item_handler(outbox, 10_000);
        let mut world =
            RecordingWorld::new().with_actor(actor("g", "Ghosty", Vec3::default(), &["ghost"]));

        assert!(handler.on_item_used(&mut world, "g", "minecraft:amethyst_shard"));
        assert!(!handler.on_item_used(&mut world, "g", "minecraft:amethyst_shard"));

        assert_eq!(
            drain(&mut rx),
            vec![Outbound::Unmute {
                mc_name: "Ghosty".to_string()
            }]
        );
        assert_eq!(
            world.actions,
            vec![Action::Message {
                actor_id: "g".to_string(),
                message: "§a[Discord] §fUnmute request sent.".to_string(),
            }]
        );
    }

    #[test]
    fn when_handler_is_reset_then_ghost_may_unmute_again_at_once() {
        let (outbox, mut rx) = Outbox::channel(8);
        let mut handler = item_handler(outbox, 10_000);
        let mut world =
            RecordingWorld::new().with_actor(actor("g", "Ghosty", Vec3::default(), &["ghost"]));
        assert!(handler.on_item_used(&mut world, "g", "minecraft:amethyst_shard"));

        assert_eq!(handler.reset(), 1);

        assert!(handler.on_item_used(&mut world, "g", "minecraft:amethyst_shard"));
        assert_eq!(drain(&mut rx).len(), 2);
    }

    #[test]
    fn when_actor_is_not_a_ghost_or_item_differs_then_nothing_is_sent() {
        let (outbox, mut rx) = Outbox::channel(8);
        let mut handler = item_handler(outbox, 10_000);
        let mut world = RecordingWorld::new()
            .with_actor(actor("p", "Alice", Vec3::default(), &[]))
            .with_actor(actor("g", "Ghosty", Vec3::default(), &["ghost"]));

        assert!(!handler.on_item_used(&mut world, "p", "minecraft:amethyst_shard"));
        assert!(!handler.on_item_used(&mut world, "g", "minecraft:feather"));
        assert!(drain(&mut rx).is_empty());
    }
}

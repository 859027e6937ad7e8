// Bridge composition and the tick loop that drives it.

use super::camera::CameraDirector;
use super::chat::ChatBuffer;
use super::events::{EventReporter, ItemUseHandler};
use super::outbox::Outbox;
use super::puller::CommandPuller;
use super::report::ReportClient;
use super::sensing::SnapshotSensor;
use super::types::{BridgeSettings, EngineEvent};
use crate::domain::ports::{Clock, WorldPort};
use crate::domain::{ChatEvent, Inbound};
use rand::rngs::StdRng;
use std::sync::Arc;
use tokio::sync::{Notify, mpsc};
use tracing::info;

/// All bridge state, owned by the tick task.
pub struct Bridge {
    settings: BridgeSettings,
    tick: u64,
    chat: ChatBuffer,
    reporter: ReportClient,
    sensor: SnapshotSensor,
    puller: CommandPuller,
    camera: CameraDirector,
    events: EventReporter,
    items: ItemUseHandler,
}

impl Bridge {
    pub fn new(settings: BridgeSettings, outbox: Outbox, clock: Arc<dyn Clock>, rng: StdRng) -> Self {
        Self {
            chat: ChatBuffer::new(),
            reporter: ReportClient::new(outbox.clone()),
            sensor: SnapshotSensor::new(
                outbox.clone(),
                settings.voxel_radius,
                settings.voxel_half_height,
                settings.sensor_tag.clone(),
            ),
            puller: CommandPuller::new(outbox.clone(), settings.control_tag.clone()),
            camera: CameraDirector::new(settings.camera.clone(), rng),
            events: EventReporter::new(outbox.clone(), clock.clone(), settings.control_tag.clone()),
            items: ItemUseHandler::new(
                outbox,
                clock,
                settings.ghost_tag.clone(),
                settings.unmute_item.clone(),
                settings.item_cooldown,
            ),
            tick: 0,
            settings,
        }
    }

    pub fn current_tick(&self) -> u64 {
        self.tick
    }

    pub fn chat(&self) -> &ChatBuffer {
        &self.chat
    }

    pub fn camera(&self) -> &CameraDirector {
        &self.camera
    }

    /// Engine notification handler; runs synchronously on the tick task.
    pub fn handle_event(&mut self, world: &mut dyn WorldPort, event: EngineEvent) {
        match event {
            EngineEvent::ChatSent { sender, message } => {
                self.chat.append(ChatEvent { sender, message });
            }
            EngineEvent::EntityHit {
                victim_id,
                attacker,
            } => {
                self.events.on_hit(world, &victim_id, &attacker);
            }
            EngineEvent::ItemUsed { actor_id, item } => {
                self.items.on_item_used(world, &actor_id, &item);
            }
        }
    }

    /// Completion of an earlier poll; applied exactly once, here.
    pub fn handle_reply(&mut self, world: &mut dyn WorldPort, reply: Inbound) {
        self.puller.dispatch(world, &mut self.camera, reply);
    }

    /// Advances one tick and runs every job whose cadence is due.
    pub fn tick(&mut self, world: &mut dyn WorldPort) {
        self.tick += 1;
        let tick = self.tick;
        let settings = &self.settings;

        if settings.report_interval.is_due(tick) {
            self.reporter.flush(&mut self.chat, &world.actors());
        }
        if settings.sense_interval.is_due(tick) {
            self.sensor.sense(world);
        }
        if settings.move_poll_interval.is_due(tick) {
            self.puller.poll_next_moves(world);
        }
        if settings.legacy_pull_interval.is_due(tick) {
            self.puller.poll_legacy(world);
        }
        if settings.command_poll_interval.is_due(tick) {
            self.puller.poll_global();
        }
        if settings.camera.interval.is_due(tick) {
            self.camera.tick(world);
        }
    }

    /// Clears buffered chat, the camera target and item cooldowns; the
    /// bridge starts from scratch afterwards.
    pub fn reset(&mut self) {
        let dropped = self.chat.drain().len();
        let cooldowns = self.items.reset();
        if dropped > 0 || cooldowns > 0 {
            info!(dropped, cooldowns, "discarding bridge state");
        }
        self.camera.reset();
        self.tick = 0;
    }
}

/// Drives `bridge` on a fixed tick until `shutdown` fires.
///
/// Engine events and replies are drained at the start of every tick so all
/// side effects happen on this task, one tick at a time.
pub async fn bridge_task<W>(
    mut bridge: Bridge,
    mut world: W,
    mut event_rx: mpsc::Receiver<EngineEvent>,
    mut reply_rx: mpsc::Receiver<Inbound>,
    shutdown: Arc<Notify>,
) -> (Bridge, W)
where
    W: WorldPort + Send,
{
    let mut interval = tokio::time::interval(bridge.settings.tick_interval);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    info!(
        tick_ms = bridge.settings.tick_interval.as_millis() as u64,
        "bridge loop started"
    );

    loop {
        tokio::select! {
            _ = shutdown.notified() => {
                break;
            }
            _ = interval.tick() => {}
        }

        while let Ok(event) = event_rx.try_recv() {
            bridge.handle_event(&mut world, event);
        }
        while let Ok(reply) = reply_rx.try_recv() {
            bridge.handle_reply(&mut world, reply);
        }
        bridge.tick(&mut world);
    }

    info!(ticks = bridge.current_tick(), "bridge loop stopped");
    bridge.reset();
    (bridge, world)
}

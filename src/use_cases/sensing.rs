// Sensing cycle: one voxel snapshot per sensor-tagged actor.

use super::outbox::Outbox;
use crate::domain::ports::WorldPort;
use crate::domain::{Outbound, snapshot};

pub struct SnapshotSensor {
    outbox: Outbox,
    radius: u32,
    half_height: u32,
    sensor_tag: String,
}

impl SnapshotSensor {
    pub fn new(outbox: Outbox, radius: u32, half_height: u32, sensor_tag: String) -> Self {
        Self {
            outbox,
            radius,
            half_height,
            sensor_tag,
        }
    }

    /// Builds and queues a fresh snapshot for every sensor-tagged actor.
    pub fn sense(&self, world: &dyn WorldPort) -> usize {
        let mut sent = 0;
        for actor in world.actors() {
            if !actor.has_tag(&self.sensor_tag) {
                continue;
            }
            let snapshot = snapshot::build(world, &actor, self.radius, self.half_height);
            if self.outbox.push(Outbound::State(snapshot)) {
                sent += 1;
            }
        }
        sent
    }
}

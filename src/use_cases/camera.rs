// Camera director: picks a filming target for the camera operator and chases it.

use super::types::CameraSettings;
use crate::domain::camera::{self, CameraPose};
use crate::domain::ports::WorldPort;
use crate::domain::ActorInfo;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

/// Target-tracking state of the single camera operator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CameraState {
    NoTarget,
    /// `elapsed` counts camera updates since the target was picked.
    Tracking { target_id: String, elapsed: u32 },
}

pub struct CameraDirector {
    settings: CameraSettings,
    state: CameraState,
    // Set by `stop_camera`; cleared by `force_next_target` and `reset`.
    halted: bool,
    rng: StdRng,
}

impl CameraDirector {
    pub fn new(settings: CameraSettings, rng: StdRng) -> Self {
        Self {
            settings,
            state: CameraState::NoTarget,
            halted: false,
            rng,
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    /// One camera update: keep, switch or drop the target, then place the camera.
    pub fn tick(&mut self, world: &mut dyn WorldPort) {
        let actors = world.actors();
        // Single operator assumed; without one there is nothing to drive.
        let Some(operator) = actors.iter().find(|a| self.is_operator(a)) else {
            return;
        };
        if self.halted {
            // The stop may have named someone else; the operator's view is reset regardless.
            if let Err(e) = world.clear_camera(&operator.id) {
                debug!(operator = %operator.name, error = %e, "camera reset failed");
            }
            return;
        }

        let reselect = match &mut self.state {
            CameraState::NoTarget => true,
            CameraState::Tracking { target_id, elapsed } => {
                *elapsed = elapsed.saturating_add(1);
                *elapsed >= self.settings.switch_after
                    || !is_valid_target(&actors, target_id, &self.settings.operator_tag)
            }
        };
        if reselect {
            self.select_target(&actors);
        }

        let result = match &self.state {
            CameraState::Tracking { target_id, .. } => {
                match actors.iter().find(|a| &a.id == target_id) {
                    Some(target) => {
                        let pose = self.chase_pose(target);
                        world.set_camera(&operator.id, &pose)
                    }
                    None => world.clear_camera(&operator.id),
                }
            }
            CameraState::NoTarget => world.clear_camera(&operator.id),
        };
        if let Err(e) = result {
            debug!(operator = %operator.name, error = %e, "camera update failed");
        }
    }

    /// Forces a new target pick on the next update and resumes a stopped camera.
    pub fn force_next_target(&mut self, operator_name: &str) {
        info!(operator = %operator_name, "camera switch requested");
        self.halted = false;
        if let CameraState::Tracking { elapsed, .. } = &mut self.state {
            *elapsed = self.settings.switch_after;
        }
    }

    /// Drops the target, resets the operator's camera and holds until resumed.
    pub fn stop_camera(&mut self, world: &mut dyn WorldPort, operator_name: &str) {
        info!(operator = %operator_name, "camera stop requested");
        self.state = CameraState::NoTarget;
        self.halted = true;

        let operator = world
            .actors()
            .into_iter()
            .find(|a| a.name == operator_name && self.is_operator(a));
        if let Some(operator) = operator {
            if let Err(e) = world.clear_camera(&operator.id) {
                debug!(operator = %operator_name, error = %e, "camera reset failed");
            }
        }
    }

    /// Forgets the target and lifts any stop.
    pub fn reset(&mut self) {
        self.state = CameraState::NoTarget;
        self.halted = false;
    }

    fn is_operator(&self, actor: &ActorInfo) -> bool {
        actor.has_tag(&self.settings.operator_tag)
    }

    fn select_target(&mut self, actors: &[ActorInfo]) {
        let eligible: Vec<&ActorInfo> = actors.iter().filter(|a| !self.is_operator(a)).collect();
        self.state = match eligible.choose(&mut self.rng) {
            Some(target) => {
                info!(target = %target.name, "camera now filming");
                CameraState::Tracking {
                    target_id: target.id.clone(),
                    elapsed: 0,
                }
            }
            None => CameraState::NoTarget,
        };
    }

    fn chase_pose(&self, target: &ActorInfo) -> CameraPose {
        CameraPose {
            location: camera::chase_location(target.location, target.rotation, &self.settings.rig),
            facing_actor_id: target.id.clone(),
            ease_seconds: self.settings.rig.ease_seconds,
        }
    }
}

fn is_valid_target(actors: &[ActorInfo], target_id: &str, operator_tag: &str) -> bool {
    actors
        .iter()
        .find(|a| a.id == target_id)
        .is_some_and(|a| !a.has_tag(operator_tag))
}

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::climb;
use crate::error::{HullError, HullResult, MutationRefusal};
use crate::math::Vec3f;
use crate::query::Occupancy;
use crate::world::{Mutation, MutationReport, Recovery, World};

/// Input sampled for one frame. `forward` and `strafe` are in `[-1, 1]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameInput {
    pub forward: f32,
    pub strafe: f32,
    pub yaw_delta: f32,
    pub pitch_delta: f32,
    /// Step off the ladder this frame.
    pub detach: bool,
    /// Queued UI event, applied before any movement.
    pub mutation: Option<Mutation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameOutcome {
    pub report: Option<MutationReport>,
    pub refusal: Option<MutationRefusal>,
    pub recovery: Recovery,
    pub detached: bool,
    pub position: Vec3f,
    pub climbing: bool,
}

impl World {
    /// One frame: mutation, revalidation, look, then movement. Refusals are
    /// returned in the outcome; only fatal errors abort the frame.
    pub fn step_frame(&mut self, input: &FrameInput, dt: f32) -> HullResult<FrameOutcome> {
        let mut report = None;
        let mut refusal = None;
        if let Some(mutation) = &input.mutation {
            match self.apply_mutation(mutation) {
                Ok(r) => report = Some(r),
                Err(HullError::InvalidMutation(r)) => refusal = Some(r),
                Err(err) => return Err(err),
            }
        }

        let recovery = self.ensure_valid();
        self.agent.apply_look(input.yaw_delta, input.pitch_delta, self.config.pitch_limit_rad);

        let detached = if self.agent.is_climbing() {
            self.step_climbing(input, dt)
        } else {
            self.step_walking(input, dt);
            false
        };

        Ok(FrameOutcome {
            report,
            refusal,
            recovery,
            detached,
            position: self.agent.position,
            climbing: self.agent.is_climbing(),
        })
    }

    fn step_walking(&mut self, input: &FrameInput, dt: f32) {
        let wish = self.agent.forward() * input.forward + self.agent.right() * input.strafe;
        if wish.length_squared() < 1e-6 {
            return;
        }
        let delta = wish.normalize() * self.config.move_speed_mps * dt;
        let occ = Occupancy::new(&self.index, &self.plan.bounds, &self.config);
        self.agent.position = occ.resolve_movement(self.agent.position, delta);
    }

    /// Returns whether the agent stepped off this frame.
    fn step_climbing(&mut self, input: &FrameInput, dt: f32) -> bool {
        let occ = Occupancy::new(&self.index, &self.plan.bounds, &self.config);
        let Some(key) = self.agent.climb_volume() else { return false };
        let Some(mut volume) = occ.index.climb_volume(key) else { return false };

        let has_below = occ.index.adjacent_climb(volume, -1).is_some();
        climb::align(&mut self.agent, volume, has_below, dt, occ.config);

        if input.detach {
            climb::detach(&mut self.agent, &occ, volume);
            return true;
        }

        if input.forward > 0.0 {
            let direction = climb::climb_direction(&self.agent, occ.config);
            volume = climb::climb(&mut self.agent, &occ, volume, direction, dt);
            let has_below = occ.index.adjacent_climb(volume, -1).is_some();
            climb::align(&mut self.agent, volume, has_below, dt, occ.config);
            debug!(volume = %volume.key, y = self.agent.position.y, "climbed");
        }
        false
    }
}

use serde::Serialize;

use crate::math::Vec3f;
use crate::occupancy::VolumeKey;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub enum ClimbState {
    #[default]
    Grounded,
    /// Clinging to a shaft. The offset is the horizontal position relative to
    /// the shaft centre the agent is pulled toward.
    Climbing { volume: VolumeKey, offset_x: f32, offset_z: f32 },
}

/// The first-person agent. Position is the eye position.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AgentState {
    pub position: Vec3f,
    pub yaw: f32,
    pub pitch: f32,
    pub climb: ClimbState,
}

impl AgentState {
    pub fn new(position: Vec3f) -> Self {
        Self { position, ..Default::default() }
    }

    pub fn is_climbing(&self) -> bool {
        matches!(self.climb, ClimbState::Climbing { .. })
    }

    pub fn climb_volume(&self) -> Option<&VolumeKey> {
        match &self.climb {
            ClimbState::Climbing { volume, .. } => Some(volume),
            ClimbState::Grounded => None,
        }
    }

    /// Horizontal walking direction for `yaw`.
    pub fn forward(&self) -> Vec3f {
        Vec3f::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    pub fn right(&self) -> Vec3f {
        Vec3f::new(self.yaw.cos(), 0.0, -self.yaw.sin())
    }

    pub fn look(&self) -> Vec3f {
        let (sp, cp) = self.pitch.sin_cos();
        Vec3f::new(self.yaw.sin() * cp, sp, self.yaw.cos() * cp)
    }

    pub fn apply_look(&mut self, yaw_delta: f32, pitch_delta: f32, pitch_limit: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(-pitch_limit, pitch_limit);
    }
}

use serde::{Deserialize, Serialize};

/// Tuning constants for layout, occupancy and agent movement.
///
/// Every field has a default, so a TOML `[hull]` table only needs to name the
/// values it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HullConfig {
    /// Vertical distance between stacked decks (meters).
    pub deck_height_m: f32,
    /// Eye height above the deck floor when standing.
    pub eye_height_m: f32,
    /// Horizontal radius of the agent's body cylinder.
    pub agent_radius_m: f32,
    /// Blocked volumes are inflated by `agent_radius_m - blocked_margin_m`.
    pub blocked_margin_m: f32,
    /// Extra inset of the interior bounds beyond `agent_radius_m`.
    pub bounds_margin_x_m: f32,
    pub bounds_margin_z_m: f32,
    pub move_speed_mps: f32,
    pub climb_speed_mps: f32,
    /// How far from the shaft center the agent clings to a rail.
    pub ladder_attach_offset_m: f32,
    /// How far past the shaft footprint a detaching agent steps.
    pub ladder_exit_offset_m: f32,
    pub ladder_center_lerp_per_s: f32,
    pub ladder_rail_inset_m: f32,
    pub climb_bound_inset_m: f32,
    /// Distance below the top (or above the bottom) of a climb segment at
    /// which the agent hands off to the adjacent segment.
    pub climb_handoff_band_m: f32,
    pub climb_handoff_entry_m: f32,
    pub climb_stop_inset_m: f32,
    /// Slack allowed before an active climb is considered left.
    pub climb_retain_inflate_m: f32,
    pub nearest_y_inset_m: f32,
    pub pitch_limit_rad: f32,
    pub climb_look_deadzone: f32,
}

impl Default for HullConfig {
    fn default() -> Self {
        Self {
            deck_height_m: 2.6,
            eye_height_m: 1.68,
            agent_radius_m: 0.22,
            blocked_margin_m: 0.08,
            bounds_margin_x_m: 0.0,
            bounds_margin_z_m: 0.0,
            move_speed_mps: 2.4,
            climb_speed_mps: 1.9,
            ladder_attach_offset_m: 0.16,
            ladder_exit_offset_m: 0.52,
            ladder_center_lerp_per_s: 14.0,
            ladder_rail_inset_m: 0.03,
            climb_bound_inset_m: 0.05,
            climb_handoff_band_m: 0.12,
            climb_handoff_entry_m: 0.1,
            climb_stop_inset_m: 0.04,
            climb_retain_inflate_m: 0.08,
            nearest_y_inset_m: 0.02,
            pitch_limit_rad: 1.45,
            climb_look_deadzone: 0.08,
        }
    }
}

impl HullConfig {
    pub fn blocked_inflation_m(&self) -> f32 {
        (self.agent_radius_m - self.blocked_margin_m).max(0.0)
    }

    pub fn level_floor_y(&self, level: i32) -> f32 {
        level as f32 * self.deck_height_m
    }

    pub fn standing_eye_y(&self, level: i32) -> f32 {
        self.level_floor_y(level) + self.eye_height_m
    }
}

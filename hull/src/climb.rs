//! Ladder climbing: attaching to a shaft, moving along it across levels and
//! stepping off again.

use tracing::debug;

use crate::agent::{AgentState, ClimbState};
use crate::config::HullConfig;
use crate::math::{clamp_lenient, Vec3f};
use crate::occupancy::WorldVolume;
use crate::query::{NearestOptions, Occupancy};

/// Start climbing `volume`. The agent clings to the rail on the side it came
/// from: the offset points from the shaft centre toward the approach point
/// along whichever horizontal axis dominates.
pub fn attach(agent: &mut AgentState, volume: &WorldVolume, approach: Vec3f, cfg: &HullConfig) {
    let half = volume.shape.half_extents();
    let dx = approach.x - volume.shape.center.x;
    let dz = approach.z - volume.shape.center.z;
    let sign = |d: f32| if d < 0.0 { -1.0 } else { 1.0 };
    let (offset_x, offset_z) = if dx.abs() > dz.abs() {
        (sign(dx) * cfg.ladder_attach_offset_m.min(half.x - cfg.ladder_rail_inset_m), 0.0)
    } else {
        (0.0, sign(dz) * cfg.ladder_attach_offset_m.min(half.z - cfg.ladder_rail_inset_m))
    };
    debug!(volume = %volume.key, offset_x, offset_z, "attached to climb volume");
    agent.climb = ClimbState::Climbing { volume: volume.key.clone(), offset_x, offset_z };
}

/// Pull the agent toward its rail and clamp its height into the segment.
/// Without a lower segment the floor is the standing eye height of the
/// segment's level.
pub fn align(agent: &mut AgentState, volume: &WorldVolume, has_below: bool, dt: f32, cfg: &HullConfig) {
    let ClimbState::Climbing { offset_x, offset_z, .. } = agent.climb else {
        return;
    };
    let c = volume.shape.center;
    let half = volume.shape.half_extents();
    let floor = if has_below { f32::NEG_INFINITY } else { cfg.standing_eye_y(volume.level()) };
    let min_y = (c.y - half.y + cfg.climb_bound_inset_m).max(floor);
    let max_y = c.y + half.y - cfg.climb_bound_inset_m;

    let rail_x = half.x - cfg.ladder_rail_inset_m;
    let rail_z = half.z - cfg.ladder_rail_inset_m;
    let target_x = c.x + clamp_lenient(offset_x, -rail_x, rail_x);
    let target_z = c.z + clamp_lenient(offset_z, -rail_z, rail_z);
    let blend = (cfg.ladder_center_lerp_per_s * dt).min(1.0);

    let p = &mut agent.position;
    p.x += (target_x - p.x) * blend;
    p.z += (target_z - p.z) * blend;
    p.y = clamp_lenient(p.y, min_y, max_y);
}

/// Vertical climb direction from the look pitch: up when looking roughly
/// level, otherwise the sign of the look's vertical component.
pub fn climb_direction(agent: &AgentState, cfg: &HullConfig) -> f32 {
    let look_y = agent.look().y;
    if look_y.abs() < cfg.climb_look_deadzone {
        1.0
    } else if look_y < 0.0 {
        -1.0
    } else {
        1.0
    }
}

/// Move along the shaft for one frame. Near the top (or bottom) of the
/// segment the agent hands off to the neighbouring segment of the same shaft
/// if there is one, otherwise stops just short of the end. Returns the
/// segment the agent is on afterwards.
pub fn climb<'a>(
    agent: &mut AgentState,
    occ: &Occupancy<'a>,
    current: &'a WorldVolume,
    direction: f32,
    dt: f32,
) -> &'a WorldVolume {
    let cfg = occ.config;
    agent.position.y += direction * cfg.climb_speed_mps * dt;
    let min_y = current.shape.min().y;
    let max_y = current.shape.max().y;
    let mut active = current;

    if direction > 0.0 && agent.position.y >= max_y - cfg.climb_handoff_band_m {
        if let Some(above) = occ.index.adjacent_climb(current, 1) {
            active = above;
            agent.position.y = agent.position.y.max(above.shape.min().y + cfg.climb_handoff_entry_m);
        } else {
            agent.position.y = agent.position.y.min(max_y - cfg.climb_stop_inset_m);
        }
    }
    if direction < 0.0 && agent.position.y <= min_y + cfg.climb_handoff_band_m {
        if let Some(below) = occ.index.adjacent_climb(current, -1) {
            active = below;
            agent.position.y = agent.position.y.min(below.shape.max().y - cfg.climb_handoff_entry_m);
        } else {
            agent.position.y = agent.position.y.max(min_y + cfg.climb_stop_inset_m);
        }
    }

    if !std::ptr::eq(active, current) {
        debug!(from = %current.key, to = %active.key, "climb hand-off");
        if let ClimbState::Climbing { volume, .. } = &mut agent.climb {
            *volume = active.key.clone();
        }
    }
    active
}

/// Step off the shaft. The agent faces the ladder while climbing, so the
/// exit point lies just past the shaft footprint behind it, opposite the
/// horizontal facing direction, at the standing eye height of the segment's
/// level. If that point is not legal the nearest legal point off the ladder
/// is used, searching a wider height band on the second try. The agent is
/// grounded afterwards even if no exit point was found.
pub fn detach(agent: &mut AgentState, occ: &Occupancy<'_>, volume: &WorldVolume) -> Option<Vec3f> {
    let cfg = occ.config;
    let exit_y = cfg.standing_eye_y(volume.level());
    let mut facing = agent.forward();
    if facing.length_squared() < 1e-4 {
        facing = Vec3f::Z;
    }
    let facing = facing.normalize();
    let reach = volume.shape.size.z / 2.0 + cfg.ladder_exit_offset_m;
    let c = volume.shape.center;
    let candidate = Vec3f::new(c.x - facing.x * reach, exit_y, c.z - facing.z * reach);

    let exit = if occ.is_occupiable(candidate) {
        Some(candidate)
    } else {
        occ.nearest_occupiable_point(candidate, NearestOptions::near_height(exit_y, 0.45).avoiding_climb())
            .or_else(|| {
                occ.nearest_occupiable_point(candidate, NearestOptions::near_height(exit_y, 0.8).avoiding_climb())
            })
    };
    if let Some(p) = exit {
        agent.position = p;
    }
    agent.climb = ClimbState::Grounded;
    debug!(volume = %volume.key, ?exit, "detached from climb volume");
    exit
}

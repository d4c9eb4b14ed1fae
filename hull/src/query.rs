//! Point queries against the occupancy index: legality tests, nearest legal
//! point search and axis-separated movement resolution.

use crate::config::HullConfig;
use crate::layout::InteriorBounds;
use crate::math::{BoxShape, Vec3f};
use crate::occupancy::{OccupancyIndex, WorldVolume};

const DEFAULT_Y_TOLERANCE: f32 = 0.6;
const PUSH_OUT_PASSES: usize = 4;
const PUSH_OUT_CLEARANCE: f32 = 1e-3;

/// Inclusive box test, inflated on X and Z only.
pub fn contains_point(point: Vec3f, volume: &WorldVolume, inflate_xz: f32) -> bool {
    volume.shape.contains(point, inflate_xz)
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NearestOptions {
    /// Skip candidates that lie inside any climb volume.
    pub avoid_climb: bool,
    /// Keep only candidates within `y_tolerance` of this height.
    pub target_y: Option<f32>,
    /// Defaults to 0.6 m when `target_y` is set.
    pub y_tolerance: Option<f32>,
}

impl NearestOptions {
    pub fn near_height(target_y: f32, y_tolerance: f32) -> Self {
        Self { avoid_climb: false, target_y: Some(target_y), y_tolerance: Some(y_tolerance) }
    }

    pub fn avoiding_climb(mut self) -> Self {
        self.avoid_climb = true;
        self
    }
}

/// Read-only view used by every spatial query of a frame.
#[derive(Debug, Clone, Copy)]
pub struct Occupancy<'a> {
    pub index: &'a OccupancyIndex,
    pub bounds: &'a InteriorBounds,
    pub config: &'a HullConfig,
}

impl<'a> Occupancy<'a> {
    pub fn new(index: &'a OccupancyIndex, bounds: &'a InteriorBounds, config: &'a HullConfig) -> Self {
        Self { index, bounds, config }
    }

    /// Inside the interior bounds, inside a walkable or doorway volume, and
    /// clear of every blocked volume inflated by the agent's radius less the
    /// blocked margin. Doorway membership does not exempt a point from the
    /// blocked test.
    pub fn is_occupiable(&self, p: Vec3f) -> bool {
        if !self.bounds.contains(p) {
            return false;
        }
        if !self.index.passable().any(|v| contains_point(p, v, 0.0)) {
            return false;
        }
        let inflate = self.config.blocked_inflation_m();
        !self.index.blocked.iter().any(|v| contains_point(p, v, inflate))
    }

    pub fn in_climb(&self, p: Vec3f) -> bool {
        self.index.climb.iter().any(|v| contains_point(p, v, 0.0))
    }

    fn clamp_candidate(&self, from: Vec3f, shape: &BoxShape) -> Vec3f {
        let in_box = shape.clamp_point(from, self.config.nearest_y_inset_m);
        self.bounds.clamp(in_box)
    }

    /// Slide `p` out of the inflated blocked volumes it sits in, one volume
    /// per pass, along the shortest horizontal exit that stays inside
    /// `shape` and the bounds. Stops early when no such exit exists.
    fn push_clear(&self, mut p: Vec3f, shape: &BoxShape) -> Vec3f {
        let inflate = self.config.blocked_inflation_m();
        for _ in 0..PUSH_OUT_PASSES {
            let Some(hit) = self.index.blocked.iter().find(|v| contains_point(p, v, inflate)) else {
                break;
            };
            let lo = hit.shape.min() - Vec3f::splat(inflate + PUSH_OUT_CLEARANCE);
            let hi = hit.shape.max() + Vec3f::splat(inflate + PUSH_OUT_CLEARANCE);
            let exits = [
                Vec3f::new(lo.x, p.y, p.z),
                Vec3f::new(hi.x, p.y, p.z),
                Vec3f::new(p.x, p.y, lo.z),
                Vec3f::new(p.x, p.y, hi.z),
            ];
            let next = exits
                .into_iter()
                .map(|exit| self.clamp_candidate(exit, shape))
                .filter(|c| !contains_point(*c, hit, inflate))
                .min_by(|a, b| p.distance_squared(*a).total_cmp(&p.distance_squared(*b)));
            match next {
                Some(next) => p = next,
                None => break,
            }
        }
        p
    }

    /// Closest legal point obtained by clamping `from` into each walkable or
    /// doorway volume and sliding the result clear of blocked volumes.
    /// `None` when no candidate qualifies.
    pub fn nearest_occupiable_point(&self, from: Vec3f, opts: NearestOptions) -> Option<Vec3f> {
        let tolerance = opts.y_tolerance.unwrap_or(DEFAULT_Y_TOLERANCE);
        let mut best: Option<(f32, Vec3f)> = None;
        for volume in self.index.passable() {
            let candidate = self.push_clear(self.clamp_candidate(from, &volume.shape), &volume.shape);
            if !self.is_occupiable(candidate) {
                continue;
            }
            if let Some(target_y) = opts.target_y {
                if (candidate.y - target_y).abs() > tolerance {
                    continue;
                }
            }
            if opts.avoid_climb && self.in_climb(candidate) {
                continue;
            }
            let d = from.distance_squared(candidate);
            if best.map_or(true, |(bd, _)| d < bd) {
                best = Some((d, candidate));
            }
        }
        best.map(|(_, p)| p)
    }

    /// Apply `delta` if the destination is legal; otherwise slide along X,
    /// then along Z from wherever the X step left the agent. Corners may
    /// catch; this is not swept collision.
    pub fn resolve_movement(&self, from: Vec3f, delta: Vec3f) -> Vec3f {
        let full = from + delta;
        if self.is_occupiable(full) {
            return full;
        }
        let mut p = from;
        let x_only = Vec3f::new(p.x + delta.x, p.y, p.z);
        if delta.x != 0.0 && self.is_occupiable(x_only) {
            p = x_only;
        }
        let z_only = Vec3f::new(p.x, p.y, p.z + delta.z);
        if delta.z != 0.0 && self.is_occupiable(z_only) {
            p = z_only;
        }
        p
    }
}

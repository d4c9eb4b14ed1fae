use serde::{Deserialize, Serialize};

pub use bevy_math::Vec3 as Vec3f;

/// Axis-aligned box given by its center and full size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxShape {
    pub center: Vec3f,
    pub size: Vec3f,
}

impl BoxShape {
    pub const fn new(center: Vec3f, size: Vec3f) -> Self {
        Self { center, size }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3f {
        self.size * 0.5
    }

    #[inline]
    pub fn min(&self) -> Vec3f {
        self.center - self.half_extents()
    }

    #[inline]
    pub fn max(&self) -> Vec3f {
        self.center + self.half_extents()
    }

    pub fn translated(&self, by: Vec3f) -> Self {
        Self { center: self.center + by, size: self.size }
    }

    /// Inclusive containment test. `inflate_xz` grows the box on X and Z only;
    /// the vertical extent is never inflated.
    pub fn contains(&self, point: Vec3f, inflate_xz: f32) -> bool {
        let half = self.half_extents();
        let hx = half.x + inflate_xz;
        let hz = half.z + inflate_xz;
        point.x >= self.center.x - hx
            && point.x <= self.center.x + hx
            && point.y >= self.center.y - half.y
            && point.y <= self.center.y + half.y
            && point.z >= self.center.z - hz
            && point.z <= self.center.z + hz
    }

    /// Closest point inside the box. The vertical range is shrunk by `y_inset`
    /// on both ends so the result never sits exactly on the floor or ceiling.
    pub fn clamp_point(&self, point: Vec3f, y_inset: f32) -> Vec3f {
        let min = self.min();
        let max = self.max();
        let mut lo_y = min.y + y_inset;
        let mut hi_y = max.y - y_inset;
        if lo_y > hi_y {
            // Thinner than twice the inset: use the mid-plane.
            lo_y = self.center.y;
            hi_y = self.center.y;
        }
        Vec3f::new(
            point.x.clamp(min.x, max.x),
            point.y.clamp(lo_y, hi_y),
            point.z.clamp(min.z, max.z),
        )
    }

    pub fn is_finite(&self) -> bool {
        self.center.is_finite() && self.size.is_finite()
    }
}

/// Horizontal distance squared between two points (Y ignored).
#[inline]
pub fn distance_xz_sq(a: Vec3f, b: Vec3f) -> f32 {
    let dx = a.x - b.x;
    let dz = a.z - b.z;
    dx * dx + dz * dz
}

/// `f32::clamp` that tolerates `min > max` by collapsing to their midpoint.
#[inline]
pub fn clamp_lenient(value: f32, min: f32, max: f32) -> f32 {
    if min > max {
        return 0.5 * (min + max);
    }
    value.clamp(min, max)
}

/// Round to millimetres, the precision module documents are authored at.
#[inline]
pub fn round_mm(value: f32) -> f32 {
    (value * 1000.0).round() / 1000.0
}

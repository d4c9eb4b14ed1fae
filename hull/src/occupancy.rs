use std::fmt;

use serde::Serialize;
use tracing::debug;

use crate::layout::AssemblyPlan;
use crate::math::{BoxShape, Vec3f};
use crate::template::VolumeKind;

/// Identity of a world volume: the module it came from, its local id and its
/// level. Renders as `<moduleIndex>:<templateId>:<localId>:L<level>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct VolumeKey {
    pub module_index: usize,
    pub template_id: String,
    pub local_id: String,
    pub level: i32,
}

impl fmt::Display for VolumeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}:L{}", self.module_index, self.template_id, self.local_id, self.level)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorldVolume {
    pub key: VolumeKey,
    pub kind: VolumeKind,
    pub shape: BoxShape,
}

impl WorldVolume {
    pub fn level(&self) -> i32 {
        self.key.level
    }

    pub fn contains(&self, p: Vec3f, inflate_xz: f32) -> bool {
        self.shape.contains(p, inflate_xz)
    }
}

/// World-space volumes of every rendered module, grouped by kind. Always
/// rebuilt from scratch alongside the assembly plan.
#[derive(Debug, Clone, Default)]
pub struct OccupancyIndex {
    pub walkable: Vec<WorldVolume>,
    pub blocked: Vec<WorldVolume>,
    pub doorway: Vec<WorldVolume>,
    pub climb: Vec<WorldVolume>,
    pub head_bump: Vec<WorldVolume>,
}

impl OccupancyIndex {
    pub fn build(plan: &AssemblyPlan) -> Self {
        let mut index = OccupancyIndex::default();
        for lp in plan.levels.values() {
            for placement in &lp.modules {
                let offset = Vec3f::new(0.0, lp.floor_y, placement.center_z);
                for (kind, local) in placement.template.volumes.iter() {
                    index.of_mut(kind).push(WorldVolume {
                        key: VolumeKey {
                            module_index: placement.module_index,
                            template_id: placement.template.id.clone(),
                            local_id: local.id.clone(),
                            level: lp.level,
                        },
                        kind,
                        shape: local.shape.translated(offset),
                    });
                }
            }
        }
        debug!(
            walkable = index.walkable.len(),
            blocked = index.blocked.len(),
            doorway = index.doorway.len(),
            climb = index.climb.len(),
            "occupancy index rebuilt"
        );
        index
    }

    pub fn of(&self, kind: VolumeKind) -> &[WorldVolume] {
        match kind {
            VolumeKind::Walkable => &self.walkable,
            VolumeKind::Blocked => &self.blocked,
            VolumeKind::Doorway => &self.doorway,
            VolumeKind::Climb => &self.climb,
            VolumeKind::HeadBump => &self.head_bump,
        }
    }

    fn of_mut(&mut self, kind: VolumeKind) -> &mut Vec<WorldVolume> {
        match kind {
            VolumeKind::Walkable => &mut self.walkable,
            VolumeKind::Blocked => &mut self.blocked,
            VolumeKind::Doorway => &mut self.doorway,
            VolumeKind::Climb => &mut self.climb,
            VolumeKind::HeadBump => &mut self.head_bump,
        }
    }

    pub fn len(&self) -> usize {
        VolumeKind::ALL.iter().map(|k| self.of(*k).len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Walkable and doorway volumes, the spaces an agent may stand in.
    pub fn passable(&self) -> impl Iterator<Item = &WorldVolume> {
        self.walkable.iter().chain(self.doorway.iter())
    }

    pub fn climb_volume(&self, key: &VolumeKey) -> Option<&WorldVolume> {
        self.climb.iter().find(|v| &v.key == key)
    }

    pub fn climb_at(&self, p: Vec3f, inflate_xz: f32) -> Option<&WorldVolume> {
        self.climb.iter().find(|v| v.contains(p, inflate_xz))
    }

    /// The segment of the same shaft on the neighbouring level: same local
    /// id, one level up or down, centre within the current footprint.
    pub fn adjacent_climb(&self, current: &WorldVolume, step: i32) -> Option<&WorldVolume> {
        let half = current.shape.half_extents();
        let target_level = current.key.level + step;
        self.climb
            .iter()
            .filter(|v| v.key.level == target_level && v.key.local_id == current.key.local_id)
            .filter(|v| {
                (v.shape.center.x - current.shape.center.x).abs() <= half.x
                    && (v.shape.center.z - current.shape.center.z).abs() <= half.z
            })
            .min_by(|a, b| {
                let da = crate::math::distance_xz_sq(a.shape.center, current.shape.center);
                let db = crate::math::distance_xz_sq(b.shape.center, current.shape.center);
                da.total_cmp(&db)
            })
    }

    /// Level of the first walkable or doorway volume containing `p`.
    pub fn passable_level_at(&self, p: Vec3f) -> Option<i32> {
        self.passable().find(|v| v.contains(p, 0.0)).map(WorldVolume::level)
    }
}

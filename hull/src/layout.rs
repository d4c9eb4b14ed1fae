//! Lays out every rendered level along the travel axis (+Z) and aligns the
//! ladder shafts across levels.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::Catalog;
use crate::chain::{build_level_chain, LevelChains};
use crate::config::HullConfig;
use crate::error::HullResult;
use crate::ladder::LadderLevelSet;
use crate::math::Vec3f;
use crate::template::ModuleTemplate;

/// One module instance in world space. Rebuilt on every assembly.
#[derive(Debug, Clone)]
pub struct Placement {
    pub module_index: usize,
    pub template: Arc<ModuleTemplate>,
    pub center_z: f32,
    pub length_m: f32,
    pub width_m: f32,
    pub level: i32,
}

impl Placement {
    pub fn template_id(&self) -> &str {
        &self.template.id
    }

    pub fn min_z(&self) -> f32 {
        self.center_z - self.length_m / 2.0
    }

    pub fn max_z(&self) -> f32 {
        self.center_z + self.length_m / 2.0
    }

    pub fn contains_z(&self, z: f32) -> bool {
        z >= self.min_z() && z <= self.max_z()
    }
}

#[derive(Debug, Clone)]
pub struct LevelPlacement {
    pub level: i32,
    pub floor_y: f32,
    /// Shift applied along the travel axis to line up the ladder shaft.
    pub z_offset: f32,
    pub ladder_index: Option<usize>,
    pub modules: Vec<Placement>,
}

/// Horizontal rectangle the agent may occupy, already inset by its radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct InteriorBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_z: f32,
    pub max_z: f32,
}

impl InteriorBounds {
    /// Bounds that reject every point.
    pub const EMPTY: InteriorBounds = InteriorBounds {
        min_x: f32::INFINITY,
        max_x: f32::NEG_INFINITY,
        min_z: f32::INFINITY,
        max_z: f32::NEG_INFINITY,
    };

    pub fn is_empty(&self) -> bool {
        self.min_x > self.max_x || self.min_z > self.max_z
    }

    pub fn contains(&self, p: Vec3f) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.z >= self.min_z && p.z <= self.max_z
    }

    pub fn clamp(&self, p: Vec3f) -> Vec3f {
        if self.is_empty() {
            return p;
        }
        Vec3f::new(p.x.clamp(self.min_x, self.max_x), p.y, p.z.clamp(self.min_z, self.max_z))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JoinAction {
    Insert { join_index: usize, level: i32 },
    RemoveLeft { index: usize, level: i32 },
    RemoveRight { index: usize, level: i32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Above,
    Below,
}

impl Direction {
    pub fn step(self) -> i32 {
        match self {
            Direction::Above => 1,
            Direction::Below => -1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LadderAction {
    Add { direction: Direction, index: usize, level: i32 },
    Remove { direction: Direction, index: usize, level: i32 },
}

/// Interaction point the UI places in the scene; carries the arguments of the
/// mutation it triggers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Control<A> {
    pub action: A,
    pub position: Vec3f,
}

pub type JoinControl = Control<JoinAction>;
pub type LadderControl = Control<LadderAction>;

#[derive(Debug, Clone)]
pub struct AssemblyPlan {
    pub anchor_level: i32,
    pub levels: BTreeMap<i32, LevelPlacement>,
    pub bounds: InteriorBounds,
}

impl AssemblyPlan {
    pub fn level(&self, level: i32) -> Option<&LevelPlacement> {
        self.levels.get(&level)
    }

    pub fn placement(&self, level: i32, index: usize) -> Option<&Placement> {
        self.level(level)?.modules.get(index)
    }

    pub fn placements(&self) -> impl Iterator<Item = &Placement> {
        self.levels.values().flat_map(|l| l.modules.iter())
    }

    pub fn module_count(&self) -> usize {
        self.levels.values().map(|l| l.modules.len()).sum()
    }

    /// First module of `level` whose Z extent contains `z`.
    pub fn module_index_at(&self, level: i32, z: f32) -> Option<usize> {
        self.level(level)?.modules.iter().position(|p| p.contains_z(z))
    }

    /// Insert and remove controls for every join of every rendered level.
    pub fn join_controls(&self) -> Vec<JoinControl> {
        let mut out = Vec::new();
        for lp in self.levels.values() {
            for pair in lp.modules.windows(2) {
                let (left, right) = (&pair[0], &pair[1]);
                let join_index = left.module_index;
                let join_z = left.max_z();
                let x = -(left.width_m.max(right.width_m) / 2.0 - 0.16);
                let y = lp.floor_y + 1.35;
                out.push(Control {
                    action: JoinAction::Insert { join_index, level: lp.level },
                    position: Vec3f::new(x, y, join_z),
                });
                if !left.template.fixed {
                    out.push(Control {
                        action: JoinAction::RemoveLeft { index: left.module_index, level: lp.level },
                        position: Vec3f::new(x, y, join_z - 0.28),
                    });
                }
                if !right.template.fixed {
                    out.push(Control {
                        action: JoinAction::RemoveRight { index: right.module_index, level: lp.level },
                        position: Vec3f::new(x, y, join_z + 0.28),
                    });
                }
            }
        }
        out
    }

    /// Add/remove-level controls for every ladder segment. Only edits that
    /// can succeed are offered: add where the neighbour level is missing,
    /// remove where it exists and level 0 keeps its ladder.
    pub fn ladder_controls(&self, ladders: &LadderLevelSet) -> Vec<LadderControl> {
        let mut out = Vec::new();
        for lp in self.levels.values() {
            let Some(index) = lp.ladder_index else { continue };
            let Some(p) = lp.modules.get(index) else { continue };
            let level = lp.level;
            let lower_y = lp.floor_y + 0.95;
            let upper_y = lp.floor_y + 1.95;
            let at = |y: f32| Vec3f::new(0.0, y, p.center_z);
            for (base, direction) in [(lower_y, Direction::Below), (upper_y, Direction::Above)] {
                let step = direction.step();
                if !ladders.contains(level + step) {
                    out.push(Control { action: LadderAction::Add { direction, index, level }, position: at(base) });
                } else if !ladders.removal_strands_ground(level, step) {
                    out.push(Control {
                        action: LadderAction::Remove { direction, index, level },
                        position: at(base + 0.22 * step as f32),
                    });
                }
            }
        }
        out
    }
}

struct RawLevel {
    level: i32,
    chain: Vec<Arc<ModuleTemplate>>,
    ladder_index: Option<usize>,
    total_length: f32,
    raw_ladder_z: Option<f32>,
}

/// Lay out every rendered level. The anchor level's ladder centerline is the
/// reference every other level's ladder is shifted onto; levels without a
/// ladder keep their own centering.
pub fn plan_assembly(
    catalog: &Catalog,
    chains: &LevelChains,
    ladders: &LadderLevelSet,
    anchor_level: i32,
    config: &HullConfig,
) -> HullResult<AssemblyPlan> {
    let mut raw = Vec::new();
    for level in ladders.rendered_levels() {
        let Some(ids) = chains.get(level) else { continue };
        let chain = build_level_chain(catalog, ids, ladders.variant_for(level))?;
        let ladder_index = chain.iter().position(|t| t.is_ladder());
        let total_length: f32 = chain.iter().map(|t| t.size.length_m).sum();
        let mut cursor = -total_length / 2.0;
        let mut raw_ladder_z = None;
        for (i, t) in chain.iter().enumerate() {
            if Some(i) == ladder_index {
                raw_ladder_z = Some(cursor + t.size.length_m / 2.0);
            }
            cursor += t.size.length_m;
        }
        raw.push(RawLevel { level, chain, ladder_index, total_length, raw_ladder_z });
    }

    let anchor_level = if raw.iter().any(|r| r.level == anchor_level) { anchor_level } else { 0 };
    let anchor_ladder_z = raw
        .iter()
        .find(|r| r.level == anchor_level)
        .and_then(|r| r.raw_ladder_z)
        .or_else(|| raw.iter().find_map(|r| r.raw_ladder_z))
        .unwrap_or(0.0);

    let mut levels = BTreeMap::new();
    let mut max_width = 0.0f32;
    let mut min_z = f32::INFINITY;
    let mut max_z = f32::NEG_INFINITY;
    for r in raw {
        let z_offset = r.raw_ladder_z.map(|z| anchor_ladder_z - z).unwrap_or(0.0);
        let floor_y = config.level_floor_y(r.level);
        let mut cursor = -r.total_length / 2.0 + z_offset;
        let mut modules = Vec::with_capacity(r.chain.len());
        for (module_index, template) in r.chain.into_iter().enumerate() {
            let length_m = template.size.length_m;
            let width_m = template.size.width_m;
            let center_z = cursor + length_m / 2.0;
            cursor += length_m;
            max_width = max_width.max(width_m);
            min_z = min_z.min(center_z - length_m / 2.0);
            max_z = max_z.max(center_z + length_m / 2.0);
            modules.push(Placement { module_index, template, center_z, length_m, width_m, level: r.level });
        }
        levels.insert(
            r.level,
            LevelPlacement { level: r.level, floor_y, z_offset, ladder_index: r.ladder_index, modules },
        );
    }

    let bounds = if min_z.is_finite() && max_z.is_finite() {
        let half_w = max_width / 2.0;
        let r = config.agent_radius_m;
        InteriorBounds {
            min_x: -(half_w - r - config.bounds_margin_x_m),
            max_x: half_w - r - config.bounds_margin_x_m,
            min_z: min_z + r + config.bounds_margin_z_m,
            max_z: max_z - r - config.bounds_margin_z_m,
        }
    } else {
        InteriorBounds::EMPTY
    };

    let plan = AssemblyPlan { anchor_level, levels, bounds };
    debug!(
        anchor_level,
        levels = plan.levels.len(),
        modules = plan.module_count(),
        ?bounds,
        "assembly planned"
    );
    Ok(plan)
}

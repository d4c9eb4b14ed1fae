//! The world aggregate: layout state, derived assembly and the agent, plus
//! the topology mutations that keep them consistent.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::agent::{AgentState, ClimbState};
use crate::builtins::DEFAULT_GROUND_CHAIN;
use crate::catalog::{Catalog, InsertChoice};
use crate::chain::{build_level_chain, reconcile_all_levels, ConcreteChain, LevelChains};
use crate::climb;
use crate::config::HullConfig;
use crate::error::{HullError, HullResult, MutationRefusal};
use crate::ladder::{LadderLevelSet, LADDER_SINGLE_ID};
use crate::layout::{plan_assembly, AssemblyPlan, Direction, InteriorBounds, JoinControl, LadderControl};
use crate::math::Vec3f;
use crate::occupancy::OccupancyIndex;
use crate::query::{NearestOptions, Occupancy};
use crate::save::PersistedLayout;
use crate::template::ModuleType;

/// A topology edit requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Insert { join_index: usize, template_id: String, level: i32 },
    Remove { index: usize, level: i32 },
    AddLevel { direction: Direction, index: usize, level: i32 },
    RemoveLevel { direction: Direction, index: usize, level: i32 },
}

/// How the agent was moved back into legal space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recovery {
    Unchanged,
    /// Left a climb volume that vanished or no longer contains the agent.
    Released,
    /// Grounded agent found itself inside a shaft and started climbing.
    Attached,
    Snapped,
    /// No legal point found; respawned at the anchor level's middle module.
    Spawned,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationReport {
    pub toast: String,
    pub battery_supply_present: bool,
    pub recovery: Recovery,
    pub agent_position: Vec3f,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatterySupply {
    pub level: i32,
    pub module_index: usize,
    pub template_id: String,
}

/// Read-only view of the derived assembly handed to rendering and power
/// collaborators.
#[derive(Debug, Clone, Copy)]
pub struct Assembly<'a> {
    pub plan: &'a AssemblyPlan,
    pub volumes: &'a OccupancyIndex,
    pub bounds: &'a InteriorBounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TopologyEdit {
    Insert { level: i32, index: usize },
    Remove { level: i32, index: usize },
    LadderLevels,
    /// Same chains, new anchor level.
    Relayout,
}

#[derive(Debug, Clone)]
struct AgentAnchor {
    level: i32,
    module_index: Option<usize>,
    local_z: f32,
}

fn remap_index(anchor: &AgentAnchor, edit: TopologyEdit) -> Option<usize> {
    let old = anchor.module_index?;
    match edit {
        TopologyEdit::Insert { level, index } if level == anchor.level => {
            Some(if old >= index { old + 1 } else { old })
        }
        TopologyEdit::Remove { level, index } if level == anchor.level => {
            if old == index {
                None
            } else if old > index {
                Some(old - 1)
            } else {
                Some(old)
            }
        }
        TopologyEdit::Insert { .. } | TopologyEdit::Remove { .. } | TopologyEdit::Relayout => Some(old),
        TopologyEdit::LadderLevels => None,
    }
}

fn refuse(refusal: MutationRefusal) -> HullError {
    warn!(%refusal, "mutation refused");
    HullError::InvalidMutation(refusal)
}

#[derive(Debug, Clone)]
pub struct World {
    pub(crate) catalog: Catalog,
    pub(crate) config: HullConfig,
    pub(crate) chains: LevelChains,
    pub(crate) ladders: LadderLevelSet,
    pub(crate) plan: AssemblyPlan,
    pub(crate) index: OccupancyIndex,
    pub(crate) agent: AgentState,
    pub(crate) battery_supply_present: bool,
}

impl World {
    /// A fresh world with the default ground chain and the agent in the
    /// cockpit.
    pub fn new(catalog: Catalog, config: HullConfig) -> HullResult<Self> {
        let ground = DEFAULT_GROUND_CHAIN.iter().map(|s| s.to_string()).collect();
        let mut chains = LevelChains::new();
        chains.set(0, ground);
        Self::from_parts(catalog, config, chains, LadderLevelSet::new())
    }

    /// Restore a persisted layout. Stale ids are dropped by reconciliation.
    pub fn from_layout(catalog: Catalog, config: HullConfig, layout: &PersistedLayout) -> HullResult<Self> {
        let (chains, ladders) = layout.hydrate();
        Self::from_parts(catalog, config, chains, ladders)
    }

    fn from_parts(
        catalog: Catalog,
        config: HullConfig,
        chains: LevelChains,
        ladders: LadderLevelSet,
    ) -> HullResult<Self> {
        let plan = AssemblyPlan {
            anchor_level: 0,
            levels: Default::default(),
            bounds: InteriorBounds::EMPTY,
        };
        let mut world = Self {
            catalog,
            config,
            chains,
            ladders,
            plan,
            index: OccupancyIndex::default(),
            agent: AgentState::default(),
            battery_supply_present: false,
        };
        world.reconcile_chains();
        world.rebuild_with_anchor(0)?;
        world.battery_supply_present = world.compute_battery_supply();
        world.place_agent_at_cockpit();
        Ok(world)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &HullConfig {
        &self.config
    }

    pub fn chains(&self) -> &LevelChains {
        &self.chains
    }

    pub fn ladders(&self) -> &LadderLevelSet {
        &self.ladders
    }

    pub fn plan(&self) -> &AssemblyPlan {
        &self.plan
    }

    pub fn volumes(&self) -> &OccupancyIndex {
        &self.index
    }

    pub fn bounds(&self) -> &InteriorBounds {
        &self.plan.bounds
    }

    pub fn agent(&self) -> &AgentState {
        &self.agent
    }

    /// Replace the agent (e.g. restoring a saved pose) and bring it back into
    /// legal space.
    pub fn set_agent(&mut self, agent: AgentState) -> Recovery {
        self.agent = agent;
        self.ensure_valid()
    }

    pub fn assembly(&self) -> Assembly<'_> {
        Assembly { plan: &self.plan, volumes: &self.index, bounds: &self.plan.bounds }
    }

    pub fn occupancy(&self) -> Occupancy<'_> {
        Occupancy::new(&self.index, &self.plan.bounds, &self.config)
    }

    pub fn layout(&self) -> PersistedLayout {
        PersistedLayout::capture(&self.chains, &self.ladders)
    }

    // Queries ------------------------------------------------------------

    pub fn is_occupiable(&self, p: Vec3f) -> bool {
        self.occupancy().is_occupiable(p)
    }

    pub fn nearest_occupiable_point(&self, p: Vec3f, opts: NearestOptions) -> Option<Vec3f> {
        self.occupancy().nearest_occupiable_point(p, opts)
    }

    pub fn resolve_movement(&self, from: Vec3f, delta: Vec3f) -> Vec3f {
        self.occupancy().resolve_movement(from, delta)
    }

    /// The level the agent is on: its climb volume's level, else the level
    /// of a walkable or doorway volume containing it, else the rendered level
    /// whose standing eye height is closest (ties go to the lower level).
    pub fn anchor_level(&self) -> i32 {
        let levels = self.ladders.rendered_levels();
        if levels.len() <= 1 {
            return levels.iter().next().copied().unwrap_or(0);
        }
        if let Some(key) = self.agent.climb_volume() {
            return key.level;
        }
        if let Some(level) = self.index.passable_level_at(self.agent.position) {
            return level;
        }
        let y = self.agent.position.y;
        let mut best = 0;
        let mut best_d = f32::INFINITY;
        for level in levels {
            let d = (y - self.config.standing_eye_y(level)).abs();
            if d < best_d {
                best_d = d;
                best = level;
            }
        }
        best
    }

    pub fn build_level_chain(&self, level: i32) -> HullResult<ConcreteChain> {
        let ids = self.chains.get(level).ok_or(HullError::InvalidMutation(MutationRefusal::UnknownLevel { level }))?;
        build_level_chain(&self.catalog, ids, self.ladders.variant_for(level))
    }

    fn reconcile_chains(&mut self) -> bool {
        reconcile_all_levels(&self.catalog, &mut self.chains, &self.ladders)
    }

    /// Re-plan every rendered level around the agent's current level and
    /// rebuild the occupancy index from scratch. The agent keeps its offset
    /// within the module it stood in, so a shaft it is climbing moves with it.
    pub fn rebuild_assembly(&mut self) -> HullResult<Assembly<'_>> {
        let anchor = self.snapshot_agent();
        self.rebuild_with_anchor(anchor.level)?;
        self.reanchor_agent(&anchor, TopologyEdit::Relayout);
        let recovery = self.ensure_valid();
        debug!(anchor_level = anchor.level, ?recovery, "assembly rebuilt");
        Ok(self.assembly())
    }

    fn rebuild_with_anchor(&mut self, anchor_level: i32) -> HullResult<()> {
        self.plan = plan_assembly(&self.catalog, &self.chains, &self.ladders, anchor_level, &self.config)?;
        self.index = OccupancyIndex::build(&self.plan);
        Ok(())
    }

    // Power ---------------------------------------------------------------

    pub fn battery_supply_modules(&self) -> Vec<BatterySupply> {
        self.plan
            .placements()
            .filter(|p| p.template.battery_supply)
            .map(|p| BatterySupply { level: p.level, module_index: p.module_index, template_id: p.template.id.clone() })
            .collect()
    }

    pub fn battery_supply_present(&self) -> bool {
        self.battery_supply_present
    }

    fn compute_battery_supply(&self) -> bool {
        self.plan.placements().any(|p| p.template.battery_supply)
    }

    // Menus and controls --------------------------------------------------

    /// Insert menu for `level`; the ladder entry is disabled when the level
    /// already holds one.
    pub fn insert_choices(&self, level: i32) -> Vec<InsertChoice> {
        let has_ladder = self.chains.ladder_index(&self.catalog, level).is_some();
        self.catalog
            .insertable_choices()
            .into_iter()
            .map(|mut choice| {
                if has_ladder && self.catalog.is_ladder(&choice.id) {
                    choice.label = format!("{} (Already placed)", choice.label);
                    choice.disabled_reason = Some("Already placed".into());
                }
                choice
            })
            .collect()
    }

    pub fn join_controls(&self) -> Vec<JoinControl> {
        self.plan.join_controls()
    }

    pub fn ladder_controls(&self) -> Vec<LadderControl> {
        self.plan.ladder_controls(&self.ladders)
    }

    // Agent placement -----------------------------------------------------

    /// Put the agent at the cockpit centre at standing height, or the nearest
    /// legal point to it. Look angles are reset.
    pub fn place_agent_at_cockpit(&mut self) {
        let level = self.plan.anchor_level;
        let Some(lp) = self.plan.level(level) else { return };
        let cockpit = lp
            .modules
            .iter()
            .find(|p| p.template.module_type == ModuleType::Cockpit)
            .or_else(|| lp.modules.first());
        let Some(cockpit) = cockpit else { return };
        let candidate = Vec3f::new(0.0, self.config.standing_eye_y(level), cockpit.center_z);
        let occ = self.occupancy();
        let spawn = if occ.is_occupiable(candidate) {
            Some(candidate)
        } else {
            occ.nearest_occupiable_point(candidate, NearestOptions::default())
        };
        if let Some(p) = spawn {
            self.agent.position = p;
        }
        self.agent.yaw = 0.0;
        self.agent.pitch = 0.0;
        self.agent.climb = ClimbState::Grounded;
    }

    fn spawn_at_midpoint(&mut self) {
        let level = self.anchor_level();
        let center_z = self
            .plan
            .level(level)
            .and_then(|lp| {
                let n = lp.modules.len();
                lp.modules.get(n.saturating_sub(1) / 2)
            })
            .map(|p| p.center_z)
            .unwrap_or(0.0);
        self.agent.position = Vec3f::new(0.0, self.config.standing_eye_y(level), center_z);
        self.agent.climb = ClimbState::Grounded;
    }

    /// Bring the agent back into legal space: drop a climb it has left,
    /// attach to a shaft it stands in, or snap to the nearest legal point,
    /// respawning when there is none.
    pub fn ensure_valid(&mut self) -> Recovery {
        let mut recovery = Recovery::Unchanged;
        if let Some(key) = self.agent.climb_volume() {
            let retained = self
                .index
                .climb_volume(key)
                .is_some_and(|v| v.contains(self.agent.position, self.config.climb_retain_inflate_m));
            if retained {
                return Recovery::Unchanged;
            }
            self.agent.climb = ClimbState::Grounded;
            recovery = Recovery::Released;
        }

        let position = self.agent.position;
        if let Some(volume) = self.index.climb_at(position, 0.0) {
            climb::attach(&mut self.agent, volume, position, &self.config);
            return Recovery::Attached;
        }

        let occ = self.occupancy();
        if occ.is_occupiable(position) {
            return recovery;
        }
        match occ.nearest_occupiable_point(position, NearestOptions::default()) {
            Some(p) => {
                self.agent.position = p;
                Recovery::Snapped
            }
            None => {
                let err = HullError::NoLegalPosition { level: self.anchor_level() };
                warn!(%err, ?position, "respawning at midpoint");
                self.spawn_at_midpoint();
                Recovery::Spawned
            }
        }
    }

    // Topology mutations --------------------------------------------------

    fn snapshot_agent(&self) -> AgentAnchor {
        let level = self.anchor_level();
        let z = self.agent.position.z;
        let module_index = self
            .agent
            .climb_volume()
            .filter(|key| key.level == level)
            .map(|key| key.module_index)
            .or_else(|| self.plan.module_index_at(level, z));
        let local_z = module_index
            .and_then(|i| self.plan.placement(level, i))
            .map(|p| z - p.center_z)
            .unwrap_or(0.0);
        AgentAnchor { level, module_index, local_z }
    }

    fn middle_ids(&self, level: i32) -> Result<&Vec<String>, HullError> {
        self.chains
            .as_map()
            .get(&level)
            .ok_or_else(|| refuse(MutationRefusal::UnknownLevel { level }))
    }

    /// Put the agent back at its stored offset within the module it stood
    /// in, wherever that module landed after `edit`.
    fn reanchor_agent(&mut self, anchor: &AgentAnchor, edit: TopologyEdit) {
        let Some(new_index) = remap_index(anchor, edit) else { return };
        let Some(p) = self.plan.placement(anchor.level, new_index) else { return };
        self.agent.position.z = p.center_z + anchor.local_z;
        let template_id = p.template.id.clone();
        if let ClimbState::Climbing { volume, .. } = &mut self.agent.climb {
            if volume.level == anchor.level && Some(volume.module_index) == anchor.module_index {
                volume.module_index = new_index;
                volume.template_id = template_id;
            }
        }
    }

    /// Reconcile, rebuild, re-anchor the agent against the module it stood
    /// in, then revalidate.
    fn commit(&mut self, anchor: AgentAnchor, edit: TopologyEdit, toast: String) -> HullResult<MutationReport> {
        self.reconcile_chains();
        self.rebuild_with_anchor(anchor.level)?;
        self.reanchor_agent(&anchor, edit);

        self.battery_supply_present = self.compute_battery_supply();
        let recovery = self.ensure_valid();
        info!(
            %toast,
            ?edit,
            ?recovery,
            battery_supply = self.battery_supply_present,
            "topology committed"
        );
        Ok(MutationReport {
            toast,
            battery_supply_present: self.battery_supply_present,
            recovery,
            agent_position: self.agent.position,
        })
    }

    /// Insert `template_id` into the join between modules `join_index` and
    /// `join_index + 1` of `level`. Inserting a ladder resets the ladder
    /// level set to `{0}`.
    pub fn insert_module_at_join(&mut self, join_index: usize, template_id: &str, level: i32) -> HullResult<MutationReport> {
        let template = self.catalog.get(template_id)?.clone();
        let ids = self.middle_ids(level)?;
        if template.fixed || !template.insertable {
            return Err(refuse(MutationRefusal::NotInsertable { id: template_id.to_string() }));
        }
        if join_index + 1 >= ids.len() + 2 {
            return Err(refuse(MutationRefusal::JoinOutOfRange { join: join_index, level }));
        }
        if template.is_ladder() && self.chains.ladder_index(&self.catalog, level).is_some() {
            return Err(refuse(MutationRefusal::SecondLadder { level }));
        }

        let anchor = self.snapshot_agent();
        let stored = if template.is_ladder() { LADDER_SINGLE_ID.to_string() } else { template.id.clone() };
        if let Some(ids) = self.chains.get_mut(level) {
            ids.insert(join_index, stored);
        }
        let edit = if template.is_ladder() {
            self.ladders.reset_to_ground();
            TopologyEdit::LadderLevels
        } else {
            TopologyEdit::Insert { level, index: join_index + 1 }
        };
        self.commit(anchor, edit, format!("Inserted {}", template.id))
    }

    /// Remove the module at concrete index `index` of `level`. End-caps are
    /// refused; removing the ladder clears the ladder level set.
    pub fn remove_module_at_index(&mut self, index: usize, level: i32) -> HullResult<MutationReport> {
        let ids = self.middle_ids(level)?;
        let len = ids.len() + 2;
        if index >= len {
            return Err(refuse(MutationRefusal::NoModuleAtIndex { index, level }));
        }
        if index == 0 || index == len - 1 {
            return Err(refuse(MutationRefusal::FixedModule { index }));
        }
        let id = ids[index - 1].clone();
        if self.catalog.get(&id).map(|t| t.fixed).unwrap_or(false) {
            return Err(refuse(MutationRefusal::FixedModule { index }));
        }

        let anchor = self.snapshot_agent();
        if let Some(ids) = self.chains.get_mut(level) {
            ids.remove(index - 1);
        }
        let edit = if self.catalog.is_ladder(&id) {
            self.ladders.clear();
            TopologyEdit::LadderLevels
        } else {
            TopologyEdit::Remove { level, index }
        };
        self.commit(anchor, edit, format!("Removed {id}"))
    }

    fn require_ladder(&self, index: usize, level: i32) -> Result<(), HullError> {
        let ids = self.middle_ids(level)?;
        if index >= ids.len() + 2 {
            return Err(refuse(MutationRefusal::NoModuleAtIndex { index, level }));
        }
        if self.chains.ladder_index(&self.catalog, level) != Some(index) {
            return Err(refuse(MutationRefusal::NotALadder { index, level }));
        }
        Ok(())
    }

    /// Add a ladder level next to `level` through the ladder at
    /// `anchor_index`. The new level starts with just the ladder room.
    pub fn add_ladder_level(&mut self, direction: Direction, anchor_index: usize, level: i32) -> HullResult<MutationReport> {
        self.require_ladder(anchor_index, level)?;
        let target = level + direction.step();
        if self.ladders.contains(target) {
            return Err(refuse(MutationRefusal::LevelExists { level: target }));
        }

        let anchor = self.snapshot_agent();
        if !self.chains.contains_level(target) {
            self.chains.set(target, vec![LADDER_SINGLE_ID.to_string()]);
        }
        self.ladders.insert(level);
        self.ladders.insert(target);
        let toast = match direction {
            Direction::Above => "Added ladder floor above",
            Direction::Below => "Added ladder floor below",
        };
        self.commit(anchor, TopologyEdit::LadderLevels, toast.to_string())
    }

    /// Remove the ladder level next to `level` and every level beyond it.
    /// Refused if level 0 would lose its ladder while other ladder levels
    /// remain.
    pub fn remove_ladder_level(&mut self, direction: Direction, anchor_index: usize, level: i32) -> HullResult<MutationReport> {
        self.require_ladder(anchor_index, level)?;
        let target = level + direction.step();
        if !self.ladders.contains(target) {
            return Err(refuse(MutationRefusal::NoLevelInDirection { level: target }));
        }
        if self.ladders.removal_strands_ground(level, direction.step()) {
            return Err(refuse(MutationRefusal::WouldStrandLevels { level: 0 }));
        }
        let mut next = self.ladders.clone();
        match direction {
            Direction::Above => next.retain_at_or_below(level),
            Direction::Below => next.retain_at_or_above(level),
        }
        next.retain_connected();

        let anchor = self.snapshot_agent();
        let removed = self.ladders.len() - next.len();
        self.ladders = next;
        let side = match direction {
            Direction::Above => "above",
            Direction::Below => "below",
        };
        let toast = if removed > 1 {
            format!("Removed {removed} floors {side}")
        } else {
            format!("Removed ladder floor {side}")
        };
        self.commit(anchor, TopologyEdit::LadderLevels, toast)
    }

    pub fn apply_mutation(&mut self, mutation: &Mutation) -> HullResult<MutationReport> {
        match mutation {
            Mutation::Insert { join_index, template_id, level } => {
                self.insert_module_at_join(*join_index, template_id, *level)
            }
            Mutation::Remove { index, level } => self.remove_module_at_index(*index, *level),
            Mutation::AddLevel { direction, index, level } => self.add_ladder_level(*direction, *index, *level),
            Mutation::RemoveLevel { direction, index, level } => {
                self.remove_ladder_level(*direction, *index, *level)
            }
        }
    }
}

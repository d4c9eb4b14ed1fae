//! Module-chain assembly and spatial occupancy for a walkable hull.
//!
//! Modules (cockpit, rooms, ladder shafts, cargo) are chained along +Z per
//! level, levels are stacked through a shared ladder shaft, and every module's
//! volumes are indexed in world space so the agent can be kept in legal
//! space while the layout is edited under it. No rendering types.

mod math;
pub use math::{BoxShape, Vec3f};

mod config;
pub use config::HullConfig;

mod error;
pub use error::{HullError, HullResult, MutationRefusal};

pub mod template;
pub use template::{ModuleTemplate, ModuleType, VolumeKind};

pub mod builtins;
pub mod ladder;
pub use ladder::{LadderLevelSet, LadderVariant};

mod catalog;
pub use catalog::{Catalog, InsertChoice};

pub mod chain;
pub use chain::{build_level_chain, reconcile_all_levels, ConcreteChain, LevelChains};

pub mod layout;
pub use layout::{
    plan_assembly, AssemblyPlan, Direction, InteriorBounds, JoinAction, JoinControl, LadderAction, LadderControl,
    LevelPlacement, Placement,
};

pub mod occupancy;
pub use occupancy::{OccupancyIndex, VolumeKey, WorldVolume};

pub mod query;
pub use query::{NearestOptions, Occupancy};

mod agent;
pub use agent::{AgentState, ClimbState};

pub mod climb;

pub mod save;
pub use save::PersistedLayout;

mod world;
pub use world::{Assembly, BatterySupply, Mutation, MutationReport, Recovery, World};

mod frame;
pub use frame::{FrameInput, FrameOutcome};

//! Per-level module id lists and the reconciliation pass that keeps them
//! consistent with the ladder level set.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::error::HullResult;
use crate::ladder::{LadderLevelSet, LadderVariant, LADDER_SINGLE_ID};
use crate::template::ModuleTemplate;

/// A resolved chain: cockpit, the middle modules, cargo.
pub type ConcreteChain = Vec<Arc<ModuleTemplate>>;

/// Middle module ids per level. End-caps are never stored; ladder rooms are
/// always stored under the single-variant id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LevelChains(BTreeMap<i32, Vec<String>>);

impl LevelChains {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: BTreeMap<i32, Vec<String>>) -> Self {
        Self(map)
    }

    pub fn get(&self, level: i32) -> Option<&[String]> {
        self.0.get(&level).map(Vec::as_slice)
    }

    pub fn get_mut(&mut self, level: i32) -> Option<&mut Vec<String>> {
        self.0.get_mut(&level)
    }

    pub fn set(&mut self, level: i32, ids: Vec<String>) {
        self.0.insert(level, ids);
    }

    pub fn contains_level(&self, level: i32) -> bool {
        self.0.contains_key(&level)
    }

    pub fn levels(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.keys().copied()
    }

    pub fn as_map(&self) -> &BTreeMap<i32, Vec<String>> {
        &self.0
    }

    /// Index of the ladder room within the concrete chain of `level`.
    pub fn ladder_index(&self, catalog: &Catalog, level: i32) -> Option<usize> {
        self.get(level)?
            .iter()
            .position(|id| catalog.is_ladder(id))
            .map(|i| i + 1)
    }

    /// Length of the concrete chain of `level`, end-caps included.
    pub fn concrete_len(&self, level: i32) -> Option<usize> {
        self.get(level).map(|ids| ids.len() + 2)
    }
}

/// Resolve middle ids into a concrete chain bracketed by the end-caps. Fixed
/// ids in the list are skipped; a ladder id resolves to `ladder` (or the
/// single variant when `None`).
pub fn build_level_chain(
    catalog: &Catalog,
    ids: &[String],
    ladder: Option<LadderVariant>,
) -> HullResult<ConcreteChain> {
    let mut chain = Vec::with_capacity(ids.len() + 2);
    chain.push(Arc::clone(catalog.cockpit()));
    for id in ids {
        let template = catalog.get(id)?;
        if template.fixed {
            continue;
        }
        if template.is_ladder() {
            let variant = ladder.unwrap_or(LadderVariant::Single);
            chain.push(Arc::clone(catalog.ladder_template(variant)?));
        } else {
            chain.push(Arc::clone(template));
        }
    }
    chain.push(Arc::clone(catalog.cargo()));
    Ok(chain)
}

/// Make one level's middle ids consistent: drop unknown and fixed ids, store
/// ladders under the single id, and hold the ladder count at one for a ladder
/// level and zero otherwise. Returns whether anything changed.
pub fn reconcile_level(catalog: &Catalog, level: i32, ids: &mut Vec<String>, ladder_level: bool) -> bool {
    let before = ids.clone();
    let mut out: Vec<String> = Vec::with_capacity(ids.len() + 1);
    let mut ladder_seen = false;
    for id in ids.drain(..) {
        let Ok(template) = catalog.get(&id) else {
            warn!(level, %id, "dropping unknown module id");
            continue;
        };
        if template.fixed {
            continue;
        }
        if template.is_ladder() {
            if !ladder_level || ladder_seen {
                continue;
            }
            ladder_seen = true;
            out.push(LADDER_SINGLE_ID.to_string());
        } else {
            out.push(template.id.clone());
        }
    }
    if ladder_level && !ladder_seen {
        out.insert(out.len() / 2, LADDER_SINGLE_ID.to_string());
    }
    *ids = out;
    *ids != before
}

/// Reconcile every tracked level (`{0}` plus the ladder levels). Levels that
/// are no longer tracked are dropped; newly tracked ladder levels start with
/// just the ladder room.
pub fn reconcile_all_levels(catalog: &Catalog, chains: &mut LevelChains, ladders: &LadderLevelSet) -> bool {
    let tracked = ladders.tracked_levels();
    let mut changed = false;

    let before = chains.0.len();
    chains.0.retain(|level, _| tracked.contains(level));
    changed |= chains.0.len() != before;

    for level in tracked {
        let ids = chains.0.entry(level).or_insert_with(|| {
            changed = true;
            Vec::new()
        });
        changed |= reconcile_level(catalog, level, ids, ladders.contains(level));
    }
    changed
}

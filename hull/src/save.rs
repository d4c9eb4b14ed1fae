//! The layout part of a save file:
//! `{ "levelChainIds": { "<level>": [ids] }, "ladderLevelOffsets": [ints] }`.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

use crate::builtins::DEFAULT_GROUND_CHAIN;
use crate::chain::LevelChains;
use crate::error::{HullError, HullResult};
use crate::ladder::LadderLevelSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedLayout {
    #[serde(default)]
    pub level_chain_ids: BTreeMap<String, Vec<String>>,
    #[serde(default, deserialize_with = "integers_only")]
    pub ladder_level_offsets: Vec<i32>,
    /// Flat level-0 chain (end-caps included) written by older versions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_ids: Option<Vec<String>>,
}

fn integers_only<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<i32>, D::Error> {
    let raw: Vec<serde_json::Value> = Vec::deserialize(d)?;
    Ok(raw
        .iter()
        .filter_map(|v| v.as_i64())
        .filter_map(|v| i32::try_from(v).ok())
        .collect())
}

impl PersistedLayout {
    pub fn from_json(json: &str) -> HullResult<Self> {
        serde_json::from_str(json).map_err(HullError::LayoutParse)
    }

    pub fn to_json_pretty(&self) -> HullResult<String> {
        serde_json::to_string_pretty(self).map_err(HullError::LayoutParse)
    }

    pub fn capture(chains: &LevelChains, ladders: &LadderLevelSet) -> Self {
        Self {
            level_chain_ids: chains
                .as_map()
                .iter()
                .map(|(level, ids)| (level.to_string(), ids.clone()))
                .collect(),
            ladder_level_offsets: ladders.iter().collect(),
            module_ids: None,
        }
    }

    /// Raw chains and ladder set as stored. Unknown or stale ids are left for
    /// reconciliation to drop.
    pub fn hydrate(&self) -> (LevelChains, LadderLevelSet) {
        let mut map = BTreeMap::new();
        for (key, ids) in &self.level_chain_ids {
            match key.trim().parse::<i32>() {
                Ok(level) => {
                    map.insert(level, ids.clone());
                }
                Err(_) => warn!(%key, "ignoring non-integer level key"),
            }
        }
        if !map.contains_key(&0) {
            let ground = match &self.module_ids {
                Some(ids) => ids.clone(),
                None => DEFAULT_GROUND_CHAIN.iter().map(|s| s.to_string()).collect(),
            };
            map.insert(0, ground);
        }
        (
            LevelChains::from_map(map),
            LadderLevelSet::from_levels(self.ladder_level_offsets.iter().copied()),
        )
    }
}

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub const LADDER_SINGLE_ID: &str = "ladder_room_single_mk1";
pub const LADDER_LOWEST_ID: &str = "ladder_room_lowest_mk1";
pub const LADDER_MIDDLE_ID: &str = "ladder_room_middle_mk1";
pub const LADDER_HIGHEST_ID: &str = "ladder_room_highest_mk1";
/// Older saves used this id for the single ladder room.
pub const LADDER_LEGACY_ID: &str = "ladder_room_mk1";

/// Geometric form of the ladder room. Named after the position in the ladder
/// run: `Lowest` is the bottom segment (opening upward only), `Highest` the
/// top segment (opening downward only).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LadderVariant {
    Single,
    Lowest,
    Middle,
    Highest,
}

impl LadderVariant {
    pub fn from_neighbors(above: bool, below: bool) -> Self {
        match (above, below) {
            (true, true) => LadderVariant::Middle,
            (true, false) => LadderVariant::Lowest,
            (false, true) => LadderVariant::Highest,
            (false, false) => LadderVariant::Single,
        }
    }

    pub fn template_id(self) -> &'static str {
        match self {
            LadderVariant::Single => LADDER_SINGLE_ID,
            LadderVariant::Lowest => LADDER_LOWEST_ID,
            LadderVariant::Middle => LADDER_MIDDLE_ID,
            LadderVariant::Highest => LADDER_HIGHEST_ID,
        }
    }

    pub fn floor_hole(self) -> bool {
        matches!(self, LadderVariant::Highest | LadderVariant::Middle)
    }

    pub fn ceiling_hole(self) -> bool {
        matches!(self, LadderVariant::Lowest | LadderVariant::Middle)
    }
}

/// Level offsets known to hold a ladder segment. Level 0 is always tracked,
/// whether or not it is a member.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LadderLevelSet(BTreeSet<i32>);

impl LadderLevelSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_levels(levels: impl IntoIterator<Item = i32>) -> Self {
        Self(levels.into_iter().collect())
    }

    pub fn contains(&self, level: i32) -> bool {
        self.0.contains(&level)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().copied()
    }

    pub fn insert(&mut self, level: i32) -> bool {
        self.0.insert(level)
    }

    /// Variant for a ladder level, `None` when the level holds no ladder.
    pub fn variant_for(&self, level: i32) -> Option<LadderVariant> {
        if !self.contains(level) {
            return None;
        }
        Some(LadderVariant::from_neighbors(
            self.contains(level + 1),
            self.contains(level - 1),
        ))
    }

    /// `{0}` plus every ladder level.
    pub fn tracked_levels(&self) -> BTreeSet<i32> {
        let mut out = self.0.clone();
        out.insert(0);
        out
    }

    /// Level 0 plus the ladder levels reachable from it through consecutive
    /// ladder levels.
    pub fn rendered_levels(&self) -> BTreeSet<i32> {
        let mut out = BTreeSet::from([0]);
        if !self.contains(0) {
            return out;
        }
        let mut up = 1;
        while self.contains(up) {
            out.insert(up);
            up += 1;
        }
        let mut down = -1;
        while self.contains(down) {
            out.insert(down);
            down -= 1;
        }
        out
    }

    /// Whether dropping every level beyond `level` in the direction of
    /// `step` (+1 up, -1 down) would take level 0's ladder while `level`
    /// itself stays.
    pub fn removal_strands_ground(&self, level: i32, step: i32) -> bool {
        self.contains(0) && level * step < 0
    }

    pub fn retain_at_or_below(&mut self, level: i32) {
        self.0.retain(|l| *l <= level);
    }

    pub fn retain_at_or_above(&mut self, level: i32) {
        self.0.retain(|l| *l >= level);
    }

    /// Keep only the run of consecutive levels that contains level 0.
    pub fn retain_connected(&mut self) {
        let connected = self.rendered_levels();
        if !self.contains(0) {
            self.0.clear();
            return;
        }
        self.0.retain(|l| connected.contains(l));
    }

    pub fn reset_to_ground(&mut self) {
        self.0 = BTreeSet::from([0]);
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variant_follows_neighbors() {
        let set = LadderLevelSet::from_levels([0, 1, 2]);
        assert_eq!(set.variant_for(0), Some(LadderVariant::Lowest));
        assert_eq!(set.variant_for(1), Some(LadderVariant::Middle));
        assert_eq!(set.variant_for(2), Some(LadderVariant::Highest));
        assert_eq!(set.variant_for(3), None);
    }

    #[test]
    fn rendered_levels_stop_at_gaps() {
        let set = LadderLevelSet::from_levels([-1, 0, 1, 3]);
        let rendered: Vec<i32> = set.rendered_levels().into_iter().collect();
        assert_eq!(rendered, vec![-1, 0, 1]);
        let set = LadderLevelSet::from_levels([1, 2]);
        let rendered: Vec<i32> = set.rendered_levels().into_iter().collect();
        assert_eq!(rendered, vec![0]);
    }
}

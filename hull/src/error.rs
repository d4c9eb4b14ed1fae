use std::fmt;

use serde::{Deserialize, Serialize};

use crate::template::ModuleType;

/// Why a topology edit was refused. The `Display` text is the toast shown to
/// the user; a refused edit never changes world state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationRefusal {
    FixedModule { index: usize },
    SecondLadder { level: i32 },
    NotInsertable { id: String },
    NoModuleAtIndex { index: usize, level: i32 },
    JoinOutOfRange { join: usize, level: i32 },
    UnknownLevel { level: i32 },
    NotALadder { index: usize, level: i32 },
    LevelExists { level: i32 },
    NoLevelInDirection { level: i32 },
    WouldStrandLevels { level: i32 },
}

impl fmt::Display for MutationRefusal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FixedModule { index } => {
                write!(f, "Module {index} is a fixed end-cap and cannot be changed")
            }
            Self::SecondLadder { level } => {
                write!(f, "Only one ladder module allowed on level {level}")
            }
            Self::NotInsertable { id } => write!(f, "{id} cannot be inserted"),
            Self::NoModuleAtIndex { index, level } => {
                write!(f, "No module at index {index} on level {level}")
            }
            Self::JoinOutOfRange { join, level } => {
                write!(f, "No join {join} on level {level}")
            }
            Self::UnknownLevel { level } => write!(f, "Level {level} does not exist"),
            Self::NotALadder { index, level } => {
                write!(f, "Module {index} on level {level} is not a ladder room")
            }
            Self::LevelExists { level } => write!(f, "Level {level} already exists"),
            Self::NoLevelInDirection { level } => {
                write!(f, "There is no level {level} to remove")
            }
            Self::WouldStrandLevels { level } => write!(
                f,
                "Removing the ladder on level {level} would strand the levels it connects"
            ),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum HullError {
    #[error("unknown module template: {id}")]
    UnknownTemplate { id: String },
    #[error("mutation refused: {0}")]
    InvalidMutation(MutationRefusal),
    #[error("degenerate geometry in {template} volume {volume}: {reason}")]
    DegenerateGeometry { template: String, volume: String, reason: String },
    #[error("no legal position found on level {level}")]
    NoLegalPosition { level: i32 },
    #[error("catalog has no {module_type:?} end-cap template")]
    MissingEndCap { module_type: ModuleType },
    #[error("catalog has more than one {module_type:?} end-cap template")]
    DuplicateEndCap { module_type: ModuleType },
    #[error("catalog document parse error: {0}")]
    CatalogParse(#[source] serde_json::Error),
    #[error("layout document parse error: {0}")]
    LayoutParse(#[source] serde_json::Error),
}

impl From<MutationRefusal> for HullError {
    fn from(refusal: MutationRefusal) -> Self {
        Self::InvalidMutation(refusal)
    }
}

impl HullError {
    /// Recoverable errors are handled locally (toast or spawn fallback);
    /// everything else indicates corrupt catalog data.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::InvalidMutation(_) | Self::NoLegalPosition { .. })
    }

    pub fn refusal(&self) -> Option<&MutationRefusal> {
        match self {
            Self::InvalidMutation(r) => Some(r),
            _ => None,
        }
    }
}

pub type HullResult<T> = Result<T, HullError>;

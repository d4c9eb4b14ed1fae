//! Scripted input. A script is a list of `[[step]]` tables, each expanding
//! into one or more frames of input.

use std::path::Path;

use anyhow::{Context, Result};
use hull::{Direction, FrameInput, Mutation};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ScriptStep {
    Walk {
        #[serde(default = "one")]
        forward: f32,
        #[serde(default)]
        strafe: f32,
        seconds: f32,
    },
    /// Turn by the given angles, in degrees, in a single frame.
    Look {
        #[serde(default)]
        yaw_deg: f32,
        #[serde(default)]
        pitch_deg: f32,
    },
    Climb { seconds: f32 },
    Detach,
    Insert { join_index: usize, template_id: String, level: i32 },
    Remove { index: usize, level: i32 },
    AddLevel { direction: Direction, index: usize, level: i32 },
    RemoveLevel { direction: Direction, index: usize, level: i32 },
    Wait { seconds: f32 },
}

fn one() -> f32 {
    1.0
}

fn frames_for(seconds: f32, frame_hz: f32) -> usize {
    (seconds * frame_hz).round().max(1.0) as usize
}

impl ScriptStep {
    pub fn is_mutation(&self) -> bool {
        self.mutation().is_some()
    }

    fn mutation(&self) -> Option<Mutation> {
        Some(match self.clone() {
            ScriptStep::Insert { join_index, template_id, level } => {
                Mutation::Insert { join_index, template_id, level }
            }
            ScriptStep::Remove { index, level } => Mutation::Remove { index, level },
            ScriptStep::AddLevel { direction, index, level } => Mutation::AddLevel { direction, index, level },
            ScriptStep::RemoveLevel { direction, index, level } => {
                Mutation::RemoveLevel { direction, index, level }
            }
            _ => return None,
        })
    }

    /// Frame inputs this step expands to at `frame_hz`.
    pub fn inputs(&self, frame_hz: f32) -> Vec<FrameInput> {
        if let Some(mutation) = self.mutation() {
            return vec![FrameInput { mutation: Some(mutation), ..Default::default() }];
        }
        match self {
            ScriptStep::Walk { forward, strafe, seconds } => {
                let input = FrameInput { forward: *forward, strafe: *strafe, ..Default::default() };
                vec![input; frames_for(*seconds, frame_hz)]
            }
            ScriptStep::Look { yaw_deg, pitch_deg } => vec![FrameInput {
                yaw_delta: yaw_deg.to_radians(),
                pitch_delta: pitch_deg.to_radians(),
                ..Default::default()
            }],
            ScriptStep::Climb { seconds } => {
                vec![FrameInput { forward: 1.0, ..Default::default() }; frames_for(*seconds, frame_hz)]
            }
            ScriptStep::Detach => vec![FrameInput { detach: true, ..Default::default() }],
            ScriptStep::Wait { seconds } => vec![FrameInput::default(); frames_for(*seconds, frame_hz)],
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<ScriptStep>,
}

impl Script {
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("parsing script")
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("in {}", path.display()))
    }
}

use std::path::Path;

use anyhow::{Context, Result};
use hull::{AgentState, Catalog, FrameInput, FrameOutcome, PersistedLayout, World};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::Config;
use crate::script::Script;

/// What a finished session reports on stdout.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub frames_run: u64,
    pub mutations_applied: u32,
    pub mutations_refused: u32,
    pub toasts: Vec<String>,
    pub anchor_level: i32,
    pub agent: AgentState,
    pub layout: PersistedLayout,
}

/// A world driven frame by frame, standing in for the interactive client.
pub struct Session {
    world: World,
    frame_hz: f32,
    dt: f32,
    frames_run: u64,
    mutations_applied: u32,
    mutations_refused: u32,
    toasts: Vec<String>,
}

impl Session {
    pub fn new(cfg: &Config, layout: Option<&PersistedLayout>) -> Result<Self> {
        let catalog = Catalog::standard().context("building module catalog")?;
        let world = match layout {
            Some(layout) => World::from_layout(catalog, cfg.hull.clone(), layout),
            None => World::new(catalog, cfg.hull.clone()),
        }
        .context("assembling hull")?;
        info!(
            modules = world.plan().module_count(),
            levels = world.plan().levels.len(),
            "session started"
        );
        Ok(Self {
            world,
            frame_hz: cfg.session.frame_hz,
            dt: cfg.session.dt(),
            frames_run: 0,
            mutations_applied: 0,
            mutations_refused: 0,
            toasts: Vec::new(),
        })
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn frames_run(&self) -> u64 {
        self.frames_run
    }

    pub fn step(&mut self, input: &FrameInput) -> Result<FrameOutcome> {
        let outcome = self
            .world
            .step_frame(input, self.dt)
            .with_context(|| format!("frame {}", self.frames_run))?;
        self.frames_run += 1;

        if let Some(report) = &outcome.report {
            self.mutations_applied += 1;
            info!(toast = %report.toast, recovery = ?report.recovery, "layout changed");
            self.toasts.push(report.toast.clone());
        }
        if let Some(refusal) = &outcome.refusal {
            self.mutations_refused += 1;
            info!(toast = %refusal, "edit refused");
            self.toasts.push(refusal.to_string());
        }
        Ok(outcome)
    }

    pub fn run_script(&mut self, script: &Script) -> Result<()> {
        for (i, step) in script.steps.iter().enumerate() {
            debug!(step = i, ?step, "script step");
            for input in step.inputs(self.frame_hz) {
                self.step(&input)?;
            }
        }
        Ok(())
    }

    pub fn idle(&mut self, frames: u32) -> Result<()> {
        let input = FrameInput::default();
        for _ in 0..frames {
            self.step(&input)?;
        }
        Ok(())
    }

    pub fn save_layout(&self, path: &Path) -> Result<()> {
        let json = self.world.layout().to_json_pretty()?;
        std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "layout saved");
        Ok(())
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            frames_run: self.frames_run,
            mutations_applied: self.mutations_applied,
            mutations_refused: self.mutations_refused,
            toasts: self.toasts.clone(),
            anchor_level: self.world.anchor_level(),
            agent: self.world.agent().clone(),
            layout: self.world.layout(),
        }
    }
}

pub fn load_layout(path: &Path) -> Result<PersistedLayout> {
    let text = std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    PersistedLayout::from_json(&text).with_context(|| format!("in {}", path.display()))
}

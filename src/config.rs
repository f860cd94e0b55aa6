//! Run configuration, defaults and interactive prompts

use crate::choices::{get_batch, TracerSpeed, ViewMode};
use crate::utils::geometry::Point;
use crate::walk::{RandomWalk, Walker};
use anyhow::{anyhow, ensure, Context};
use std::path::PathBuf;

pub const DEFAULT_STEP: f64 = 10.0;
pub const DEFAULT_DESTINATION: Point = Point::new(100.0, 100.0);
pub const DEFAULT_BATCH: usize = 100;
pub const DEFAULT_MAX_STEPS: u64 = 50_000_000;
pub const DEFAULT_OUTPUT: &str = "randomwalk.png";
pub const DEFAULT_CANVAS_SIZE: u32 = 800;
pub const DEFAULT_MAX_FRAMES: usize = 500;

/// How (and whether) the walk gets drawn
#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    /// Where the finished drawing is saved
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Pixels per world unit in [`ViewMode::Fixed`]
    pub scale: f64,
    pub view: ViewMode,
    /// Steps between canvas refreshes, 0 to draw only at the end
    pub batch: usize,
    /// Directory receiving a numbered PNG per refresh
    pub frames: Option<PathBuf>,
    pub max_frames: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        RenderConfig {
            output: PathBuf::from(DEFAULT_OUTPUT),
            width: DEFAULT_CANVAS_SIZE,
            height: DEFAULT_CANVAS_SIZE,
            scale: 1.0,
            view: ViewMode::Fixed,
            batch: DEFAULT_BATCH,
            frames: None,
            max_frames: DEFAULT_MAX_FRAMES,
        }
    }
}

/// Everything needed for one run of the program
#[derive(Debug, Clone, PartialEq)]
pub struct WalkConfig {
    pub step: f64,
    pub destination: Point,
    pub max_steps: Option<u64>,
    pub seed: Option<u64>,
    /// `None` skips drawing entirely
    pub render: Option<RenderConfig>,
    /// Run this many headless walks instead of a single drawn one
    pub trials: Option<usize>,
}

impl Default for WalkConfig {
    fn default() -> Self {
        WalkConfig {
            step: DEFAULT_STEP,
            destination: DEFAULT_DESTINATION,
            max_steps: Some(DEFAULT_MAX_STEPS),
            seed: None,
            render: Some(RenderConfig::default()),
            trials: None,
        }
    }
}

impl WalkConfig {
    pub fn walk(&self) -> RandomWalk {
        RandomWalk::new(self.destination).with_max_steps(self.max_steps)
    }

    /// Checks every precondition up front so a bad run fails before it starts
    pub fn validate(&self) -> anyhow::Result<()> {
        Walker::new(self.step)?;
        self.walk().target(self.step)?;

        if let Some(trials) = self.trials {
            ensure!(trials > 0, "number of trials must be at least 1");
        }

        if let Some(render) = &self.render {
            ensure!(
                render.width > 0 && render.height > 0,
                "canvas must be at least 1x1 pixels, got {}x{}",
                render.width,
                render.height
            );
            ensure!(
                render.scale.is_finite() && render.scale > 0.0,
                "scale must be a finite number greater than zero, got {}",
                render.scale
            );
        }

        Ok(())
    }

    /// Asks the user for the walk parameters, keeping current values as defaults
    pub fn prompt(&mut self) -> anyhow::Result<()> {
        self.step = prompt_f64("How far should the walker move per step?", self.step)?;
        let x = prompt_f64("X coordinate of the destination", self.destination.x)?;
        let y = prompt_f64("Y coordinate of the destination", self.destination.y)?;
        self.destination = Point::new(x, y);

        if let Some(render) = self.render.as_mut() {
            let speed = TracerSpeed::choice("How often should the drawing refresh?")
                .map_err(|err| anyhow!("failed to read tracer speed: {err:?}"))?;
            render.batch = get_batch(speed);
            render.view = ViewMode::choice("How should the path be framed?")
                .map_err(|err| anyhow!("failed to read view mode: {err:?}"))?;
        }

        Ok(())
    }
}

fn prompt_f64(message: &str, default: f64) -> anyhow::Result<f64> {
    inquire::CustomType::<f64>::new(message)
        .with_default(default)
        .prompt()
        .with_context(|| format!("failed to read answer to {message:?}"))
}

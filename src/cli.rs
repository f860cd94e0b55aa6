//! Command line interface

use crate::choices::{get_batch, TracerSpeed, ViewMode};
use crate::config::{
    RenderConfig, WalkConfig, DEFAULT_BATCH, DEFAULT_CANVAS_SIZE, DEFAULT_DESTINATION,
    DEFAULT_MAX_FRAMES, DEFAULT_MAX_STEPS, DEFAULT_OUTPUT, DEFAULT_STEP,
};
use crate::utils::geometry::Point;
use clap::Parser;
use std::path::PathBuf;

/// Walk randomly across a lattice until the destination is hit, then report
/// the distance traveled and the straight-line distance to the destination.
#[derive(Parser, Debug)]
#[command(name = "walkrs", version, about, long_about = None)]
pub struct Cli {
    /// Distance moved per step
    #[arg(long, default_value_t = DEFAULT_STEP)]
    pub step: f64,

    /// Destination as `X,Y` (defaults to 100,100)
    #[arg(long, value_name = "X,Y", value_parser = parse_point, allow_hyphen_values = true)]
    pub dest: Option<Point>,

    /// Steps between canvas refreshes, 0 to draw only at the end
    #[arg(long, conflicts_with = "speed")]
    pub batch: Option<usize>,

    /// Preset refresh rate
    #[arg(long, value_enum)]
    pub speed: Option<TracerSpeed>,

    /// How the path is framed on the canvas
    #[arg(long, value_enum, default_value_t = ViewMode::Fixed)]
    pub view: ViewMode,

    /// Give up after this many steps
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,

    /// Never give up (may run forever)
    #[arg(long)]
    pub unbounded: bool,

    /// Seed for the random number generator
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to save the drawing
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    pub output: PathBuf,

    /// Skip drawing, only print the result
    #[arg(long)]
    pub no_draw: bool,

    /// Save a numbered PNG frame into this directory on every refresh
    #[arg(long, value_name = "DIR")]
    pub frames: Option<PathBuf>,

    /// Stop writing frames after this many
    #[arg(long, default_value_t = DEFAULT_MAX_FRAMES)]
    pub max_frames: usize,

    /// Canvas width in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub width: u32,

    /// Canvas height in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub height: u32,

    /// Pixels per world unit in the fixed view
    #[arg(long, default_value_t = 1.0)]
    pub scale: f64,

    /// Run this many headless walks in parallel and summarize them
    #[arg(long, value_name = "N")]
    pub trials: Option<usize>,

    /// Ask for the walk parameters interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn into_config(self) -> WalkConfig {
        let batch = match (self.batch, self.speed) {
            (Some(batch), _) => batch,
            (None, Some(speed)) => get_batch(speed),
            (None, None) => DEFAULT_BATCH,
        };

        let render = (!self.no_draw && self.trials.is_none()).then(|| RenderConfig {
            output: self.output,
            width: self.width,
            height: self.height,
            scale: self.scale,
            view: self.view,
            batch,
            frames: self.frames,
            max_frames: self.max_frames,
        });

        WalkConfig {
            step: self.step,
            destination: self.dest.unwrap_or(DEFAULT_DESTINATION),
            max_steps: (!self.unbounded).then_some(self.max_steps),
            seed: self.seed,
            render,
            trials: self.trials,
        }
    }
}

/// Parses `X,Y` into a point
pub fn parse_point(raw: &str) -> Result<Point, String> {
    let (x, y) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got {raw:?}"))?;
    let x = x
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid X coordinate {x:?}: {err}"))?;
    let y = y
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("invalid Y coordinate {y:?}: {err}"))?;
    Ok(Point::new(x, y))
}

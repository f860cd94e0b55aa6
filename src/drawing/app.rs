use crate::choices::ViewMode;
use crate::config::{RenderConfig, WalkConfig};
use crate::drawing::bounds::Bounds;
use crate::drawing::canvas::{Canvas, Viewport};
use crate::drawing::tracer::Tracer;
use crate::walk::{run_trials, NoopObserver, TrialSummary, WalkOutcome, Walker};
use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// What a run produced
#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Walk {
        outcome: WalkOutcome,
        /// Where the drawing was saved, if one was made
        drawing: Option<PathBuf>,
    },
    Trials(TrialSummary),
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Report::Walk { outcome, .. } => write!(f, "{outcome}"),
            Report::Trials(summary) => write!(f, "{summary}"),
        }
    }
}

pub struct WalkApp {
    config: WalkConfig,
    show_progress: bool,
}

impl WalkApp {
    pub fn new(config: WalkConfig) -> Self {
        WalkApp {
            config,
            show_progress: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Runs the configured walk and prints the result
    pub fn run(config: WalkConfig) -> anyhow::Result<()> {
        let report = WalkApp::new(config).execute()?;
        if let Report::Walk {
            drawing: Some(path),
            ..
        } = &report
        {
            info!(path = %path.display(), "drawing saved");
        }
        println!("{report}");
        Ok(())
    }

    pub fn execute(&self) -> anyhow::Result<Report> {
        self.config.validate()?;

        let seed = self.config.seed.unwrap_or_else(|| rand::rng().random());
        info!(
            step = self.config.step,
            destination = %self.config.destination,
            seed,
            "starting random walk"
        );

        if let Some(trials) = self.config.trials {
            let summary = run_trials(
                self.config.step,
                self.config.walk(),
                trials,
                seed,
                self.show_progress,
            )?;
            return Ok(Report::Trials(summary));
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let mut walker = Walker::new(self.config.step)?;
        let walk = self.config.walk();

        let Some(render) = &self.config.render else {
            let outcome = walk.run(&mut walker, &mut rng, &mut NoopObserver)?;
            return Ok(Report::Walk {
                outcome,
                drawing: None,
            });
        };

        let viewport = match render.view {
            ViewMode::Fixed => Viewport::centered(render.width, render.height, render.scale),
            // Walk once to measure, then retrace the same path from the same seed.
            ViewMode::Fit => {
                Bounds::scout(&walk, self.config.step, seed, render.width, render.height)?
            }
        };

        let mut tracer =
            Tracer::new(render, viewport, self.config.destination, self.spinner())?;
        let result = walk.run(&mut walker, &mut rng, &mut tracer);
        let frames = tracer.frames_written();
        let canvas = tracer.into_canvas()?;

        // The partial drawing is still worth keeping when the walk gave up.
        Self::save(&canvas, render)?;
        if frames > 0 {
            info!(frames, "frames written");
        }

        let outcome = result?;
        Ok(Report::Walk {
            outcome,
            drawing: Some(render.output.clone()),
        })
    }

    fn save(canvas: &Canvas, render: &RenderConfig) -> anyhow::Result<()> {
        if let Some(parent) = render.output.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create output directory {}", parent.display())
                })?;
            }
        }
        canvas.save(&render.output)
    }

    fn spinner(&self) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        pb.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner} walking: {msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

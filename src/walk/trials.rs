use crate::error::WalkError;
use crate::utils::geometry::Point;
use crate::walk::runner::{NoopObserver, RandomWalk, WalkOutcome};
use crate::walk::walker::Walker;
use indicatif::{ParallelProgressIterator, ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::fmt;
use tracing::info;

/// Aggregate statistics over many independent walks
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSummary {
    pub trials: u64,
    pub completed: u64,
    pub exceeded: u64,
    pub mean_steps: f64,
    pub min_steps: Option<u64>,
    pub max_steps: Option<u64>,
    pub step: f64,
    pub displacement: f64,
}

impl TrialSummary {
    fn from_outcomes(
        trials: u64,
        step: f64,
        destination: Point,
        outcomes: &[WalkOutcome],
    ) -> Self {
        let completed = outcomes.len() as u64;
        let total: u128 = outcomes.iter().map(|o| u128::from(o.steps)).sum();

        TrialSummary {
            trials,
            completed,
            exceeded: trials - completed,
            mean_steps: if completed == 0 {
                0.0
            } else {
                total as f64 / completed as f64
            },
            min_steps: outcomes.iter().map(|o| o.steps).min(),
            max_steps: outcomes.iter().map(|o| o.steps).max(),
            step,
            displacement: destination.norm(),
        }
    }

    /// Mean path length of the walks that reached the destination
    pub fn mean_distance(&self) -> f64 {
        self.mean_steps * self.step
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{}/{} walks reached the destination ({} hit the step limit)",
            self.completed, self.trials, self.exceeded
        )?;
        match (self.min_steps, self.max_steps) {
            (Some(min), Some(max)) => writeln!(
                f,
                "steps: mean {:.1}, min {}, max {}",
                self.mean_steps, min, max
            )?,
            _ => writeln!(f, "steps: none completed")?,
        }
        write!(f, "({}, {})", self.mean_distance(), self.displacement)
    }
}

/// Runs `trials` independent walks in parallel.
///
/// Trial `i` draws from a `StdRng` seeded with `seed + i`, so a summary is
/// reproducible for a given seed regardless of thread scheduling.
pub fn run_trials(
    step: f64,
    walk: RandomWalk,
    trials: usize,
    seed: u64,
    show_progress: bool,
) -> Result<TrialSummary, WalkError> {
    // Surface bad parameters once instead of from every worker.
    Walker::new(step)?;
    walk.target(step)?;

    let pb = if show_progress {
        let progress_style = ProgressStyle::default_bar()
            .template("{wide_bar} {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>=");
        let pb = ProgressBar::new(trials as u64);
        pb.set_style(progress_style);
        pb
    } else {
        ProgressBar::hidden()
    };

    let results: Vec<Result<WalkOutcome, WalkError>> = (0..trials)
        .into_par_iter()
        .progress_with(pb.clone())
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            let mut walker = Walker::new(step)?;
            walk.run(&mut walker, &mut rng, &mut NoopObserver)
        })
        .collect();
    pb.finish_and_clear();

    let mut outcomes = Vec::with_capacity(results.len());
    for result in results {
        match result {
            Ok(outcome) => outcomes.push(outcome),
            Err(WalkError::StepLimitExceeded { .. }) => {}
            Err(other) => return Err(other),
        }
    }

    let summary =
        TrialSummary::from_outcomes(trials as u64, step, walk.destination, &outcomes);
    info!(
        trials,
        completed = summary.completed,
        mean_steps = summary.mean_steps,
        "trials finished"
    );
    Ok(summary)
}

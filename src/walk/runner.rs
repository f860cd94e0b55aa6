use crate::error::WalkError;
use crate::utils::geometry::{LatticePoint, Point};
use crate::walk::walker::Walker;
use rand::Rng;
use std::fmt;
use tracing::debug;

/// Receives every move of a walk as it happens
pub trait WalkObserver {
    /// Called after each step with the positions before and after the move
    /// and the number of steps taken so far
    fn on_step(&mut self, from: Point, to: Point, steps: u64);

    /// Called once when the walk ends, whether or not it reached the destination
    fn finish(&mut self, _position: Point) {}
}

/// An observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl WalkObserver for NoopObserver {
    fn on_step(&mut self, _from: Point, _to: Point, _steps: u64) {}
}

impl<F> WalkObserver for F
where
    F: FnMut(Point, Point, u64),
{
    fn on_step(&mut self, from: Point, to: Point, steps: u64) {
        self(from, to, steps)
    }
}

/// Result of a completed walk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkOutcome {
    /// Number of moves taken
    pub steps: u64,
    /// Total path length, `steps * step`
    pub distance: f64,
    /// Straight-line distance from the origin to the destination
    pub displacement: f64,
}

impl WalkOutcome {
    pub fn new(steps: u64, step: f64, destination: Point) -> Self {
        WalkOutcome {
            steps,
            distance: steps as f64 * step,
            displacement: destination.norm(),
        }
    }
}

impl fmt::Display for WalkOutcome {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.distance, self.displacement)
    }
}

/// A walk towards a fixed destination, optionally bounded in length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomWalk {
    pub destination: Point,
    pub max_steps: Option<u64>,
}

impl RandomWalk {
    pub fn new(destination: Point) -> Self {
        RandomWalk {
            destination,
            max_steps: None,
        }
    }

    pub fn with_max_steps(mut self, max_steps: Option<u64>) -> Self {
        self.max_steps = max_steps;
        self
    }

    /// Lattice coordinates of the destination for the given step size
    pub fn target(&self, step: f64) -> Result<LatticePoint, WalkError> {
        LatticePoint::from_point(self.destination, step).ok_or(
            WalkError::UnreachableDestination {
                destination: self.destination,
                step,
            },
        )
    }

    /// Steps `walker` until it stands on the destination.
    ///
    /// Fails before taking any step when the destination is off the walker's
    /// lattice, and after exactly `max_steps` moves if a bound is set.
    pub fn run<R, O>(
        &self,
        walker: &mut Walker,
        rng: &mut R,
        observer: &mut O,
    ) -> Result<WalkOutcome, WalkError>
    where
        R: Rng + ?Sized,
        O: WalkObserver + ?Sized,
    {
        let target = self.target(walker.step())?;
        debug!(
            destination = %self.destination,
            step = walker.step(),
            lattice_distance = walker.lattice().manhattan(&target),
            max_steps = ?self.max_steps,
            "starting walk"
        );

        let mut steps = 0u64;
        while walker.lattice() != target {
            if self.max_steps.is_some_and(|limit| steps >= limit) {
                let position = walker.position();
                observer.finish(position);
                debug!(steps, %position, "step limit reached");
                return Err(WalkError::StepLimitExceeded {
                    limit: steps,
                    position,
                    destination: self.destination,
                });
            }

            let from = walker.position();
            let to = walker.take_a_step(rng);
            steps += 1;
            observer.on_step(from, to, steps);
        }

        observer.finish(walker.position());
        let outcome = WalkOutcome::new(steps, walker.step(), self.destination);
        debug!(steps, distance = outcome.distance, "walk reached destination");
        Ok(outcome)
    }
}

/// Walks a fresh walker from the origin to `destination`
pub fn random_walk<R: Rng + ?Sized>(
    step: f64,
    destination: Point,
    rng: &mut R,
) -> Result<WalkOutcome, WalkError> {
    let mut walker = Walker::new(step)?;
    RandomWalk::new(destination).run(&mut walker, rng, &mut NoopObserver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn origin_destination_finishes_immediately() {
        let mut rng = StdRng::seed_from_u64(1);
        let outcome = random_walk(10.0, Point::ORIGIN, &mut rng).unwrap();
        assert_eq!(outcome.steps, 0);
        assert_eq!(outcome.distance, 0.0);
        assert_eq!(outcome.displacement, 0.0);
        assert_eq!(outcome.to_string(), "(0, 0)");
    }

    #[test]
    fn unreachable_destination_is_rejected_before_stepping() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut walker = Walker::new(10.0).unwrap();
        let mut calls = 0;
        let mut count = |_: Point, _: Point, _: u64| calls += 1;

        let err = RandomWalk::new(Point::new(105.0, 100.0))
            .run(&mut walker, &mut rng, &mut count)
            .unwrap_err();

        assert!(matches!(err, WalkError::UnreachableDestination { .. }));
        assert_eq!(calls, 0);
        assert_eq!(walker.position(), Point::ORIGIN);
    }

    #[test]
    fn step_limit_is_exact() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut walker = Walker::new(1.0).unwrap();
        let mut seen = 0u64;
        let mut count = |_: Point, _: Point, steps: u64| seen = steps;

        // Far enough away that 25 moves can never arrive.
        let err = RandomWalk::new(Point::new(100.0, 0.0))
            .with_max_steps(Some(25))
            .run(&mut walker, &mut rng, &mut count)
            .unwrap_err();

        assert_eq!(seen, 25);
        match err {
            WalkError::StepLimitExceeded { limit, position, .. } => {
                assert_eq!(limit, 25);
                assert_eq!(position, walker.position());
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn observer_sees_every_connected_move() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut walker = Walker::new(10.0).unwrap();
        let mut path = vec![Point::ORIGIN];
        let mut record = |from: Point, to: Point, steps: u64| {
            assert_eq!(Some(&from), path.last());
            assert_eq!(steps as usize, path.len());
            path.push(to);
        };

        let result = RandomWalk::new(Point::new(20.0, 0.0))
            .with_max_steps(Some(10_000))
            .run(&mut walker, &mut rng, &mut record);

        assert_eq!(path.last(), Some(&walker.position()));
        if let Ok(outcome) = result {
            assert_eq!(outcome.steps as usize, path.len() - 1);
            assert_eq!(walker.position(), Point::new(20.0, 0.0));
        }
    }

    #[test]
    fn outcome_prints_as_tuple() {
        let outcome = WalkOutcome::new(278, 10.0, Point::new(100.0, 100.0));
        assert_eq!(outcome.to_string(), "(2780, 141.4213562373095)");
    }
}

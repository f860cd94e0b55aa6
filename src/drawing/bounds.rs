use crate::drawing::canvas::Viewport;
use crate::error::WalkError;
use crate::utils::geometry::Point;
use crate::walk::{RandomWalk, WalkObserver, Walker};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::debug;

/// Tracks the bounding box of a walk without keeping the path
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds {
            min: Point::ORIGIN,
            max: Point::ORIGIN,
        }
    }
}

impl Bounds {
    pub fn include(&mut self, p: Point) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    pub fn corners(&self) -> [Point; 2] {
        [self.min, self.max]
    }

    /// Replays the walk seeded with `seed` and frames everything it visits.
    ///
    /// The same seed fed to [`RandomWalk::run`] afterwards retraces the exact
    /// path, so the returned viewport fits the drawing pass.
    pub fn scout(
        walk: &RandomWalk,
        step: f64,
        seed: u64,
        width: u32,
        height: u32,
    ) -> Result<Viewport, WalkError> {
        let mut bounds = Bounds::default();
        bounds.include(walk.destination);

        let mut rng = StdRng::seed_from_u64(seed);
        let mut walker = Walker::new(step)?;
        match walk.run(&mut walker, &mut rng, &mut bounds) {
            Ok(_) | Err(WalkError::StepLimitExceeded { .. }) => {}
            Err(err) => return Err(err),
        }

        debug!(min = %bounds.min, max = %bounds.max, "scouted walk extent");
        Ok(Viewport::fit(bounds.corners(), width, height))
    }
}

impl WalkObserver for Bounds {
    fn on_step(&mut self, _from: Point, to: Point, _steps: u64) {
        self.include(to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_the_origin_and_grows() {
        let mut bounds = Bounds::default();
        bounds.include(Point::new(-5.0, 2.0));
        bounds.include(Point::new(3.0, 7.0));
        assert_eq!(bounds.min, Point::new(-5.0, 0.0));
        assert_eq!(bounds.max, Point::new(3.0, 7.0));
    }

    #[test]
    fn scouted_viewport_holds_the_replayed_path() {
        let walk = RandomWalk::new(Point::new(30.0, 0.0)).with_max_steps(Some(2_000));
        let viewport = Bounds::scout(&walk, 10.0, 17, 200, 150).unwrap();

        let mut rng = StdRng::seed_from_u64(17);
        let mut walker = Walker::new(10.0).unwrap();
        let mut check = |_: Point, to: Point, _: u64| {
            let (x, y) = viewport.to_pixel(to);
            assert!((0.0..=200.0).contains(&x), "{to} -> x {x}");
            assert!((0.0..=150.0).contains(&y), "{to} -> y {y}");
        };
        let _ = walk.run(&mut walker, &mut rng, &mut check);
    }

    #[test]
    fn scouting_rejects_unreachable_destinations() {
        let walk = RandomWalk::new(Point::new(5.0, 0.0));
        assert!(matches!(
            Bounds::scout(&walk, 10.0, 0, 100, 100),
            Err(WalkError::UnreachableDestination { .. })
        ));
    }
}

use crate::error::WalkError;
use crate::utils::geometry::{LatticePoint, Point};
use crate::walk::direction;
use rand::Rng;

/// A walker moving a fixed distance per step along the lattice
#[derive(Debug, Clone, PartialEq)]
pub struct Walker {
    step: f64,
    lattice: LatticePoint,
}

impl Walker {
    /// Creates a walker at the origin
    pub fn new(step: f64) -> Result<Self, WalkError> {
        if !step.is_finite() || step <= 0.0 {
            return Err(WalkError::InvalidStep { step });
        }

        Ok(Walker {
            step,
            lattice: LatticePoint::ORIGIN,
        })
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn lattice(&self) -> LatticePoint {
        self.lattice
    }

    /// Current position in world coordinates
    pub fn position(&self) -> Point {
        self.lattice.to_point(self.step)
    }

    /// Moves one step in a random direction and returns the new position
    pub fn take_a_step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Point {
        self.lattice = direction::next_position(self.lattice, rng);
        self.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_bad_step_sizes() {
        for step in [0.0, -10.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                Walker::new(step),
                Err(WalkError::InvalidStep { .. })
            ));
        }
    }

    #[test]
    fn starts_at_origin() {
        let walker = Walker::new(10.0).unwrap();
        assert_eq!(walker.position(), Point::ORIGIN);
        assert_eq!(walker.step(), 10.0);
    }

    #[test]
    fn each_step_moves_exactly_one_axis() {
        let mut walker = Walker::new(10.0).unwrap();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..500 {
            let before = walker.position();
            let after = walker.take_a_step(&mut rng);
            let dx = (after.x - before.x).abs();
            let dy = (after.y - before.y).abs();
            assert!(
                (dx == 10.0 && dy == 0.0) || (dx == 0.0 && dy == 10.0),
                "moved from {before} to {after}"
            );
        }
    }
}

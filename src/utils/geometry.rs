use std::fmt;

/// A position in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance from the origin
    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A position counted in whole steps along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LatticePoint {
    pub x: i64,
    pub y: i64,
}

impl LatticePoint {
    pub const ORIGIN: LatticePoint = LatticePoint { x: 0, y: 0 };

    pub const fn new(x: i64, y: i64) -> Self {
        LatticePoint { x, y }
    }

    /// Number of lattice steps needed to get from `self` to `other`
    pub fn manhattan(&self, other: &LatticePoint) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Scales lattice counts back into world coordinates
    pub fn to_point(self, step: f64) -> Point {
        Point::new(self.x as f64 * step, self.y as f64 * step)
    }

    /// Snaps a world coordinate onto the lattice of the given step size.
    ///
    /// Returns `None` when either axis is not a whole multiple of `step`
    /// (within 1e-9 of a step) or is out of range.
    pub fn from_point(point: Point, step: f64) -> Option<Self> {
        Some(LatticePoint::new(
            snap_axis(point.x, step)?,
            snap_axis(point.y, step)?,
        ))
    }
}

const SNAP_TOLERANCE: f64 = 1e-9;

fn snap_axis(value: f64, step: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }

    let steps = value / step;
    let count = steps.round();
    if count.abs() >= i64::MAX as f64 {
        return None;
    }

    // Measured in steps so a large coordinate cannot widen the tolerance.
    if (steps - count).abs() <= SNAP_TOLERANCE {
        Some(count as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn norm_matches_hypotenuse() {
        assert_eq!(Point::new(3.0, 4.0).norm(), 5.0);
        assert_eq!(Point::ORIGIN.norm(), 0.0);
    }

    #[test]
    fn snaps_whole_multiples() {
        assert_eq!(
            LatticePoint::from_point(Point::new(100.0, -30.0), 10.0),
            Some(LatticePoint::new(10, -3))
        );
    }

    #[test]
    fn tolerates_decimal_steps() {
        assert_eq!(
            LatticePoint::from_point(Point::new(0.3, 0.7), 0.1),
            Some(LatticePoint::new(3, 7))
        );
    }

    #[test]
    fn rejects_points_between_lattice_lines() {
        assert_eq!(LatticePoint::from_point(Point::new(15.0, 0.0), 10.0), None);
        assert_eq!(LatticePoint::from_point(Point::new(f64::NAN, 0.0), 10.0), None);
        assert_eq!(
            LatticePoint::from_point(Point::new(0.0, f64::INFINITY), 10.0),
            None
        );
    }

    #[test]
    fn large_coordinates_do_not_widen_the_tolerance() {
        assert_eq!(LatticePoint::from_point(Point::new(1e10 + 0.5, 0.0), 1.0), None);
        assert_eq!(
            LatticePoint::from_point(Point::new(1e10, -3.0), 1.0),
            Some(LatticePoint::new(10_000_000_000, -3))
        );
    }

    #[test]
    fn manhattan_counts_axis_steps() {
        let a = LatticePoint::new(-2, 3);
        let b = LatticePoint::new(4, -1);
        assert_eq!(a.manhattan(&b), 10);
        assert_eq!(b.manhattan(&a), 10);
    }
}

use crate::utils::geometry::LatticePoint;
use rand::Rng;

/// One of the four axis-aligned moves a walker can make
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// Picks a direction uniformly at random
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Lattice offset of a single move
    pub const fn offset(self) -> (i64, i64) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
        }
    }

    /// Applies this move to a lattice position
    pub fn apply(self, from: LatticePoint) -> LatticePoint {
        let (dx, dy) = self.offset();
        LatticePoint::new(from.x + dx, from.y + dy)
    }
}

/// The step rule: the position one random move away from `from`
pub fn next_position<R: Rng + ?Sized>(from: LatticePoint, rng: &mut R) -> LatticePoint {
    Direction::random(rng).apply(from)
}

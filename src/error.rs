//! Errors raised by the walk core

use crate::utils::geometry::Point;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum WalkError {
    /// Step sizes must be finite and strictly positive
    #[error("invalid step size {step}: must be a finite number greater than zero")]
    InvalidStep { step: f64 },

    /// The destination does not lie on the lattice reachable from the origin
    #[error("destination {destination} is not reachable with step size {step}")]
    UnreachableDestination { destination: Point, step: f64 },

    #[error("gave up after {limit} steps at {position} without reaching {destination}")]
    StepLimitExceeded {
        limit: u64,
        position: Point,
        destination: Point,
    },
}

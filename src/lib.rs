//! A 2D lattice random walker that draws its path
//!
//! The walk core ([`walk`]) is independent of rendering: the step rule takes
//! an explicit random source and the walk loop reports each move to a
//! [`walk::WalkObserver`]. [`drawing::Tracer`] is the observer that turns a
//! walk into a picture.

pub mod choices;
pub mod cli;
pub mod config;
pub mod drawing;
pub mod error;
pub mod telemetry;
pub mod utils;
pub mod walk;

//! The random walk itself: step rule, walker, walk loop and batch trials

pub use self::direction::Direction;
pub use self::runner::{random_walk, NoopObserver, RandomWalk, WalkObserver, WalkOutcome};
pub use self::trials::{run_trials, TrialSummary};
pub use self::walker::Walker;

pub mod direction;
pub mod runner;
pub mod trials;
pub mod walker;

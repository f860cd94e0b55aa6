//! Rendering a walk onto a raster canvas

pub use self::app::{Report, WalkApp};
pub use self::bounds::Bounds;
pub use self::canvas::{Canvas, Viewport};
pub use self::tracer::Tracer;

pub mod app;
pub mod bounds;
pub mod canvas;
pub mod tracer;

use crate::utils::geometry::Point;
use anyhow::Context;
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut, draw_line_segment_mut};
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([255, 255, 255]);
const PATH: Rgb<u8> = Rgb([0, 0, 0]);
const ORIGIN: Rgb<u8> = Rgb([0, 160, 0]);
const DESTINATION: Rgb<u8> = Rgb([220, 0, 0]);
const WALKER: Rgb<u8> = Rgb([0, 0, 220]);

const MARKER_RADIUS: i32 = 5;
const FIT_MARGIN: f64 = 20.0;

/// Maps world coordinates (y up) onto pixel coordinates (y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Pixel position of the world origin
    pub origin_x: f64,
    pub origin_y: f64,
    /// Pixels per world unit
    pub scale: f64,
}

impl Viewport {
    /// World origin in the middle of the canvas
    pub fn centered(width: u32, height: u32, scale: f64) -> Self {
        Viewport {
            origin_x: f64::from(width) / 2.0,
            origin_y: f64::from(height) / 2.0,
            scale,
        }
    }

    /// Largest viewport that shows every point with a small margin
    ///
    /// # Arguments
    /// * `points` - World positions that must end up on the canvas
    /// * `width` / `height` - Canvas size in pixels
    ///
    /// # Returns
    /// A viewport centered on the bounding box of `points`. A degenerate box
    /// (a single point or a straight line) keeps a scale of 1 along the
    /// collapsed axis.
    pub fn fit<I>(points: I, width: u32, height: u32) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut min = Point::new(f64::INFINITY, f64::INFINITY);
        let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);

        for p in points {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }

        if !min.x.is_finite() {
            return Self::centered(width, height, 1.0);
        }

        let margin = FIT_MARGIN.min(f64::from(width.min(height)) / 4.0);
        let usable_w = (f64::from(width) - 2.0 * margin).max(1.0);
        let usable_h = (f64::from(height) - 2.0 * margin).max(1.0);
        let span_x = max.x - min.x;
        let span_y = max.y - min.y;

        let scale = match (span_x > 0.0, span_y > 0.0) {
            (true, true) => (usable_w / span_x).min(usable_h / span_y),
            (true, false) => usable_w / span_x,
            (false, true) => usable_h / span_y,
            (false, false) => 1.0,
        };

        let mid_x = (min.x + max.x) / 2.0;
        let mid_y = (min.y + max.y) / 2.0;

        Viewport {
            origin_x: f64::from(width) / 2.0 - mid_x * scale,
            origin_y: f64::from(height) / 2.0 + mid_y * scale,
            scale,
        }
    }

    pub fn to_pixel(&self, p: Point) -> (f32, f32) {
        (
            (self.origin_x + p.x * self.scale) as f32,
            (self.origin_y - p.y * self.scale) as f32,
        )
    }

    fn to_pixel_i32(&self, p: Point) -> (i32, i32) {
        let (x, y) = self.to_pixel(p);
        (x.round() as i32, y.round() as i32)
    }
}

/// The sheet the walker draws on
pub struct Canvas {
    image: RgbImage,
    viewport: Viewport,
}

impl Canvas {
    pub fn new(width: u32, height: u32, viewport: Viewport) -> Self {
        Canvas {
            image: RgbImage::from_pixel(width, height, BACKGROUND),
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Draws one move of the walk; anything off the canvas is clipped
    pub fn draw_segment(&mut self, from: Point, to: Point) {
        let start = self.viewport.to_pixel(from);
        let end = self.viewport.to_pixel(to);
        draw_line_segment_mut(&mut self.image, start, end, PATH);
    }

    pub fn draw_path(&mut self, path: &[Point]) {
        for pair in path.windows(2) {
            self.draw_segment(pair[0], pair[1]);
        }
    }

    /// Rings around the origin and the destination
    pub fn draw_markers(&mut self, destination: Point) {
        Self::markers_on(&mut self.image, &self.viewport, destination);
    }

    /// Dot where the walker currently stands
    pub fn draw_walker(&mut self, position: Point) {
        Self::walker_on(&mut self.image, &self.viewport, position);
    }

    /// A copy of the drawing so far with the markers and walker on top
    pub fn frame(&self, destination: Point, walker: Point) -> RgbImage {
        let mut frame = self.image.clone();
        Self::markers_on(&mut frame, &self.viewport, destination);
        Self::walker_on(&mut frame, &self.viewport, walker);
        frame
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        self.image
            .save(path)
            .with_context(|| format!("failed to save drawing to {}", path.display()))
    }

    fn markers_on(image: &mut RgbImage, viewport: &Viewport, destination: Point) {
        let origin = viewport.to_pixel_i32(Point::ORIGIN);
        let dest = viewport.to_pixel_i32(destination);
        draw_hollow_circle_mut(image, origin, MARKER_RADIUS, ORIGIN);
        draw_hollow_circle_mut(image, dest, MARKER_RADIUS, DESTINATION);
    }

    fn walker_on(image: &mut RgbImage, viewport: &Viewport, position: Point) {
        let center = viewport.to_pixel_i32(position);
        draw_filled_circle_mut(image, center, MARKER_RADIUS - 2, WALKER);
    }
}

use crate::config::RenderConfig;
use crate::drawing::canvas::{Canvas, Viewport};
use crate::utils::geometry::Point;
use crate::walk::WalkObserver;
use anyhow::Context;
use indicatif::ProgressBar;
use std::path::PathBuf;
use tracing::warn;

/// Progress refresh interval when the canvas is only drawn at the end
const IDLE_REFRESH: u64 = 10_000;

/// Most segments held back between refreshes; larger batches are drawn early
/// without refreshing
const PENDING_LIMIT: usize = 4096;

/// Draws a walk as it happens, refreshing the canvas every `batch` steps.
///
/// Segments are buffered and flushed onto the canvas in batches, optionally
/// writing a PNG frame per flush. The viewport is fixed up front; fitted
/// views come from [`Bounds::scout`](crate::drawing::Bounds::scout).
pub struct Tracer {
    destination: Point,
    batch: usize,
    canvas: Canvas,
    pending: Vec<(Point, Point)>,
    since_refresh: usize,
    last_refresh: Option<u64>,
    steps: u64,
    position: Point,
    frames: Option<PathBuf>,
    max_frames: usize,
    frames_written: usize,
    frame_error: Option<anyhow::Error>,
    progress: ProgressBar,
}

impl Tracer {
    pub fn new(
        config: &RenderConfig,
        viewport: Viewport,
        destination: Point,
        progress: ProgressBar,
    ) -> anyhow::Result<Self> {
        if let Some(dir) = &config.frames {
            std::fs::create_dir_all(dir).with_context(|| {
                format!("failed to create frame directory {}", dir.display())
            })?;
        }

        let mut canvas = Canvas::new(config.width, config.height, viewport);
        canvas.draw_markers(destination);

        Ok(Tracer {
            destination,
            batch: config.batch,
            canvas,
            pending: Vec::with_capacity(config.batch.min(PENDING_LIMIT)),
            since_refresh: 0,
            last_refresh: None,
            steps: 0,
            position: Point::ORIGIN,
            frames: config.frames.clone(),
            max_frames: config.max_frames,
            frames_written: 0,
            frame_error: None,
            progress,
        })
    }

    pub fn frames_written(&self) -> usize {
        self.frames_written
    }

    /// The finished drawing, or the first error hit while writing frames
    pub fn into_canvas(self) -> anyhow::Result<Canvas> {
        match self.frame_error {
            Some(err) => Err(err),
            None => Ok(self.canvas),
        }
    }

    fn draw_pending(&mut self) {
        for (from, to) in self.pending.drain(..) {
            self.canvas.draw_segment(from, to);
        }
    }

    fn refresh(&mut self) {
        self.draw_pending();
        self.canvas.draw_markers(self.destination);
        self.tick();
        self.write_frame();
        self.since_refresh = 0;
        self.last_refresh = Some(self.steps);
    }

    fn tick(&mut self) {
        self.progress.set_message(format!("{} steps", self.steps));
        self.progress.tick();
    }

    fn write_frame(&mut self) {
        let Some(dir) = &self.frames else {
            return;
        };
        if self.frame_error.is_some() || self.frames_written >= self.max_frames {
            return;
        }

        let path = dir.join(format!("frame_{:05}.png", self.frames_written));
        let frame = self.canvas.frame(self.destination, self.position);
        match frame.save(&path) {
            Ok(()) => {
                self.frames_written += 1;
                if self.frames_written == self.max_frames {
                    warn!(
                        max_frames = self.max_frames,
                        "frame limit reached, no more frames will be written"
                    );
                }
            }
            Err(err) => {
                self.frame_error = Some(
                    anyhow::Error::new(err)
                        .context(format!("failed to write frame {}", path.display())),
                );
            }
        }
    }
}

impl WalkObserver for Tracer {
    fn on_step(&mut self, from: Point, to: Point, steps: u64) {
        self.steps = steps;
        self.position = to;

        if self.batch == 0 {
            self.canvas.draw_segment(from, to);
            if steps % IDLE_REFRESH == 0 {
                self.tick();
            }
            return;
        }

        self.pending.push((from, to));
        self.since_refresh += 1;
        if self.since_refresh >= self.batch {
            self.refresh();
        } else if self.pending.len() >= PENDING_LIMIT {
            self.draw_pending();
            self.tick();
        }
    }

    fn finish(&mut self, position: Point) {
        self.position = position;

        // A refresh on the final step already drew everything and its frame.
        if self.last_refresh != Some(self.steps) {
            self.refresh();
        }

        self.canvas.draw_walker(position);
        self.progress.finish_and_clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn config(batch: usize) -> RenderConfig {
        RenderConfig {
            width: 100,
            height: 100,
            batch,
            ..RenderConfig::default()
        }
    }

    fn tracer(render: &RenderConfig, destination: Point) -> Tracer {
        let viewport = Viewport::centered(render.width, render.height, render.scale);
        Tracer::new(render, viewport, destination, ProgressBar::hidden()).unwrap()
    }

    fn walk_right(tracer: &mut Tracer, steps: u64) {
        for i in 0..steps {
            let from = Point::new(i as f64 * 10.0, 0.0);
            let to = Point::new((i + 1) as f64 * 10.0, 0.0);
            tracer.on_step(from, to, i + 1);
        }
    }

    #[test]
    fn flushes_in_batches() {
        let mut tracer = tracer(&config(3), Point::new(50.0, 0.0));

        walk_right(&mut tracer, 4);
        assert_eq!(tracer.pending.len(), 1);

        tracer.finish(Point::new(40.0, 0.0));
        assert!(tracer.pending.is_empty());

        let canvas = tracer.into_canvas().unwrap();
        assert_eq!(*canvas.image().get_pixel(65, 50), Rgb([0, 0, 0]));
    }

    #[test]
    fn batch_zero_skips_intermediate_frames() {
        let dir = tempfile::tempdir().unwrap();
        let render = RenderConfig {
            frames: Some(dir.path().to_path_buf()),
            ..config(0)
        };
        let mut tracer = tracer(&render, Point::new(20.0, 0.0));

        walk_right(&mut tracer, 2);
        assert!(tracer.pending.is_empty());
        assert_eq!(tracer.frames_written(), 0);

        tracer.finish(Point::new(20.0, 0.0));
        assert_eq!(tracer.frames_written(), 1);
        let canvas = tracer.into_canvas().unwrap();
        assert_eq!(*canvas.image().get_pixel(60, 50), Rgb([0, 0, 0]));
    }

    #[test]
    fn huge_batches_hold_back_a_bounded_number_of_segments() {
        let mut tracer = tracer(&config(usize::MAX / 64), Point::new(50.0, 0.0));
        assert!(tracer.pending.capacity() <= PENDING_LIMIT);

        walk_right(&mut tracer, 3 * PENDING_LIMIT as u64 + 5);
        assert!(tracer.pending.len() < PENDING_LIMIT);
        assert_eq!(tracer.last_refresh, None);

        tracer.finish(Point::new(50.0, 0.0));
        assert!(tracer.pending.is_empty());
        let canvas = tracer.into_canvas().unwrap();
        assert_eq!(*canvas.image().get_pixel(65, 50), Rgb([0, 0, 0]));
    }

    #[test]
    fn final_batch_does_not_repeat_its_frame() {
        let dir = tempfile::tempdir().unwrap();
        let render = RenderConfig {
            frames: Some(dir.path().to_path_buf()),
            ..config(2)
        };
        let mut tracer = tracer(&render, Point::new(20.0, 0.0));

        walk_right(&mut tracer, 2);
        tracer.finish(Point::new(20.0, 0.0));

        assert_eq!(tracer.frames_written(), 1);
        assert!(!dir.path().join("frame_00001.png").exists());
        let canvas = tracer.into_canvas().unwrap();
        assert_eq!(*canvas.image().get_pixel(70, 50), Rgb([0, 0, 220]));
    }

    #[test]
    fn frames_are_written_up_to_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let frames = dir.path().join("frames");
        let render = RenderConfig {
            frames: Some(frames.clone()),
            max_frames: 2,
            ..config(1)
        };
        let mut tracer = tracer(&render, Point::new(50.0, 0.0));

        walk_right(&mut tracer, 5);
        tracer.finish(Point::new(50.0, 0.0));

        assert_eq!(tracer.frames_written(), 2);
        assert!(frames.join("frame_00000.png").exists());
        assert!(frames.join("frame_00001.png").exists());
        assert!(!frames.join("frame_00002.png").exists());
        tracer.into_canvas().unwrap();
    }
}

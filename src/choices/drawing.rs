use crate::choice;

choice!(TracerSpeed,
    Animated => "Animated - Refresh the drawing after every step (slowest)",
    Smooth => "Smooth - Refresh the drawing every 10 steps",
    Fast => "Fast - Refresh the drawing every 100 steps",
    Instant => "Instant - No intermediate refreshes, fastest"
);

choice!(ViewMode,
    Fixed => "Fixed - Origin centered at a fixed scale (the path may leave the canvas)",
    Fit => "Fit - Scale the finished path so all of it fits on the canvas"
);

/// Number of steps between canvas refreshes, 0 meaning only at the end
pub fn get_batch(speed: TracerSpeed) -> usize {
    match speed {
        TracerSpeed::Animated => 1,
        TracerSpeed::Smooth => 10,
        TracerSpeed::Fast => 100,
        TracerSpeed::Instant => 0,
    }
}

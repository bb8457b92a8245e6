use std::time::{Duration, Instant};

use va_annotations::Point;

/// Minimum spacing between pencil pointer-move samples (~60 fps).
///
/// Purely a rendering-rate control; correctness never depends on it.
pub const PENCIL_SAMPLE_INTERVAL: Duration = Duration::from_millis(16);

/// The overlay container's position and size in client pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContainerRect {
    pub left: i32,
    pub top: i32,
    pub width: i32,
    pub height: i32,
}

impl ContainerRect {
    pub const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Convert client pixel coordinates to percentage-of-container space,
    /// so annotations stay resolution-independent.
    pub fn to_percent(&self, x: i32, y: i32) -> Point {
        if self.width <= 0 || self.height <= 0 {
            return Point::default();
        }
        Point::new(
            (x - self.left) as f64 / self.width as f64 * 100.0,
            (y - self.top) as f64 / self.height as f64 * 100.0,
        )
    }
}

/// Skips events that arrive faster than a minimum interval.
#[derive(Debug)]
pub struct MoveThrottle {
    min_interval: Duration,
    last: Option<Instant>,
}

impl MoveThrottle {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last: None,
        }
    }

    /// True when enough time has passed since the last accepted event.
    pub fn allow(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    pub fn allow_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.duration_since(last) < self.min_interval => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }

    /// Forget the last accepted event (new stroke started).
    pub fn reset(&mut self) {
        self.last = None;
    }
}

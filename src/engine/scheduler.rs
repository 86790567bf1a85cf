use crate::{
    foundation::core::Millis,
    foundation::error::{TesseraError, TesseraResult},
};

/// Whether the engine wants another frame after a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameRequest {
    /// Deliver the next frame.
    Next,
    /// Stop delivering frames.
    Stop,
}

/// Frame loop bookkeeping: a stop flag, a tick counter and an optional frame limit.
///
/// The scheduler never runs anything itself. A driver delivers timestamps; after each tick the
/// scheduler says whether another frame is wanted.
#[derive(Clone, Debug)]
pub struct FrameScheduler {
    limit: u64,
    ticks: u64,
    running: bool,
}

impl FrameScheduler {
    /// Idle scheduler that stops after `limit_frames` ticks (0 = never).
    pub fn new(limit_frames: u64) -> Self {
        Self {
            limit: limit_frames,
            ticks: 0,
            running: false,
        }
    }

    /// Begin requesting frames. Does nothing once the frame limit has been reached.
    pub fn start(&mut self) {
        self.running = !self.limit_reached();
    }

    /// Stop requesting frames.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Whether frames are currently requested.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Configured limit (0 = unbounded).
    pub fn limit(&self) -> u64 {
        self.limit
    }

    fn limit_reached(&self) -> bool {
        self.limit != 0 && self.ticks >= self.limit
    }

    pub(crate) fn record_tick(&mut self) -> FrameRequest {
        self.ticks = self.ticks.saturating_add(1);
        if self.limit_reached() {
            self.running = false;
        }
        if self.running {
            FrameRequest::Next
        } else {
            FrameRequest::Stop
        }
    }
}

/// Source of frame timestamps, e.g. a display refresh callback or a fixed-step clock.
pub trait FrameDriver {
    /// Timestamp of the next frame, or `None` when the driver has no more frames.
    fn next_timestamp(&mut self) -> Option<Millis>;
}

/// Produces evenly spaced timestamps at a fixed frame rate, for headless rendering.
///
/// The first timestamp is one frame interval after zero.
#[derive(Clone, Debug)]
pub struct FixedStepDriver {
    interval_ms: f64,
    frame: u64,
    max_frames: Option<u64>,
}

impl FixedStepDriver {
    /// Driver ticking at `fps` frames per second, without end.
    pub fn new(fps: f64) -> TesseraResult<Self> {
        if !fps.is_finite() || fps <= 0.0 {
            return Err(TesseraError::config(format!("fps must be > 0 (got {fps})")));
        }
        Ok(Self {
            interval_ms: 1000.0 / fps,
            frame: 0,
            max_frames: None,
        })
    }

    /// End after `n` timestamps.
    pub fn with_max_frames(mut self, n: u64) -> Self {
        self.max_frames = Some(n);
        self
    }

    /// Frame interval in milliseconds.
    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }
}

impl FrameDriver for FixedStepDriver {
    fn next_timestamp(&mut self) -> Option<Millis> {
        if self.max_frames.is_some_and(|max| self.frame >= max) {
            return None;
        }
        self.frame += 1;
        Some(Millis(self.frame as f64 * self.interval_ms))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/scheduler.rs"]
mod tests;

use std::time::Duration;

/// Ring buffer of recent frame durations.
#[derive(Debug)]
pub struct FrameTimer {
    history: Vec<Duration>,
    capacity: usize,
    index: usize,
    filled: bool,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            history: vec![Duration::ZERO; capacity],
            capacity,
            index: 0,
            filled: false,
        }
    }

    pub fn record(&mut self, dt: Duration) {
        self.history[self.index] = dt;
        self.index = (self.index + 1) % self.capacity;
        if self.index == 0 {
            self.filled = true;
        }
    }

    fn recorded(&self) -> &[Duration] {
        &self.history[..self.count()]
    }

    pub fn average(&self) -> Duration {
        let count = self.count();
        if count == 0 {
            return Duration::ZERO;
        }
        let total: Duration = self.recorded().iter().sum();
        total / count as u32
    }

    pub fn max(&self) -> Duration {
        self.recorded().iter().copied().max().unwrap_or(Duration::ZERO)
    }

    pub fn min(&self) -> Duration {
        self.recorded().iter().copied().min().unwrap_or(Duration::ZERO)
    }

    pub fn count(&self) -> usize {
        if self.filled {
            self.capacity
        } else {
            self.index
        }
    }
}

/// FPS counter in the style of a browser stats widget: frames are counted
/// over one-second windows, and the displayed rate only changes when a
/// window closes.
#[derive(Debug)]
pub struct FrameStats {
    timer: FrameTimer,
    total_frames: u64,
    window_frames: u32,
    window_elapsed: Duration,
    fps: f32,
}

/// Snapshot of the counter for display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatsSummary {
    pub fps: f32,
    pub avg_ms: f32,
    pub min_ms: f32,
    pub max_ms: f32,
    pub total_frames: u64,
}

impl FrameStats {
    const WINDOW: Duration = Duration::from_secs(1);

    /// `history` is the number of frames kept for the ms statistics.
    pub fn new(history: usize) -> Self {
        Self {
            timer: FrameTimer::new(history),
            total_frames: 0,
            window_frames: 0,
            window_elapsed: Duration::ZERO,
            fps: 0.0,
        }
    }

    /// Record one rendered frame that took `dt`.
    pub fn record(&mut self, dt: Duration) {
        self.timer.record(dt);
        self.total_frames += 1;
        self.window_frames += 1;
        self.window_elapsed += dt;

        if self.window_elapsed >= Self::WINDOW {
            self.fps = self.window_frames as f32 / self.window_elapsed.as_secs_f32();
            tracing::trace!(fps = self.fps, "fps window closed");
            self.window_frames = 0;
            self.window_elapsed = Duration::ZERO;
        }
    }

    /// Frames per second over the last closed window (0 until one closes).
    pub fn fps(&self) -> f32 {
        self.fps
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }

    pub fn timer(&self) -> &FrameTimer {
        &self.timer
    }

    pub fn summary(&self) -> StatsSummary {
        StatsSummary {
            fps: self.fps,
            avg_ms: self.timer.average().as_secs_f32() * 1000.0,
            min_ms: self.timer.min().as_secs_f32() * 1000.0,
            max_ms: self.timer.max().as_secs_f32() * 1000.0,
            total_frames: self.total_frames,
        }
    }
}

impl Default for FrameStats {
    fn default() -> Self {
        Self::new(120)
    }
}

impl std::fmt::Display for StatsSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.0} FPS  {:.1} ms ({:.1}-{:.1})",
            self.fps, self.avg_ms, self.min_ms, self.max_ms
        )
    }
}

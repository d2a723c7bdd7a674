//! Frame time management
//!
//! The frame loop advances time by explicit deltas rather than sampling a
//! wall clock internally, so headless runs and tests can drive simulated
//! time deterministically. A host that does want wall-clock pacing simply
//! measures its own delta and passes it in. [`Stopwatch`] covers the other
//! direction: real elapsed time for reporting how long a stretch of
//! headless work took.

use std::time::Instant;

/// Accumulates simulated time across frames
#[derive(Debug, Clone)]
pub struct FrameClock {
    delta_time: f32,
    total_time: f32,
    frame_count: u64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    /// Create a new clock at time zero
    pub fn new() -> Self {
        Self {
            delta_time: 0.0,
            total_time: 0.0,
            frame_count: 0,
        }
    }

    /// Advance the clock by one frame of `delta_time` seconds
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
        self.total_time += delta_time;
        self.frame_count += 1;
    }

    /// Time advanced by the most recent frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Total simulated time since clock creation in seconds
    pub fn total_time(&self) -> f32 {
        self.total_time
    }

    /// Number of frames advanced so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Average seconds per frame since clock creation
    pub fn average_frame_time(&self) -> f32 {
        if self.frame_count > 0 {
            self.total_time / self.frame_count as f32
        } else {
            0.0
        }
    }
}

/// Wall-clock lap timer for reporting how long work phases take
///
/// Where [`FrameClock`] tracks simulated time fed in by the host, the
/// stopwatch samples the real clock. It is always running: [`lap_secs`]
/// reads the time since the previous lap (or construction) and opens the
/// next one, so consecutive phases can be measured with a single instance.
///
/// [`lap_secs`]: Stopwatch::lap_secs
#[derive(Debug, Clone)]
pub struct Stopwatch {
    run_start: Instant,
    lap_start: Instant,
}

impl Default for Stopwatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Stopwatch {
    /// Start measuring from now
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            run_start: now,
            lap_start: now,
        }
    }

    /// Seconds since the previous lap, starting the next one
    pub fn lap_secs(&mut self) -> f32 {
        let now = Instant::now();
        let secs = now.duration_since(self.lap_start).as_secs_f32();
        self.lap_start = now;
        secs
    }

    /// Seconds since construction, across all laps
    pub fn total_secs(&self) -> f32 {
        self.run_start.elapsed().as_secs_f32()
    }
}

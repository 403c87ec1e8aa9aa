//! Frame pacing and profiling utilities.
//!
//! ## Features
//!
//! - **Frame clock**: paces the editor loop to a fixed rate and keeps a rolling
//!   average of frame times, warning about slow frames
//! - **Scoped timers**: RAII-style timing for code blocks
//! - **Conditional compilation**: zero-cost when profiling is disabled
//!
//! Enable profiling with the `profiling` feature flag:
//! ```toml
//! [dependencies]
//! progression-graph = { features = ["profiling"] }
//! ```
//!
//! ```ignore
//! fn draw_scene() {
//!     profile_scope!("draw_scene");
//!     // ... drawing code ...
//! }
//! ```

use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::warn;
#[cfg(feature = "profiling")]
use tracing::trace;

// ============================================================================
// Constants
// ============================================================================

/// Number of samples to keep for rolling averages
const SAMPLE_COUNT: usize = 60;

/// Threshold multiplier for warning (2.0 = warn if a frame takes twice its budget)
const WARN_THRESHOLD: f64 = 2.0;

// ============================================================================
// Profiling Macros (zero-cost when disabled)
// ============================================================================

/// Profile a scope with the given name. Zero-cost when profiling is disabled.
#[macro_export]
macro_rules! profile_scope {
    ($name:expr) => {
        #[cfg(feature = "profiling")]
        let _timer = $crate::perf::ScopedTimer::new($name);
        #[cfg(not(feature = "profiling"))]
        let _ = $name;
    };
}

// ============================================================================
// Frame Clock
// ============================================================================

/// Fixed-rate clock for the editor loop.
pub struct FrameClock {
    budget: Duration,
    frame_start: Option<Instant>,
    /// Recent frame times in milliseconds, excluding the idle wait
    frame_times: VecDeque<f64>,
    slow_frame_count: u64,
    total_frames: u64,
}

impl FrameClock {
    /// A clock ticking `fps` times per second; 0 is treated as 1
    pub fn new(fps: u32) -> Self {
        Self {
            budget: Duration::from_secs(1) / fps.max(1),
            frame_start: None,
            frame_times: VecDeque::with_capacity(SAMPLE_COUNT),
            slow_frame_count: 0,
            total_frames: 0,
        }
    }

    /// Time allotted to one frame
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Mark the start of a frame.
    pub fn begin_frame(&mut self) {
        self.frame_start = Some(Instant::now());
    }

    /// Mark the end of a frame and record its duration.
    ///
    /// Returns how long to wait before the next frame should begin.
    pub fn end_frame(&mut self) -> Duration {
        let Some(start) = self.frame_start.take() else {
            return Duration::ZERO;
        };
        let elapsed = start.elapsed();
        self.record(elapsed);
        self.budget.saturating_sub(elapsed)
    }

    fn record(&mut self, elapsed: Duration) {
        let ms = elapsed.as_secs_f64() * 1000.0;
        if self.frame_times.len() >= SAMPLE_COUNT {
            self.frame_times.pop_front();
        }
        self.frame_times.push_back(ms);
        self.total_frames += 1;

        let budget_ms = self.budget.as_secs_f64() * 1000.0;
        if ms > budget_ms * WARN_THRESHOLD {
            self.slow_frame_count += 1;
            warn!(
                frame_time_ms = format!("{:.2}", ms),
                target_ms = format!("{:.2}", budget_ms),
                "Slow frame detected"
            );
        }
    }

    /// Average frame time over recent frames, in milliseconds
    pub fn average_frame_time(&self) -> f64 {
        if self.frame_times.is_empty() {
            return 0.0;
        }
        self.frame_times.iter().sum::<f64>() / self.frame_times.len() as f64
    }

    /// Percentage of frames that exceeded the warning threshold
    pub fn slow_frame_percentage(&self) -> f64 {
        if self.total_frames == 0 {
            return 0.0;
        }
        (self.slow_frame_count as f64 / self.total_frames as f64) * 100.0
    }

    pub fn total_frames(&self) -> u64 {
        self.total_frames
    }
}

// ============================================================================
// Scoped Timer
// ============================================================================

/// A scoped timer that traces its duration on drop.
pub struct ScopedTimer {
    name: &'static str,
    start: Instant,
}

impl ScopedTimer {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Get elapsed time without stopping the timer.
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        #[cfg(feature = "profiling")]
        trace!("[PERF] {}: {:.2}ms", self.name, self.elapsed_ms());
        #[cfg(not(feature = "profiling"))]
        let _ = self.name;
    }
}

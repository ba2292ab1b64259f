//! Application configuration constants.
//!
//! Everything tunable lives here as a `const`, grouped by concern. Thread
//! periods are additionally collected in [`TimingConfig`] so tests can run the
//! same threads with shorter sleeps.

use std::time::Duration;

// =============================================================================
// Display Configuration
// =============================================================================

/// Display width in pixels.
pub const SCREEN_WIDTH: u32 = 320;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 240;

/// Screen center X coordinate, pre-computed as i32 for layout code.
pub const CENTER_X: i32 = (SCREEN_WIDTH / 2) as i32;

/// Screen center Y coordinate, pre-computed as i32 for layout code.
pub const CENTER_Y: i32 = (SCREEN_HEIGHT / 2) as i32;

// =============================================================================
// Temperature Configuration
// =============================================================================

/// Upper bound for every temperature value. Lower bound is 0.
pub const MAX_TEMP: i32 = 35;

/// Current temperature after start-up and after every entry reset.
pub const DEFAULT_CURRENT_TEMP: i32 = 20;

/// Warning threshold after start-up and after every entry reset.
pub const DEFAULT_WARNING_TEMP: i32 = 25;

/// Gauge scale start of the red "critical" zone.
pub const CRITICAL_TEMP: i32 = 30;

/// Degrees between labelled gauge ticks.
pub const DEG_PER_INTERVAL: i32 = 5;

/// Degrees the simulator moves per period.
pub const SIMULATION_STEP: i32 = 1;

/// Number of samples visible in the chart (oldest shifts out).
pub const CHART_POINTS: usize = 20;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Tick pump period. Each iteration advances the toolkit clock by this amount.
pub const TICK_PERIOD_MS: u32 = 5;

/// Task pump period.
pub const TASK_PERIOD_MS: u32 = 10;

/// Temperature simulator period.
pub const SIMULATION_PERIOD: Duration = Duration::from_secs(1);

/// Length of the preload countdown in seconds.
pub const PRELOAD_SECONDS: u32 = 1;

/// Frame time of the simulator window loop (~50 FPS).
pub const FRAME_TIME: Duration = Duration::from_millis(20);

// =============================================================================
// Image Animation
// =============================================================================

/// Leftmost x of the animated logo.
pub const ANIM_X_MIN: i32 = 10;

/// Rightmost x of the animated logo.
pub const ANIM_X_MAX: i32 = 290;

/// Resting y of the animated logo.
pub const ANIM_Y_START: i32 = 138;

/// Time for one sweep from `ANIM_X_MIN` to `ANIM_X_MAX`.
pub const ANIM_SWEEP_MS: u32 = 4000;

// =============================================================================
// Runtime Timing
// =============================================================================

/// Periods used by the worker threads.
///
/// `Default` yields the production values above. Tests shrink them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimingConfig {
    /// Tick pump period in milliseconds.
    pub tick_period_ms: u32,
    /// Task pump period in milliseconds.
    pub task_period_ms: u32,
    /// Temperature simulator period.
    pub simulation_period: Duration,
    /// Duration of one countdown step in the preload splash.
    pub preload_step: Duration,
    /// Number of countdown steps in the preload splash.
    pub preload_steps: u32,
}

impl TimingConfig {
    /// Tick pump period as a `Duration`.
    #[inline]
    pub const fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_period_ms as u64)
    }

    /// Task pump period as a `Duration`.
    #[inline]
    pub const fn task_period(&self) -> Duration {
        Duration::from_millis(self.task_period_ms as u64)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_period_ms: TICK_PERIOD_MS,
            task_period_ms: TASK_PERIOD_MS,
            simulation_period: SIMULATION_PERIOD,
            preload_step: Duration::from_secs(1),
            preload_steps: PRELOAD_SECONDS,
        }
    }
}

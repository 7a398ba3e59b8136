//! Scheduling tuning constants.
//!
//! Defaults match the production cut: a 2 s bracket either side of the
//! replayed moment, a 4 s trailing delay before cutting away, idle
//! narration every 30 s, and a half-second interruption buffer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ReplayConfig {
    /// Single-side buffer bracketing the replayed moment, seconds of
    /// source footage. The replay clip covers `[t - buffer, t + buffer)`.
    pub half_buffer: f64,
    /// Source seconds kept after the event before cutting to the replay.
    pub trailing_delay: f64,
    /// Bumper (logo transition) duration, output seconds. Bumpers overlap
    /// the cut symmetrically and add no output time.
    pub bumper_duration: f64,
    /// Replay playback speed; 0.5 doubles the clip's output duration.
    pub speed: f64,
}

impl ReplayConfig {
    /// Source duration of one replay clip.
    pub fn clip_duration(&self) -> f64 {
        2.0 * self.half_buffer
    }

    /// Output duration of one replay clip after the speed change.
    pub fn output_duration(&self) -> f64 {
        self.clip_duration() / self.speed
    }

    /// Smallest dead-ball window a replay fits into: four bracket widths
    /// at the default half speed.
    pub fn min_window(&self) -> f64 {
        4.0 * self.half_buffer
    }
}

impl Default for ReplayConfig {
    fn default() -> Self {
        ReplayConfig { half_buffer: 2.0, trailing_delay: 4.0, bumper_duration: 1.0, speed: 0.5 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommentaryConfig {
    /// Gap forced between a truncated clip and its interrupter, seconds.
    pub interrupt_buffer: f64,
    /// Idle filler cadence, seconds.
    pub idle_cadence: f64,
    /// Idle slots stop this many seconds before the next event.
    pub idle_guard: f64,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        CommentaryConfig { interrupt_buffer: 0.5, idle_cadence: 30.0, idle_guard: 10.0 }
    }
}

/// Goal-clip extraction window, seconds around the goal event.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GoalClipConfig {
    pub before: f64,
    pub after: f64,
}

impl Default for GoalClipConfig {
    fn default() -> Self {
        GoalClipConfig { before: 5.0, after: 7.0 }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct ScheduleConfig {
    pub replay: ReplayConfig,
    pub commentary: CommentaryConfig,
    pub goal_clip: GoalClipConfig,
}

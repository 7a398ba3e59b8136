//! # hl_core - Match Highlight Scheduling Core
//!
//! Deterministic scheduling core for narrated sports-match highlight
//! videos: dead-ball tracking, slow-motion replay slotting, scoreboard
//! interval building, narration audio placement, and output timeline
//! assembly.
//!
//! ## Features
//! - Pure, single-pass scheduling (same inputs = same schedule)
//! - Conflict-free narration placement with priority interruption
//! - Gapless scoreboard partition of the match clock
//! - Checkpoint round-trip for resumable batch runs
//!
//! Media decode/encode, event detection, narration text generation and
//! TTS are external collaborators; this crate consumes their outputs as
//! already-materialized, immutable sequences.

pub mod analysis;
pub mod checkpoint;
pub mod clock;
pub mod config;
pub mod error;
pub mod models;
pub mod schedule;

pub use checkpoint::{AnalysisCheckpoint, CheckpointError};
pub use clock::{format_time, parse_time};
pub use config::{CommentaryConfig, GoalClipConfig, ReplayConfig, ScheduleConfig};
pub use error::{Result, ScheduleError};
pub use models::{Comment, CommentKind, Event, EventKind, Game, ScoreUpdate, Tag, Team};
pub use schedule::{
    assemble_timeline, build_schedule, build_scoreboard, place_comments, schedule_replays,
    track_deadballs, ClockMap, DeadballInterval, OutputSegment, PlacedClip, ReplaySlot, Schedule,
    ScoreboardSegment, SegmentKind,
};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SCHEMA_VERSION: u8 = 1;

//! Output timeline assembly.
//!
//! Splices scheduled replays into the main feed. Each replay costs output
//! time the source footage does not have, so the assembler tracks the
//! source clock and the output clock separately and records the mapping;
//! overlays authored on the match clock (scoreboard, narration) are
//! translated through it.
//!
//! Per replay the ordered segment list gains: the main feed up to the cut,
//! a bumper over the cut, the slowed replay clip, and a second bumper.
//! Bumpers straddle their boundary symmetrically and add no output time,
//! the way the production cut overlays the logo animation on the splice.

use serde::{Deserialize, Serialize};

use crate::config::ReplayConfig;
use crate::schedule::replay::ReplaySlot;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SegmentKind {
    MainFeed,
    Replay,
    Bumper,
}

/// One entry in the ordered output timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputSegment {
    pub kind: SegmentKind,
    /// Range into the source footage; none for a pure bumper.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<(f64, f64)>,
    /// Start on the output clock.
    pub output_start: f64,
    /// Playback speed multiplier; replays run at half speed.
    pub speed: f64,
    /// Replay clips are stripped of original audio.
    pub muted: bool,
}

impl OutputSegment {
    /// Duration on the output clock.
    pub fn output_duration(&self, bumper_duration: f64) -> f64 {
        match self.source {
            Some((start, end)) => (end - start) / self.speed,
            None => bumper_duration,
        }
    }
}

/// Piecewise mapping from source (match) clock to output clock. Each step
/// records the source cut position and the cumulative output offset in
/// force from that point on.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ClockMap {
    steps: Vec<(f64, f64)>,
}

impl ClockMap {
    /// Identity mapping (no replays inserted).
    pub fn identity() -> Self {
        ClockMap::default()
    }

    fn push(&mut self, source_cut: f64, cumulative_offset: f64) {
        self.steps.push((source_cut, cumulative_offset));
    }

    /// Offset in force at a source time.
    pub fn offset_at(&self, source_time: f64) -> f64 {
        self.steps
            .iter()
            .take_while(|(cut, _)| *cut <= source_time)
            .last()
            .map(|(_, offset)| *offset)
            .unwrap_or(0.0)
    }

    /// Translate a match-clock time to the output clock.
    pub fn to_output(&self, source_time: f64) -> f64 {
        source_time + self.offset_at(source_time)
    }
}

/// Assemble the ordered output segment list and the clock mapping.
///
/// `main_duration` is the full source footage length. Replay slots come in
/// ascending slot-time order from the scheduler. With no slots the result
/// is a single full-length main segment and the identity mapping.
pub fn assemble_timeline(
    main_duration: f64,
    slots: &[ReplaySlot],
    cfg: &ReplayConfig,
) -> (Vec<OutputSegment>, ClockMap) {
    let mut segments = Vec::new();
    let mut map = ClockMap::identity();

    // Source and output cursors; output runs ahead by the cumulative
    // inserted replay time.
    let mut source_cursor = 0.0f64;
    let mut offset = 0.0f64;

    for slot in slots {
        let cut = (slot.event_time + cfg.trailing_delay).min(main_duration);
        if cut <= source_cursor {
            log::info!(
                "replay of {} cuts before the feed cursor, skipped in assembly",
                slot.event_id
            );
            continue;
        }

        segments.push(OutputSegment {
            kind: SegmentKind::MainFeed,
            source: Some((source_cursor, cut)),
            output_start: source_cursor + offset,
            speed: 1.0,
            muted: false,
        });

        let boundary = cut + offset;
        segments.push(OutputSegment {
            kind: SegmentKind::Bumper,
            source: None,
            output_start: boundary - cfg.bumper_duration / 2.0,
            speed: 1.0,
            muted: false,
        });

        let replay_start = (slot.event_time - cfg.half_buffer).max(0.0);
        let replay_end = (slot.event_time + cfg.half_buffer).min(main_duration);
        segments.push(OutputSegment {
            kind: SegmentKind::Replay,
            source: Some((replay_start, replay_end)),
            output_start: boundary,
            speed: cfg.speed,
            muted: true,
        });

        let replay_output = (replay_end - replay_start) / cfg.speed;
        offset += replay_output;
        map.push(cut, offset);

        segments.push(OutputSegment {
            kind: SegmentKind::Bumper,
            source: None,
            output_start: cut + offset - cfg.bumper_duration / 2.0,
            speed: 1.0,
            muted: false,
        });

        source_cursor = cut;
    }

    if source_cursor < main_duration {
        segments.push(OutputSegment {
            kind: SegmentKind::MainFeed,
            source: Some((source_cursor, main_duration)),
            output_start: source_cursor + offset,
            speed: 1.0,
            muted: false,
        });
    }

    (segments, map)
}

//! Narration comments.
//!
//! Comment text comes from the narration generator and voice durations
//! from TTS synthesis; both are external. The core only reads timing,
//! priority and linkage.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::format_time;

/// Priority level given to idle filler comments.
pub const IDLE_LEVEL: u8 = 0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CommentKind {
    /// Periodic filler while nothing happens.
    Idle,
    /// Triggered by a detected event.
    Event,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Intended start, seconds on the match clock.
    pub time: f64,
    pub text: String,
    pub kind: CommentKind,
    /// Id of the triggering event, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    /// Priority level; the triggering event kind's level, or [`IDLE_LEVEL`].
    #[serde(default)]
    pub level: u8,
}

impl Comment {
    pub fn idle(time: f64, text: impl Into<String>) -> Self {
        Comment {
            time,
            text: text.into(),
            kind: CommentKind::Idle,
            event_id: None,
            level: IDLE_LEVEL,
        }
    }

    pub fn for_event(time: f64, text: impl Into<String>, event_id: impl Into<String>, level: u8) -> Self {
        Comment {
            time,
            text: text.into(),
            kind: CommentKind::Event,
            event_id: Some(event_id.into()),
            level,
        }
    }
}

impl fmt::Display for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", format_time(self.time), self.text)
    }
}

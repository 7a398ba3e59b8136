//! Dead-ball interval tracking.
//!
//! A single left-to-right fold over the canonical event log. At most one
//! interval is open at a time; a Deadball tag opens it, a Liveball tag
//! closes it. Anything still open when the log ends is dropped.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::format_time;
use crate::error::{Result, ScheduleError};
use crate::models::event::{Event, Tag};

/// A closed span `[start, end)` during which the ball is out of play.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DeadballInterval {
    pub start: f64,
    pub end: f64,
}

impl DeadballInterval {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Closed intervals must have positive duration; anything else is a
    /// logic defect upstream and fatal to the batch.
    pub fn check(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(ScheduleError::MalformedInterval {
                context: "deadball",
                start: self.start,
                end: self.end,
            });
        }
        Ok(())
    }
}

impl fmt::Display for DeadballInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {})", format_time(self.start), format_time(self.end))
    }
}

/// Fold the event log into closed dead-ball intervals.
///
/// Tags that do not match the current state are no-ops: a second Deadball
/// while one is open is ignored, as is a Liveball with nothing open.
pub fn track_deadballs(events: &[Event]) -> Vec<DeadballInterval> {
    let mut intervals = Vec::new();
    let mut open: Option<f64> = None;

    for event in events {
        match open {
            None if event.has_tag(Tag::Deadball) => {
                open = Some(event.time);
            }
            Some(start) if event.has_tag(Tag::Liveball) => {
                // Zero-width spans (open and close at the same instant)
                // carry no usable time and are not emitted.
                if event.time > start {
                    intervals.push(DeadballInterval { start, end: event.time });
                }
                open = None;
            }
            _ => {}
        }
    }

    if let Some(start) = open {
        log::debug!("dead ball open at {} never closed, dropped", format_time(start));
    }

    intervals
}

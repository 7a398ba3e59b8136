//! Match project model.
//!
//! A `Game` is the per-match project the batch pipeline is driven by:
//! team identities, match clock bounds, and the running score-update log
//! that analysis appends to. It deserializes straight from the project
//! YAML file.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScheduleError};
use crate::models::event::{Event, EventKind};
use crate::models::score::ScoreUpdate;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Team {
    pub name: String,
    /// Shirt color, used by upstream detection prompts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// Short code shown on the scoreboard.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// Score carried in from a previous quarter.
    #[serde(default)]
    pub score: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Game {
    pub name: String,
    pub teams: [Team; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quarter: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Match clock start, seconds into the footage.
    #[serde(default)]
    pub start: f64,
    /// Match clock end (exclusive).
    pub end: f64,
    /// Score changes recorded during analysis, ascending by time.
    #[serde(default)]
    pub score_updates: Vec<ScoreUpdate>,
}

impl Game {
    /// Validate the clock bounds before any scheduling runs.
    pub fn check_clock(&self) -> Result<()> {
        if self.end <= self.start {
            return Err(ScheduleError::EmptyMatchClock { start: self.start, end: self.end });
        }
        Ok(())
    }

    /// Take clock bounds from the first Start and last End event when the
    /// log carries them, leaving configured bounds alone otherwise.
    pub fn load_clock_bounds(&mut self, events: &[Event]) {
        if let Some(start) = events.iter().find(|e| e.kind == EventKind::Start) {
            self.start = start.time;
        }
        if let Some(end) = events.iter().rev().find(|e| e.kind == EventKind::End) {
            self.end = end.time;
        }
    }

    /// Bump a team's score and log the update. Duplicate times are fine;
    /// the scoreboard builder lets the later entry win.
    pub fn record_goal(&mut self, time: f64, team: u8) {
        if let Some(t) = self.teams.get_mut(team as usize) {
            t.score += 1;
        }
        self.score_updates
            .push(ScoreUpdate::new(time, self.teams[0].score, self.teams[1].score));
    }

    /// Current score pair.
    pub fn score(&self) -> (u32, u32) {
        (self.teams[0].score, self.teams[1].score)
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::format_time;

/// A point where the displayed score changes. Ordered by time; duplicates
/// at the same instant are allowed and the later one in event order wins.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreUpdate {
    /// Seconds on the match clock.
    pub time: f64,
    pub home: u32,
    pub away: u32,
}

impl ScoreUpdate {
    pub fn new(time: f64, home: u32, away: u32) -> Self {
        ScoreUpdate { time, home, away }
    }
}

impl fmt::Display for ScoreUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}:{}", format_time(self.time), self.home, self.away)
    }
}

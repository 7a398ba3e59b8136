//! Scoreboard interval building.
//!
//! Turns the score-update log into a partition of the match clock: one
//! segment per displayed score, no gaps, no overlaps. Updates are walked
//! in descending time order so each one claims the span up to the next
//! boundary; whatever precedes the earliest update shows 0:0.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::format_time;
use crate::error::{Result, ScheduleError};
use crate::models::score::ScoreUpdate;

/// A maximal interval `[start, end)` over which the scoreboard shows one
/// fixed score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ScoreboardSegment {
    pub start: f64,
    pub end: f64,
    pub home: u32,
    pub away: u32,
}

impl ScoreboardSegment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for ScoreboardSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} .. {}) {}:{}",
            format_time(self.start),
            format_time(self.end),
            self.home,
            self.away
        )
    }
}

/// Partition `[match_start, match_end)` into score-display segments.
///
/// Updates must lie within the match clock; an out-of-range update is a
/// caller error, never clamped. Duplicate update times are allowed and the
/// later entry in log order wins.
pub fn build_scoreboard(
    updates: &[ScoreUpdate],
    match_start: f64,
    match_end: f64,
) -> Result<Vec<ScoreboardSegment>> {
    if match_end <= match_start {
        return Err(ScheduleError::EmptyMatchClock { start: match_start, end: match_end });
    }

    if updates.is_empty() {
        return Ok(vec![ScoreboardSegment {
            start: match_start,
            end: match_end,
            home: 0,
            away: 0,
        }]);
    }

    for update in updates {
        if update.time < match_start || update.time > match_end {
            return Err(ScheduleError::OutOfRange {
                context: "score update",
                time: update.time,
                match_start,
                match_end,
            });
        }
    }

    let mut segments = Vec::with_capacity(updates.len() + 1);
    let mut next_boundary = match_end;

    for update in updates.iter().rev() {
        // A duplicate time, or an update right at match end, claims no
        // span; the boundary already belongs to the later entry.
        if update.time < next_boundary {
            segments.push(ScoreboardSegment {
                start: update.time,
                end: next_boundary,
                home: update.home,
                away: update.away,
            });
        }
        next_boundary = next_boundary.min(update.time);
    }

    if next_boundary > match_start {
        segments.push(ScoreboardSegment {
            start: match_start,
            end: next_boundary,
            home: 0,
            away: 0,
        });
    }

    segments.reverse();
    check_coverage(&segments, match_start, match_end)?;
    Ok(segments)
}

/// The partition invariant is load-bearing for the renderer; a violation
/// is a logic defect and fatal.
fn check_coverage(
    segments: &[ScoreboardSegment],
    match_start: f64,
    match_end: f64,
) -> Result<()> {
    let mut expected = match_start;
    for segment in segments {
        if segment.end <= segment.start {
            return Err(ScheduleError::MalformedInterval {
                context: "scoreboard",
                start: segment.start,
                end: segment.end,
            });
        }
        if segment.start != expected {
            return Err(ScheduleError::CoverageBroken { at: segment.start, expected });
        }
        expected = segment.end;
    }
    if expected != match_end {
        return Err(ScheduleError::CoverageBroken { at: match_end, expected });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_updates_single_baseline() {
        let segments = build_scoreboard(&[], 0.0, 5400.0).unwrap();
        assert_eq!(
            segments,
            vec![ScoreboardSegment { start: 0.0, end: 5400.0, home: 0, away: 0 }]
        );
    }

    #[test]
    fn test_baseline_before_first_update() {
        let updates = vec![ScoreUpdate::new(600.0, 1, 0)];
        let segments = build_scoreboard(&updates, 0.0, 1800.0).unwrap();
        assert_eq!(
            segments,
            vec![
                ScoreboardSegment { start: 0.0, end: 600.0, home: 0, away: 0 },
                ScoreboardSegment { start: 600.0, end: 1800.0, home: 1, away: 0 },
            ]
        );
    }

    #[test]
    fn test_update_at_match_start_replaces_baseline() {
        let updates = vec![ScoreUpdate::new(0.0, 2, 1), ScoreUpdate::new(60.0, 2, 2)];
        let segments = build_scoreboard(&updates, 0.0, 120.0).unwrap();
        assert_eq!(
            segments,
            vec![
                ScoreboardSegment { start: 0.0, end: 60.0, home: 2, away: 1 },
                ScoreboardSegment { start: 60.0, end: 120.0, home: 2, away: 2 },
            ]
        );
    }

    #[test]
    fn test_duplicate_time_later_wins() {
        let updates = vec![
            ScoreUpdate::new(100.0, 1, 0),
            ScoreUpdate::new(100.0, 1, 1),
        ];
        let segments = build_scoreboard(&updates, 0.0, 200.0).unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1], ScoreboardSegment { start: 100.0, end: 200.0, home: 1, away: 1 });
    }

    #[test]
    fn test_out_of_range_rejected() {
        let updates = vec![ScoreUpdate::new(2000.0, 1, 0)];
        let err = build_scoreboard(&updates, 0.0, 1800.0).unwrap_err();
        assert!(matches!(err, ScheduleError::OutOfRange { context: "score update", .. }));
    }

    #[test]
    fn test_coverage_sums_to_match_duration() {
        let updates = vec![
            ScoreUpdate::new(60.0, 1, 0),
            ScoreUpdate::new(600.0, 1, 1),
            ScoreUpdate::new(1500.0, 2, 1),
        ];
        let segments = build_scoreboard(&updates, 0.0, 1800.0).unwrap();
        let total: f64 = segments.iter().map(|s| s.duration()).sum();
        assert_eq!(total, 1800.0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
    }

    #[test]
    fn test_empty_clock_rejected() {
        assert!(build_scoreboard(&[], 10.0, 10.0).is_err());
    }
}

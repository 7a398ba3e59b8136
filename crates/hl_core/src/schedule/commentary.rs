//! Narration audio placement.
//!
//! Walks comments in intended-start order and resolves overlaps by
//! priority. A lower-priority newcomer is dropped; an equal or higher one
//! either truncates the previous clip (leaving the interruption buffer) or
//! replaces it outright when there is no room to truncate. Only the
//! immediately preceding placed clip is ever touched. Equal priority
//! favors the newer comment: a later comment reflects a later match
//! situation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::clock::format_time;
use crate::models::comment::Comment;

/// A narration clip's finalized, conflict-resolved span on the match
/// clock. Guaranteed `end >= start` and non-overlapping with neighbors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlacedClip {
    pub start: f64,
    pub end: f64,
    pub comment: Comment,
}

impl PlacedClip {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

impl fmt::Display for PlacedClip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{} .. {}) lv{} {}",
            format_time(self.start),
            format_time(self.end),
            self.comment.level,
            self.comment.text
        )
    }
}

/// Place narration clips without overlap.
///
/// `durations` is parallel to `comments` (synthesized clip lengths in
/// seconds); a missing or zero entry means the clip takes no time and can
/// never conflict. `interrupt_buffer` is the gap forced between a
/// truncated clip and the comment that interrupted it.
pub fn place_comments(
    comments: &[Comment],
    durations: &[f64],
    interrupt_buffer: f64,
) -> Vec<PlacedClip> {
    let mut placed: Vec<PlacedClip> = Vec::with_capacity(comments.len());

    for (i, comment) in comments.iter().enumerate() {
        let duration = durations.get(i).copied().unwrap_or(0.0).max(0.0);

        let conflict = placed.last().filter(|clip| comment.time < clip.end);

        let Some(last) = conflict else {
            placed.push(PlacedClip {
                start: comment.time,
                end: comment.time + duration,
                comment: comment.clone(),
            });
            continue;
        };

        if duration == 0.0 {
            // Zero-length clips never displace anything; mid-clip there is
            // no span to place them in either.
            log::debug!(
                "zero-length comment at {} overlaps previous clip, skipped",
                format_time(comment.time)
            );
            continue;
        }

        if comment.level < last.comment.level {
            log::info!(
                "comment at {} (lv{}) dropped, lv{} clip still playing",
                format_time(comment.time),
                comment.level,
                last.comment.level
            );
            continue;
        }

        if last.start < comment.time - interrupt_buffer {
            // Room to interrupt: cut the previous clip short.
            let cut = comment.time - interrupt_buffer;
            log::debug!(
                "clip at {} truncated to {} by lv{} comment",
                format_time(last.start),
                format_time(cut),
                comment.level
            );
            if let Some(prev) = placed.last_mut() {
                prev.end = cut;
            }
        } else {
            // Too close to its own start: the previous clip is superseded
            // entirely. Only this one clip is removed; an earlier clip's
            // truncation is never resurrected.
            log::info!(
                "clip at {} (lv{}) superseded by lv{} comment at {}",
                format_time(last.start),
                last.comment.level,
                comment.level,
                format_time(comment.time)
            );
            placed.pop();
        }

        placed.push(PlacedClip {
            start: comment.time,
            end: comment.time + duration,
            comment: comment.clone(),
        });
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::comment::Comment;

    fn comment(time: f64, level: u8) -> Comment {
        Comment::for_event(time, format!("lv{} at {}", level, time), "test-event", level)
    }

    fn spans(clips: &[PlacedClip]) -> Vec<(f64, f64)> {
        clips.iter().map(|c| (c.start, c.end)).collect()
    }

    #[test]
    fn test_no_conflict_sequential() {
        let comments = vec![comment(10.0, 3), comment(20.0, 1)];
        let clips = place_comments(&comments, &[5.0, 5.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 15.0), (20.0, 25.0)]);
    }

    #[test]
    fn test_lower_priority_dropped() {
        // (t=10, dur=5, lv3) then (t=12, dur=5, lv1), buffer 0.5
        let comments = vec![comment(10.0, 3), comment(12.0, 1)];
        let clips = place_comments(&comments, &[5.0, 5.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 15.0)]);
    }

    #[test]
    fn test_higher_priority_truncates() {
        // (t=10, dur=5, lv3) then (t=12, dur=5, lv8): 10 < 11.5, truncate.
        let comments = vec![comment(10.0, 3), comment(12.0, 8)];
        let clips = place_comments(&comments, &[5.0, 5.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 11.5), (12.0, 17.0)]);
    }

    #[test]
    fn test_higher_priority_replaces_when_too_close() {
        // Previous clip started at 11.8 > 12 - 0.5: removed entirely.
        let comments = vec![comment(11.8, 3), comment(12.0, 8)];
        let clips = place_comments(&comments, &[5.0, 5.0], 0.5);
        assert_eq!(spans(&clips), vec![(12.0, 17.0)]);
    }

    #[test]
    fn test_equal_priority_favors_newer() {
        let comments = vec![comment(10.0, 5), comment(12.0, 5)];
        let clips = place_comments(&comments, &[5.0, 5.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 11.5), (12.0, 17.0)]);
    }

    #[test]
    fn test_removal_does_not_resurrect_earlier_truncation() {
        // Clip A truncated by B; B then removed by C. A stays truncated.
        let comments = vec![comment(10.0, 5), comment(12.0, 6), comment(12.2, 7)];
        let clips = place_comments(&comments, &[5.0, 5.0, 5.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 11.5), (12.2, 17.2)]);
    }

    #[test]
    fn test_zero_duration_never_conflicts() {
        let comments = vec![comment(10.0, 3), comment(12.0, 8), comment(20.0, 1)];
        let clips = place_comments(&comments, &[5.0, 0.0, 0.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 15.0), (20.0, 20.0)]);
    }

    #[test]
    fn test_missing_duration_treated_as_zero() {
        let comments = vec![comment(10.0, 3), comment(20.0, 1)];
        let clips = place_comments(&comments, &[5.0], 0.5);
        assert_eq!(spans(&clips), vec![(10.0, 15.0), (20.0, 20.0)]);
    }

    #[test]
    fn test_output_non_overlapping() {
        let comments = vec![
            comment(0.0, 2),
            comment(3.0, 4),
            comment(3.2, 4),
            comment(9.0, 1),
            comment(10.0, 9),
        ];
        let clips = place_comments(&comments, &[6.0, 6.0, 6.0, 6.0, 6.0], 0.5);
        for pair in clips.windows(2) {
            assert!(pair[0].end <= pair[1].start, "{:?} overlaps {:?}", pair[0], pair[1]);
        }
    }
}

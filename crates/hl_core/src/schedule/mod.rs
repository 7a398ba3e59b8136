//! The temporal scheduling core.
//!
//! Pure, synchronous, single pass: the same inputs always produce the
//! same schedule, so a resumed batch can re-run any stage against
//! reloaded checkpoints and land on identical output.

pub mod commentary;
pub mod deadball;
pub mod replay;
pub mod scoreboard;
pub mod timeline;

pub use commentary::{place_comments, PlacedClip};
pub use deadball::{track_deadballs, DeadballInterval};
pub use replay::{schedule_replays, ReplaySlot};
pub use scoreboard::{build_scoreboard, ScoreboardSegment};
pub use timeline::{assemble_timeline, ClockMap, OutputSegment, SegmentKind};

use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::error::{Result, ScheduleError};
use crate::models::event::{ensure_sorted, Event};
use crate::models::comment::Comment;
use crate::models::game::Game;

/// Everything the pipeline computed, ready for the composition layer.
/// Scoreboard segments and audio clips are already translated to the
/// output clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub deadballs: Vec<DeadballInterval>,
    pub replays: Vec<ReplaySlot>,
    pub segments: Vec<OutputSegment>,
    pub scoreboard: Vec<ScoreboardSegment>,
    pub audio: Vec<PlacedClip>,
    pub clock: ClockMap,
}

/// Run the full pipeline: dead-ball tracking, replay slotting, scoreboard
/// partitioning, narration placement, timeline assembly, then overlay
/// translation into the output clock.
///
/// `durations` is parallel to `comments` (synthesized clip lengths).
pub fn build_schedule(
    game: &Game,
    events: &[Event],
    comments: &[Comment],
    durations: &[f64],
    cfg: &ScheduleConfig,
) -> Result<Schedule> {
    game.check_clock()?;
    ensure_sorted(events)?;

    for event in events {
        if event.time < game.start || event.time > game.end {
            return Err(ScheduleError::OutOfRange {
                context: "event",
                time: event.time,
                match_start: game.start,
                match_end: game.end,
            });
        }
    }

    let deadballs = track_deadballs(events);
    for interval in &deadballs {
        interval.check()?;
    }
    log::info!("tracked {} dead-ball intervals", deadballs.len());

    let replays = schedule_replays(events, &deadballs, &cfg.replay);
    log::info!("scheduled {} replays", replays.len());

    let scoreboard = build_scoreboard(&game.score_updates, game.start, game.end)?;

    let audio = place_comments(comments, durations, cfg.commentary.interrupt_buffer);
    log::info!(
        "placed {} of {} narration clips",
        audio.len(),
        comments.len()
    );

    let (segments, clock) = assemble_timeline(game.end, &replays, &cfg.replay);

    // Overlays are authored on the match clock; shift them by the offset
    // in force at their own start.
    let scoreboard = scoreboard
        .into_iter()
        .map(|s| ScoreboardSegment {
            start: clock.to_output(s.start),
            end: clock.to_output(s.end),
            ..s
        })
        .collect();
    let audio = audio
        .into_iter()
        .map(|clip| {
            let shift = clock.offset_at(clip.start);
            PlacedClip { start: clip.start + shift, end: clip.end + shift, ..clip }
        })
        .collect();

    Ok(Schedule { deadballs, replays, segments, scoreboard, audio, clock })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventKind;
    use crate::models::game::Team;
    use crate::models::score::ScoreUpdate;

    fn game(end: f64) -> Game {
        Game {
            name: "test".into(),
            teams: [
                Team { name: "Home".into(), color: None, code: None, score: 0 },
                Team { name: "Away".into(), color: None, code: None, score: 0 },
            ],
            quarter: None,
            narrator: None,
            description: None,
            start: 0.0,
            end,
            score_updates: Vec::new(),
        }
    }

    #[test]
    fn test_pipeline_end_to_end() {
        let mut game = game(1800.0);
        game.score_updates.push(ScoreUpdate::new(600.0, 1, 0));

        let events = vec![
            Event::new(EventKind::Start, 0.0),
            Event::new(EventKind::Goal, 599.0).with_team(0),
            Event::new(EventKind::Kickoff, 620.0),
            Event::new(EventKind::End, 1800.0),
        ];
        let comments = vec![
            Comment::idle(30.0, "quiet opening"),
            Comment::for_event(599.0, "goal!", "599-goal", 10),
        ];
        let durations = vec![4.0, 6.0];

        let schedule =
            build_schedule(&game, &events, &comments, &durations, &ScheduleConfig::default())
                .unwrap();

        // Goal opens a dead ball closed by the kickoff.
        assert_eq!(schedule.deadballs, vec![DeadballInterval { start: 599.0, end: 620.0 }]);
        // 21 s window fits the 8 s replay; slot centered.
        assert_eq!(schedule.replays.len(), 1);
        assert_eq!(schedule.replays[0].slot_time, 599.0 + (21.0 - 8.0) / 2.0);
        // Scoreboard translated: the 600 s boundary lands after the 8 s
        // replay block inserted at the 603 s cut.
        assert_eq!(schedule.scoreboard.len(), 2);
        assert_eq!(schedule.scoreboard[0].start, 0.0);
        assert_eq!(schedule.scoreboard[0].end, 600.0);
        assert_eq!(schedule.scoreboard[1].end, 1808.0);
        // Both comments placed; the early one untouched by the offset.
        assert_eq!(schedule.audio.len(), 2);
        assert_eq!(schedule.audio[0].start, 30.0);
        assert_eq!(schedule.audio[1].start, 599.0);
    }

    #[test]
    fn test_idempotent() {
        let events = vec![
            Event::new(EventKind::Start, 0.0),
            Event::new(EventKind::Foul, 100.0),
            Event::new(EventKind::Continue, 115.0),
        ];
        let comments = vec![Comment::for_event(100.0, "a foul", "100-foul", 6)];
        let game = game(1800.0);
        let cfg = ScheduleConfig::default();

        let a = build_schedule(&game, &events, &comments, &[3.0], &cfg).unwrap();
        let b = build_schedule(&game, &events, &comments, &[3.0], &cfg).unwrap();
        assert_eq!(a, b);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn test_out_of_range_event_rejected() {
        let events = vec![Event::new(EventKind::Goal, 2000.0)];
        let err = build_schedule(&game(1800.0), &events, &[], &[], &ScheduleConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::OutOfRange { context: "event", .. }));
    }

    #[test]
    fn test_unsorted_events_rejected() {
        let events = vec![
            Event::new(EventKind::Goal, 100.0),
            Event::new(EventKind::Start, 0.0),
        ];
        let err = build_schedule(&game(1800.0), &events, &[], &[], &ScheduleConfig::default())
            .unwrap_err();
        assert!(matches!(err, ScheduleError::UnsortedEvents { .. }));
    }

    #[test]
    fn test_no_replays_identity_timeline() {
        let events = vec![Event::new(EventKind::Start, 0.0)];
        let schedule =
            build_schedule(&game(1800.0), &events, &[], &[], &ScheduleConfig::default()).unwrap();
        assert!(schedule.replays.is_empty());
        assert_eq!(schedule.segments.len(), 1);
        assert_eq!(schedule.clock.to_output(700.0), 700.0);
    }
}

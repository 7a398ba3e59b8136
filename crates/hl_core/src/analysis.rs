//! Event-log analysis helpers.
//!
//! The narration generator and TTS live outside this crate; what belongs
//! here is the timing side of analysis: where idle filler slots go, how a
//! goal moves the score log, and which source ranges make standalone goal
//! clips.

use crate::clock::format_time;
use crate::config::{CommentaryConfig, GoalClipConfig};
use crate::models::event::{Event, EventKind};
use crate::models::game::Game;

/// Timestamps where idle filler narration should be generated: one slot
/// per cadence interval of silence, stopping the configured guard short of
/// the next event so filler never talks over real action.
pub fn plan_idle_slots(events: &[Event], match_start: f64, cfg: &CommentaryConfig) -> Vec<f64> {
    let mut slots = Vec::new();
    let mut last_spoken = match_start;

    for event in events {
        let mut t = last_spoken + cfg.idle_cadence;
        while t < event.time - cfg.idle_guard {
            slots.push(t);
            t += cfg.idle_cadence;
        }
        last_spoken = event.time;
    }

    slots
}

/// Fold goal events into the game's score log. The update lands one
/// second after the goal event so the replayed moment still shows the old
/// score.
pub fn record_score_updates(game: &mut Game, events: &[Event]) {
    for event in events {
        if event.kind != EventKind::Goal {
            continue;
        }
        let Some(team) = event.team else {
            log::info!(
                "goal at {} has no team, score not updated",
                format_time(event.time)
            );
            continue;
        };
        game.record_goal(event.time + 1.0, team);
    }
}

/// Source ranges for standalone goal clips, clamped to the match clock.
pub fn goal_clip_ranges(
    events: &[Event],
    match_start: f64,
    match_end: f64,
    cfg: &GoalClipConfig,
) -> Vec<(f64, f64)> {
    events
        .iter()
        .filter(|e| e.kind == EventKind::Goal)
        .map(|e| {
            (
                (e.time - cfg.before).max(match_start),
                (e.time + cfg.after).min(match_end),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::game::Team;

    fn commentary() -> CommentaryConfig {
        CommentaryConfig::default()
    }

    #[test]
    fn test_idle_slots_respect_cadence_and_guard() {
        let events = vec![
            Event::new(EventKind::Start, 0.0),
            Event::new(EventKind::Goal, 100.0),
        ];
        let slots = plan_idle_slots(&events, 0.0, &commentary());
        // 30 and 60 fit; 90 is inside the 10 s guard before the goal.
        assert_eq!(slots, vec![30.0, 60.0]);
    }

    #[test]
    fn test_no_idle_between_close_events() {
        let events = vec![
            Event::new(EventKind::Foul, 10.0),
            Event::new(EventKind::Continue, 25.0),
        ];
        assert!(plan_idle_slots(&events, 0.0, &commentary()).is_empty());
    }

    #[test]
    fn test_record_score_updates() {
        let mut game = Game {
            name: "t".into(),
            teams: [
                Team { name: "H".into(), color: None, code: None, score: 0 },
                Team { name: "A".into(), color: None, code: None, score: 0 },
            ],
            quarter: None,
            narrator: None,
            description: None,
            start: 0.0,
            end: 1800.0,
            score_updates: Vec::new(),
        };
        let events = vec![
            Event::new(EventKind::Goal, 599.0).with_team(0),
            Event::new(EventKind::Goal, 900.0), // no team: skipped
            Event::new(EventKind::Goal, 1200.0).with_team(1),
        ];
        record_score_updates(&mut game, &events);
        assert_eq!(game.score(), (1, 1));
        assert_eq!(game.score_updates.len(), 2);
        // Nudged past the goal moment.
        assert_eq!(game.score_updates[0].time, 600.0);
    }

    #[test]
    fn test_goal_clip_ranges_clamped() {
        let events = vec![
            Event::new(EventKind::Goal, 3.0).with_team(0),
            Event::new(EventKind::Goal, 1798.0).with_team(1),
        ];
        let ranges = goal_clip_ranges(&events, 0.0, 1800.0, &GoalClipConfig::default());
        assert_eq!(ranges, vec![(0.0, 10.0), (1793.0, 1800.0)]);
    }
}

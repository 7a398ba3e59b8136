//! Replay slot assignment.
//!
//! Each dead-ball window long enough to hold a slowed-down replay gets at
//! most one slot, given to the most recent still-unassigned Replay-tagged
//! event before the window opens. Assignment is first-write-wins: a later
//! window never re-targets an event that already has a slot. The canonical
//! event log is never mutated; assignments come back as a side table.

use serde::{Deserialize, Serialize};

use crate::clock::format_time;
use crate::config::ReplayConfig;
use crate::models::event::{Event, Tag};
use crate::schedule::deadball::DeadballInterval;

/// One scheduled replay: which event, and where its clip sits on the
/// match clock.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReplaySlot {
    /// Id of the replayed event in the canonical log.
    pub event_id: String,
    /// The replayed moment, seconds on the match clock.
    pub event_time: f64,
    /// Start of the replay playback window, centered in its dead ball.
    pub slot_time: f64,
}

/// Assign replay slots. Both inputs are expected sorted ascending by time
/// and are sorted defensively if not. Replay-tagged events that never find
/// a qualifying window are skipped by policy, not error.
pub fn schedule_replays(
    events: &[Event],
    deadballs: &[DeadballInterval],
    cfg: &ReplayConfig,
) -> Vec<ReplaySlot> {
    let mut candidates: Vec<&Event> =
        events.iter().filter(|e| e.has_tag(Tag::Replay)).collect();
    candidates.sort_by(|a, b| a.time.total_cmp(&b.time));

    let mut windows: Vec<DeadballInterval> = deadballs.to_vec();
    windows.sort_by(|a, b| a.start.total_cmp(&b.start));

    let min_window = cfg.min_window();
    let mut assigned = vec![false; candidates.len()];
    let mut slots = Vec::new();

    for window in &windows {
        if window.duration() < min_window {
            log::debug!(
                "dead ball {} too short for a replay ({:.1}s < {:.1}s)",
                window,
                window.duration(),
                min_window
            );
            continue;
        }

        // Most recent unassigned candidate at or before the window opens.
        let pick = candidates
            .iter()
            .enumerate()
            .take_while(|(_, e)| e.time <= window.start)
            .filter(|(i, _)| !assigned[*i])
            .last();

        let Some((i, event)) = pick else { continue };
        assigned[i] = true;

        let slot_time = window.start + (window.duration() - cfg.output_duration()) / 2.0;
        slots.push(ReplaySlot {
            event_id: event.id.clone(),
            event_time: event.time,
            slot_time,
        });
    }

    for (i, event) in candidates.iter().enumerate() {
        if !assigned[i] {
            log::info!(
                "no dead ball fits a replay of {} at {}, skipped",
                event.kind,
                format_time(event.time)
            );
        }
    }

    slots.sort_by(|a, b| a.slot_time.total_cmp(&b.slot_time));
    slots
}

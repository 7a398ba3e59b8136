//! Checkpoint persistence.
//!
//! Long batch runs checkpoint intermediate state so an interrupted job can
//! resume: the event log (YAML, or the CSV the hand-marking workflow
//! writes), narration comments, and the analysis bundle of comments plus
//! score updates plus dead-ball intervals. The round-trip is lossless for
//! every field the scheduler reads, so re-running a stage on reloaded data
//! reproduces an uninterrupted run exactly.

pub mod error;

pub use error::{CheckpointError, Result};

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::clock::{format_time, parse_time};
use crate::models::comment::Comment;
use crate::models::event::{event_id, Event, EventKind, Tag};
use crate::models::score::ScoreUpdate;
use crate::schedule::deadball::DeadballInterval;

/// The analysis stage's bundle, written once event analysis finishes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AnalysisCheckpoint {
    /// Wall-clock save time, informational only; never feeds scheduling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<chrono::DateTime<chrono::Utc>>,
    pub comments: Vec<Comment>,
    pub score_updates: Vec<ScoreUpdate>,
    pub deadballs: Vec<DeadballInterval>,
}

impl AnalysisCheckpoint {
    /// Stamp the bundle with the current wall clock before saving.
    pub fn stamped(mut self) -> Self {
        self.saved_at = Some(chrono::Utc::now());
        self
    }
}

/// Save any serde'd collection as YAML.
pub fn save_yaml<T: Serialize, P: AsRef<Path>>(value: &T, path: P) -> Result<()> {
    let data = serde_yaml::to_string(value)?;
    fs::write(path, data)?;
    Ok(())
}

/// Load YAML written by [`save_yaml`]. A missing file is an empty state,
/// matching the resume-from-scratch behavior of the batch stages.
pub fn load_yaml<T: DeserializeOwned + Default, P: AsRef<Path>>(path: P) -> Result<T> {
    if !path.as_ref().exists() {
        return Ok(T::default());
    }
    let data = fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&data)?)
}

const EVENT_HEADERS: [&str; 6] = ["time", "type", "tags", "team", "player", "desc"];

/// Write the event log in the hand-marking CSV format: `mm:ss.s` times,
/// snake_case kinds, comma-joined tags inside one field.
pub fn save_events_csv<P: AsRef<Path>>(events: &[Event], path: P) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(EVENT_HEADERS)?;
    for event in events {
        let tags: Vec<&str> = event.tags.iter().map(|t| t.as_str()).collect();
        writer.write_record([
            format_time(event.time).as_str(),
            event.kind.as_key(),
            tags.join(",").as_str(),
            event.team.map(|t| t.to_string()).unwrap_or_default().as_str(),
            event.player.as_deref().unwrap_or(""),
            event.desc.as_deref().unwrap_or(""),
        ])?;
    }
    writer.flush().map_err(CheckpointError::Io)?;
    Ok(())
}

/// Read a hand-marked event log. A missing file is an empty log.
pub fn load_events_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Event>> {
    if !path.as_ref().exists() {
        return Ok(Vec::new());
    }
    let mut reader = csv::Reader::from_path(path)?;
    let mut events = Vec::new();

    for (row, record) in reader.records().enumerate() {
        let record = record?;

        let time_str = field(&record, 0, "time", row)?;
        let time = parse_time(time_str).ok_or_else(|| CheckpointError::BadValue {
            row,
            message: format!("unparseable time '{time_str}'"),
        })?;
        let kind = EventKind::from_str(field(&record, 1, "type", row)?)
            .map_err(|message| CheckpointError::BadValue { row, message })?;
        let tags = field(&record, 2, "tags", row)?
            .split(',')
            .filter(|s| !s.is_empty())
            .map(Tag::from_str)
            .collect::<std::result::Result<Vec<Tag>, String>>()
            .map_err(|message| CheckpointError::BadValue { row, message })?;
        let team = match field(&record, 3, "team", row)? {
            "" => None,
            s => Some(s.parse::<u8>().map_err(|e| CheckpointError::BadValue {
                row,
                message: format!("bad team index: {e}"),
            })?),
        };
        let player = match field(&record, 4, "player", row)? {
            "" => None,
            s => Some(s.to_string()),
        };
        let desc = match field(&record, 5, "desc", row)? {
            "" => None,
            s => Some(s.to_string()),
        };

        events.push(Event {
            id: event_id(kind, time),
            kind,
            time,
            team,
            player,
            desc,
            tags,
        });
    }

    Ok(events)
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &'static str,
    row: usize,
) -> Result<&'r str> {
    record.get(index).ok_or(CheckpointError::MissingColumn { name, row })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::EventKind;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_roundtrip_events() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.yaml");

        let events = vec![
            Event::new(EventKind::Start, 0.0),
            Event::new(EventKind::Goal, 599.5).with_team(1).with_player("no. 7"),
        ];
        save_yaml(&events, &path).unwrap();
        let loaded: Vec<Event> = load_yaml(&path).unwrap();
        assert_eq!(events, loaded);
    }

    #[test]
    fn test_missing_file_is_empty_state() {
        let dir = tempdir().unwrap();
        let loaded: Vec<Event> = load_yaml(dir.path().join("nope.yaml")).unwrap();
        assert!(loaded.is_empty());
        let events = load_events_csv(dir.path().join("nope.csv")).unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_csv_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.csv");

        let events = vec![
            Event::new(EventKind::Start, 0.0),
            Event::new(EventKind::Foul, 30.5).with_team(0).with_desc("late challenge"),
            Event::new(EventKind::Continue, 40.0),
        ];
        save_events_csv(&events, &path).unwrap();
        let loaded = load_events_csv(&path).unwrap();
        assert_eq!(events, loaded);
    }

    #[test]
    fn test_csv_bad_kind_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("events.csv");
        fs::write(&path, "time,type,tags,team,player,desc\n00:10.0,volley,,,,\n").unwrap();
        let err = load_events_csv(&path).unwrap_err();
        assert!(matches!(err, CheckpointError::BadValue { row: 0, .. }));
    }

    #[test]
    fn test_analysis_checkpoint_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("analysis.yaml");

        let checkpoint = AnalysisCheckpoint {
            comments: vec![Comment::idle(30.0, "a calm start")],
            score_updates: vec![ScoreUpdate::new(600.0, 1, 0)],
            deadballs: vec![DeadballInterval { start: 599.0, end: 620.0 }],
            ..Default::default()
        }
        .stamped();
        save_yaml(&checkpoint, &path).unwrap();
        let loaded: AnalysisCheckpoint = load_yaml(&path).unwrap();
        assert_eq!(checkpoint.comments, loaded.comments);
        assert_eq!(checkpoint.score_updates, loaded.score_updates);
        assert_eq!(checkpoint.deadballs, loaded.deadballs);
        assert!(loaded.saved_at.is_some());
    }
}

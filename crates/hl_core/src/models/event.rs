//! Canonical match events.
//!
//! Events arrive from detection/annotation already ordered by match clock.
//! The scheduler never branches on the kind directly: everything it needs
//! (priority level, capability tags) comes from the per-kind metadata
//! table, built once at first use.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::clock::format_time;
use crate::error::{Result, ScheduleError};

/// Closed set of recognized event kinds.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Start,
    End,
    Goal,
    Miss,
    Foul,
    Out,
    Continue,
    Breakthrough,
    Save,
    Kickoff,
    Tackle,
    Pass,
    Comment,
    Other,
}

/// Capability tags driving the schedulers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Worth a slow-motion replay.
    Replay,
    /// Play pauses at this event.
    Deadball,
    /// Play resumes at this event.
    Liveball,
}

/// Per-kind metadata: narration priority level, tags assigned by default
/// at annotation time, and the display name used in logs and summaries.
#[derive(Debug, Clone)]
pub struct KindInfo {
    pub level: u8,
    pub default_tags: &'static [Tag],
    pub display_name: &'static str,
}

static KIND_TABLE: Lazy<HashMap<EventKind, KindInfo>> = Lazy::new(|| {
    use EventKind::*;
    use Tag::*;
    let mut table = HashMap::new();
    let mut put = |kind, level, default_tags: &'static [Tag], display_name| {
        table.insert(kind, KindInfo { level, default_tags, display_name });
    };
    put(Start, 7, &[Liveball], "match start");
    put(End, 7, &[Deadball], "match end");
    put(Goal, 10, &[Replay, Deadball], "goal");
    put(Miss, 8, &[Replay, Deadball], "shot off target");
    put(Foul, 6, &[Replay, Deadball], "foul");
    put(Out, 3, &[Deadball], "ball out of play");
    put(Continue, 2, &[Liveball], "play resumes");
    put(Breakthrough, 7, &[Replay], "breakthrough");
    put(Save, 8, &[Replay], "save");
    put(Kickoff, 4, &[Liveball], "kickoff");
    put(Tackle, 5, &[], "tackle");
    put(Pass, 2, &[], "pass");
    put(Comment, 5, &[], "commentary note");
    put(Other, 1, &[], "other");
    table
});

impl EventKind {
    pub fn info(&self) -> &'static KindInfo {
        &KIND_TABLE[self]
    }

    /// Narration priority level for comments triggered by this kind.
    pub fn level(&self) -> u8 {
        self.info().level
    }

    pub fn default_tags(&self) -> &'static [Tag] {
        self.info().default_tags
    }
}

impl EventKind {
    /// Stable key used in ids and the CSV event log; matches the serde
    /// snake_case form.
    pub fn as_key(&self) -> &'static str {
        match self {
            EventKind::Start => "start",
            EventKind::End => "end",
            EventKind::Goal => "goal",
            EventKind::Miss => "miss",
            EventKind::Foul => "foul",
            EventKind::Out => "out",
            EventKind::Continue => "continue",
            EventKind::Breakthrough => "breakthrough",
            EventKind::Save => "save",
            EventKind::Kickoff => "kickoff",
            EventKind::Tackle => "tackle",
            EventKind::Pass => "pass",
            EventKind::Comment => "comment",
            EventKind::Other => "other",
        }
    }
}

impl std::str::FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "start" => Ok(EventKind::Start),
            "end" => Ok(EventKind::End),
            "goal" => Ok(EventKind::Goal),
            "miss" => Ok(EventKind::Miss),
            "foul" => Ok(EventKind::Foul),
            "out" => Ok(EventKind::Out),
            "continue" => Ok(EventKind::Continue),
            "breakthrough" => Ok(EventKind::Breakthrough),
            "save" => Ok(EventKind::Save),
            "kickoff" => Ok(EventKind::Kickoff),
            "tackle" => Ok(EventKind::Tackle),
            "pass" => Ok(EventKind::Pass),
            "comment" => Ok(EventKind::Comment),
            "other" => Ok(EventKind::Other),
            other => Err(format!("unknown event kind: {other}")),
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.info().display_name)
    }
}

impl Tag {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tag::Replay => "Replay",
            Tag::Deadball => "Deadball",
            Tag::Liveball => "Liveball",
        }
    }
}

impl std::str::FromStr for Tag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Replay" => Ok(Tag::Replay),
            "Deadball" => Ok(Tag::Deadball),
            "Liveball" => Ok(Tag::Liveball),
            other => Err(format!("unknown tag: {other}")),
        }
    }
}

/// A point-in-time match occurrence.
///
/// The replay slot assigned in scheduling is *not* stored here; the replay
/// scheduler emits a side table keyed by event id so the canonical log
/// stays immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    /// Seconds on the match clock.
    pub time: f64,
    /// Team index, 0 or 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub player: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub desc: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<Tag>,
}

impl Event {
    /// Create an event with the kind's default tags and the deterministic
    /// `{time}-{kind}` id the marking workflow uses.
    pub fn new(kind: EventKind, time: f64) -> Self {
        Event {
            id: event_id(kind, time),
            kind,
            time,
            team: None,
            player: None,
            desc: None,
            tags: kind.default_tags().to_vec(),
        }
    }

    pub fn with_team(mut self, team: u8) -> Self {
        self.team = Some(team);
        self
    }

    pub fn with_player(mut self, player: impl Into<String>) -> Self {
        self.player = Some(player.into());
        self
    }

    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = Some(desc.into());
        self
    }

    pub fn with_tags(mut self, tags: Vec<Tag>) -> Self {
        self.tags = tags;
        self
    }

    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    pub fn level(&self) -> u8 {
        self.kind.level()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} @ {}", self.kind, format_time(self.time))?;
        if let Some(team) = self.team {
            write!(f, " (team {})", team)?;
        }
        Ok(())
    }
}

/// Deterministic event id: `{time}-{kind}`.
pub fn event_id(kind: EventKind, time: f64) -> String {
    format!("{}-{}", time, kind.as_key())
}

/// The canonical sequence must be non-decreasing in time.
pub fn ensure_sorted(events: &[Event]) -> Result<()> {
    for (i, pair) in events.windows(2).enumerate() {
        if pair[1].time < pair[0].time {
            return Err(ScheduleError::UnsortedEvents {
                index: i + 1,
                prev: pair[0].time,
                next: pair[1].time,
            });
        }
    }
    Ok(())
}

use thiserror::Error;

/// Scheduling failures. Only `MalformedInterval` and `CoverageBroken`
/// indicate a logic defect and must abort the batch; the range and
/// ordering variants are caller errors reported back verbatim.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScheduleError {
    #[error("malformed interval in {context}: end {end} <= start {start}")]
    MalformedInterval {
        context: &'static str,
        start: f64,
        end: f64,
    },

    #[error("scoreboard coverage broken at {at}: expected boundary {expected}")]
    CoverageBroken { at: f64, expected: f64 },

    #[error("{context} timestamp {time} outside match clock [{match_start}, {match_end}]")]
    OutOfRange {
        context: &'static str,
        time: f64,
        match_start: f64,
        match_end: f64,
    },

    #[error("event sequence not sorted at index {index}: {prev} followed by {next}")]
    UnsortedEvents { index: usize, prev: f64, next: f64 },

    #[error("match clock empty or inverted: start {start}, end {end}")]
    EmptyMatchClock { start: f64, end: f64 },
}

pub type Result<T> = std::result::Result<T, ScheduleError>;

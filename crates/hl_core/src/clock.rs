//! Match-clock helpers.
//!
//! All scheduling works in seconds on the match clock (`f64`). The marking
//! and project files write times as `mm:ss.s`, so the codecs go through
//! these two functions.

/// Format seconds as `mm:ss.s`.
pub fn format_time(seconds: f64) -> String {
    let minutes = (seconds / 60.0).floor() as i64;
    let rest = seconds - minutes as f64 * 60.0;
    format!("{:02}:{:04.1}", minutes, rest)
}

/// Parse `mm:ss.s` or a plain number of seconds.
pub fn parse_time(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match value.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: i64 = minutes.parse().ok()?;
            let seconds: f64 = seconds.parse().ok()?;
            Some(minutes as f64 * 60.0 + seconds)
        }
        None => value.parse().ok(),
    }
}

//! Session time accounting.
//!
//! A stopwatch reports how long it ran, a timer reports how much of its
//! target is left. Callers hand over whatever their widget shows (sometimes
//! seconds, sometimes milliseconds) and get back a `SessionRecord` whose
//! start, end and duration agree with each other.

use crate::models::mode::SessionMode;
use crate::models::session::SessionRecord;
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

/// Above this value a tick count is read as milliseconds, whatever the mode.
pub const MILLIS_THRESHOLD: f64 = 100_000.0;

/// Above this value a stopwatch tick count is read as milliseconds.
pub const STOPWATCH_MILLIS_THRESHOLD: f64 = 1_000.0;

/// The wall-clock moment a session was stopped, as the caller knows it.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EndMoment {
    /// Not recorded: the session ends "now".
    #[default]
    Absent,
    /// An absolute moment.
    At(DateTime<Utc>),
    /// Milliseconds since the Unix epoch.
    EpochMillis(i64),
    /// Free text: a number of epoch milliseconds or a calendar string.
    Text(String),
}

impl EndMoment {
    /// Build from optional CLI input. Blank input counts as absent.
    pub fn from_input(input: Option<&str>) -> Self {
        match input.map(str::trim) {
            None | Some("") => EndMoment::Absent,
            Some(s) => EndMoment::Text(s.to_string()),
        }
    }

    /// Resolve to epoch milliseconds. Anything that cannot be read as a
    /// moment after the epoch falls back to `now`; this includes `0` and the
    /// epoch itself, which are treated as "not recorded".
    pub fn resolve(&self, now: DateTime<Utc>) -> i64 {
        let fallback = now.timestamp_millis();

        let resolved = match self {
            EndMoment::Absent => None,
            EndMoment::At(dt) => Some(dt.timestamp_millis()),
            EndMoment::EpochMillis(ms) => Some(*ms),
            EndMoment::Text(s) => parse_moment(s),
        };

        match resolved {
            Some(ms) if ms > 0 && DateTime::from_timestamp_millis(ms).is_some() => ms,
            _ => fallback,
        }
    }
}

/// Numeric text first (epoch ms), then calendar formats.
fn parse_moment(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(n) = s.parse::<f64>() {
        return n.is_finite().then_some(n.trunc() as i64);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }

    // Date and time without an offset: local wall-clock time.
    for fmt in [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return naive
                .and_local_timezone(Local)
                .earliest()
                .map(|dt| dt.timestamp_millis());
        }
    }

    // Bare date: midnight UTC.
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}

/// Raw input captured when a stopwatch or timer is stopped.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeEntry {
    /// Elapsed (stopwatch) or remaining (timer) time; seconds or milliseconds.
    pub raw_value: f64,
    pub mode: SessionMode,
    /// Configured timer length. Ignored for stopwatches.
    pub target_minutes: f64,
    pub end_moment: EndMoment,
}

impl TimeEntry {
    pub fn stopwatch(elapsed: f64, end_moment: EndMoment) -> Self {
        Self {
            raw_value: elapsed,
            mode: SessionMode::CountUp,
            target_minutes: 0.0,
            end_moment,
        }
    }

    pub fn timer(target_minutes: f64, remaining: f64, end_moment: EndMoment) -> Self {
        Self {
            raw_value: remaining,
            mode: SessionMode::CountDown,
            target_minutes,
            end_moment,
        }
    }
}

fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}

/// Guess the unit of a tick value and return it in seconds.
///
/// Values above [`MILLIS_THRESHOLD`] are milliseconds for every mode.
/// Stopwatch values above [`STOPWATCH_MILLIS_THRESHOLD`] are milliseconds too,
/// because the stopwatch ticks every 100 ms. This misreads genuinely long
/// sessions reported in seconds; replacing it needs callers to tag the unit.
pub fn normalize_to_seconds(raw: f64, mode: SessionMode) -> f64 {
    let t = finite_or_zero(raw);

    if t > MILLIS_THRESHOLD || (mode.is_count_up() && t > STOPWATCH_MILLIS_THRESHOLD) {
        (t / 1000.0).round()
    } else {
        t
    }
}

/// Whole seconds actually worked, never negative.
pub fn duration_seconds(entry: &TimeEntry) -> i64 {
    let t = normalize_to_seconds(entry.raw_value, entry.mode);

    let worked = match entry.mode {
        SessionMode::CountDown => {
            let target = (finite_or_zero(entry.target_minutes) * 60.0).floor().max(0.0);
            target - t.floor()
        }
        SessionMode::CountUp => t.floor(),
    };

    worked.max(0.0) as i64
}

/// ISO 8601 UTC with millisecond precision, e.g. `2025-09-01T08:00:00.000Z`.
pub fn iso_from_millis(ms: i64) -> String {
    DateTime::from_timestamp_millis(ms)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Build the session record for `entry`, using `now` for a missing end moment.
///
/// The duration never reaches back before the epoch, so
/// `start_time + duration_seconds == end_time` holds for every record.
pub fn reconcile_at(
    owner_id: &str,
    task_id: Option<i64>,
    entry: &TimeEntry,
    now: DateTime<Utc>,
) -> SessionRecord {
    let end_ts = entry.end_moment.resolve(now);
    let duration = duration_seconds(entry).min(end_ts.max(0) / 1000);
    let start_ts = end_ts - duration * 1000;

    SessionRecord {
        id: 0,
        owner_id: owner_id.to_string(),
        task_id,
        mode: entry.mode,
        start_time: iso_from_millis(start_ts),
        end_time: iso_from_millis(end_ts),
        duration_seconds: duration,
        created_at: now.to_rfc3339(),
    }
}

/// Same as [`reconcile_at`] with the current time.
pub fn reconcile(owner_id: &str, task_id: Option<i64>, entry: &TimeEntry) -> SessionRecord {
    reconcile_at(owner_id, task_id, entry, Utc::now())
}

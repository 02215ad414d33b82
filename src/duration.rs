use chrono::{DateTime, TimeDelta, Utc};
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Weeks,
    Days,
    Hours,
    Minutes,
    Seconds,
    Milliseconds,
    Microseconds,
}

impl Unit {
    const COUNT: usize = 7;

    fn index(self) -> usize {
        self as usize
    }
}

/// Recognized tokens, larger units first and the longest alias first within a unit.
/// Input must follow this order: "1d 1h" parses, "1h 1d" does not.
const UNIT_ALIASES: &[(Unit, &[&str])] = &[
    (Unit::Weeks, &["weeks", "week", "w"]),
    (Unit::Days, &["days", "day", "d"]),
    (Unit::Hours, &["hours", "hour", "h"]),
    (Unit::Minutes, &["minutes", "minute", "mins", "min", "m"]),
    (Unit::Seconds, &["seconds", "second", "secs", "sec", "s"]),
    (Unit::Milliseconds, &["milliseconds", "millisecond"]),
    (Unit::Microseconds, &["microseconds", "microsecond"]),
];

static DURATION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    let groups: String = UNIT_ALIASES
        .iter()
        .flat_map(|(_, aliases)| aliases.iter())
        .map(|alias| format!(r"((?P<{alias}>[0-9]+)\s?{alias}[-\s:]?)?"))
        .collect();
    // Built from the constant table above.
    Regex::new(&format!("^{groups}$")).expect("duration pattern is valid")
});

/// Parse strings like "3w 12h 57m" or "5w:12h:57m".
///
/// Returns `None` when the whole input is not consumed by unit groups in
/// descending order, or when the total does not fit in a `TimeDelta`.
/// Counts must be ASCII digits; other Unicode digits are not accepted.
pub fn parse_duration(input: &str) -> Option<TimeDelta> {
    let caps = DURATION_REGEX.captures(input)?;

    let mut counts = [0i64; Unit::COUNT];
    for (unit, aliases) in UNIT_ALIASES {
        for alias in aliases.iter() {
            if let Some(m) = caps.name(alias) {
                let value: i64 = m.as_str().parse().ok()?;
                let slot = &mut counts[unit.index()];
                *slot = slot.checked_add(value)?;
            }
        }
    }

    let [weeks, days, hours, minutes, seconds, millis, micros] = counts;
    [
        TimeDelta::try_weeks(weeks)?,
        TimeDelta::try_days(days)?,
        TimeDelta::try_hours(hours)?,
        TimeDelta::try_minutes(minutes)?,
        TimeDelta::try_seconds(seconds)?,
        TimeDelta::try_milliseconds(millis)?,
        TimeDelta::microseconds(micros),
    ]
    .into_iter()
    .try_fold(TimeDelta::zero(), |acc, part| acc.checked_add(&part))
}

const MINUTE: f64 = 60.0;
const HOUR: f64 = 60.0 * MINUTE;
const DAY: f64 = 24.0 * HOUR;
const MONTH: f64 = 30.4375 * DAY;
const YEAR: f64 = 365.25 * DAY;

/// Thresholds are strict: exactly one day is reported in hours.
const SCALES: &[(f64, &str)] = &[
    (YEAR, "years"),
    (MONTH, "months"),
    (DAY, "days"),
    (HOUR, "hours"),
    (MINUTE, "mins."),
];

#[derive(Debug, Clone, PartialEq)]
pub struct ScaledTime {
    pub text: String,
    pub scale: f64,
    pub units: &'static str,
}

/// Render an amount of seconds in the coarsest unit it exceeds, e.g. "21.00 days".
///
/// Only finite, non-negative amounts are meaningful. Anything else still
/// formats: negatives and NaN land in "secs.", +inf in "years".
pub fn format_scaled(seconds: f64) -> ScaledTime {
    let (scale, units) = SCALES
        .iter()
        .copied()
        .find(|(scale, _)| seconds > *scale)
        .unwrap_or((1.0, "secs."));

    ScaledTime {
        text: format!("{:.2} {}", seconds / scale, units),
        scale,
        units,
    }
}

pub fn format_elapsed(start: DateTime<Utc>) -> String {
    let elapsed = Utc::now().signed_duration_since(start);
    format_scaled(delta_as_secs(elapsed)).text
}

fn delta_as_secs(delta: TimeDelta) -> f64 {
    match delta.num_microseconds() {
        Some(us) => us as f64 / 1_000_000.0,
        None => delta.num_seconds() as f64,
    }
}

//! Extractor — matches apiserver request lines and coerces their fields.
//!
//! A request line looks like
//!
//! ```text
//! I0101 10:20:30.123456 1234 handler.go:56] GET /api/v1/pods: (5ms) 200 [kubectl/v1.13 10.0.0.1:443]
//! ```
//!
//! Lines that do not have this shape are not requests and yield `None`.
//! Sub-fields that match structurally but fail to coerce fall back to zero
//! values so the row is still written.

use crate::duration::parse_duration;
use crate::types::ParsedRecord;
use chrono::{NaiveDate, NaiveTime, TimeDelta};
use regex::Regex;

/// Captures: time-of-day, method, path, latency, response code, caller.
///
/// Digits and whitespace are ASCII only (`[0-9]`, `[\t\n\f\r ]`); the `regex`
/// crate's `\d` and `\s` would also accept Unicode digits and separators.
const REQUEST_LINE: &str = concat!(
    r"^I[0-9]+[\t\n\f\r ]+([0-9:.]+)[\t\n\f\r ]+[^\]]+\]",
    r"[\t\n\f\r ]+([A-Z]+)[\t\n\f\r ]+([^:]+):",
    r"[\t\n\f\r ]+\(([^)]+)\)[\t\n\f\r ]+([0-9]+)",
    r"[\t\n\f\r ]+\[([^\t\n\f\r ]+)[\t\n\f\r ]+",
);

const TIME_OF_DAY: &str = "%H:%M:%S%.f";

/// Compiled request pattern plus the calendar day applied to timestamps.
///
/// Immutable after construction; workers share one instance behind an `Arc`.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
    reference_date: NaiveDate,
}

impl Extractor {
    pub fn new(reference_date: NaiveDate) -> Self {
        Self {
            pattern: Regex::new(REQUEST_LINE).expect("request line pattern must compile"),
            reference_date,
        }
    }

    /// Extract a record from `line`, or `None` if it is not a request line.
    pub fn extract(&self, line: &str) -> Option<ParsedRecord> {
        let caps = self.pattern.captures(line)?;

        // TODO: count coercion fallbacks so the zero-value leniency can be
        // measured before deciding whether to reject such lines.
        let time = NaiveTime::parse_from_str(&caps[1], TIME_OF_DAY).unwrap_or_default();
        let latency = parse_duration(&caps[4]).unwrap_or(0);
        let response_code = caps[5].parse::<i64>().unwrap_or(0);

        Some(ParsedRecord {
            timestamp: self.reference_date.and_time(time).and_utc(),
            method: caps[2].to_string(),
            path: caps[3].to_string(),
            latency: TimeDelta::nanoseconds(latency),
            response_code,
            caller: caps[6].to_string(),
        })
    }
}

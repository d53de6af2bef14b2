//! Core record types for kal-core.
//!
//! A [`ParsedRecord`] is one apiserver request line after extraction. It is
//! rendered to a single CSV row by [`ParsedRecord::to_csv`] before it enters
//! the record queue, so the sink writer only ever handles finished lines.

use crate::config::LatencyFormat;
use crate::duration::format_duration;
use chrono::{DateTime, TimeDelta, Utc};

/// First line of every output file.
pub const HEADER: &str = "Time,Method,Path,Latency,ResponseCode,Caller";

/// A request extracted from one apiserver log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRecord {
    /// Time-of-day from the line placed on the configured reference date (UTC).
    pub timestamp: DateTime<Utc>,
    /// HTTP verb as logged, e.g. `GET`, `WATCH`, `LIST`.
    pub method: String,
    /// Request URI up to the first colon.
    pub path: String,
    /// Zero when the logged latency was not a valid duration.
    pub latency: TimeDelta,
    /// Zero when the logged code overflowed.
    pub response_code: i64,
    /// Client identity from the bracketed trailer (user agent or remote address).
    pub caller: String,
}

impl ParsedRecord {
    /// Watch requests stay open for minutes; their latency is the watch
    /// lifetime rather than request latency.
    pub fn is_watch(&self) -> bool {
        self.path.contains("watch=true")
    }

    /// Nanoseconds since the Unix epoch. Reference dates are validated to the
    /// representable range, so the fallback is never hit in practice.
    pub fn timestamp_nanos(&self) -> i64 {
        self.timestamp.timestamp_nanos_opt().unwrap_or_default()
    }

    /// Latency in nanoseconds.
    pub fn latency_nanos(&self) -> i64 {
        self.latency.num_nanoseconds().unwrap_or_default()
    }

    /// Render as a row matching [`HEADER`]. Fields are written verbatim.
    pub fn to_csv(&self, latency_format: LatencyFormat) -> String {
        let latency = match latency_format {
            LatencyFormat::Text => format_duration(self.latency_nanos()),
            LatencyFormat::Nanos => self.latency_nanos().to_string(),
        };
        format!(
            "{},{},{},{},{},{}",
            self.timestamp_nanos(),
            self.method,
            self.path,
            latency,
            self.response_code,
            self.caller
        )
    }
}

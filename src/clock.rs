//! Timestamp formatting: `EEE MMM dd HH:mm:ss yyyy Z` in the host's local zone.
//!
//! This format is fixed so that `log` output is reproducible; only the
//! wall-clock value — supplied by the caller as an external collaborator —
//! varies.

use chrono::{DateTime, Local, TimeZone, Utc};

const FORMAT: &str = "%a %b %d %H:%M:%S %Y %z";

/// Format a UTC instant as a local-zone timestamp string in the fixed format.
#[must_use]
pub fn format_timestamp(instant: DateTime<Utc>) -> String {
    instant.with_timezone(&Local).format(FORMAT).to_string()
}

/// The timestamp string used for the initial commit: Unix epoch zero,
/// formatted under the host's local zone.
#[must_use]
pub fn epoch_timestamp() -> String {
    format_timestamp(Utc.timestamp_opt(0, 0).single().expect("epoch is a valid instant"))
}

/// The current wall-clock instant, as used by `commit` for non-initial commits.
#[must_use]
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

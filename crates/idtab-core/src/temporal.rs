//! # Temporal Types — UTC Timestamps
//!
//! Chain links record their creation time as Unix epoch seconds. `Timestamp`
//! wraps that as a UTC instant truncated to seconds, and renders as
//! RFC 3339 with a `Z` suffix (`2026-01-15T12:00:00Z`).
//!
//! Verification-cache entries use the same type for their record time,
//! which keeps freshness comparisons in one clock domain.

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

use crate::error::IdtabError;

/// A UTC-only timestamp, truncated to seconds precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Create a timestamp from the current UTC time, truncated to seconds.
    pub fn now() -> Self {
        Self(truncate_to_seconds(Utc::now()))
    }

    /// Create a timestamp from a `chrono::DateTime<Utc>`, truncating sub-seconds.
    pub fn from_utc(dt: DateTime<Utc>) -> Self {
        Self(truncate_to_seconds(dt))
    }

    /// Create a timestamp from a Unix epoch timestamp (seconds).
    pub fn from_epoch_secs(secs: i64) -> Result<Self, IdtabError> {
        let dt = DateTime::from_timestamp(secs, 0)
            .ok_or_else(|| IdtabError::InvalidTimestamp(format!("unix time {secs} out of range")))?;
        Ok(Self(dt))
    }

    /// Access the inner `DateTime<Utc>`.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Returns the Unix epoch timestamp in seconds.
    pub fn epoch_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Whole seconds elapsed from `self` until `later`, saturating at zero.
    pub fn secs_until(&self, later: Timestamp) -> u64 {
        u64::try_from(later.epoch_secs() - self.epoch_secs()).unwrap_or(0)
    }

    /// Render as RFC 3339 with Z suffix.
    pub fn to_iso8601(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%SZ").to_string()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_iso8601())
    }
}

fn truncate_to_seconds(dt: DateTime<Utc>) -> DateTime<Utc> {
    dt.with_nanosecond(0).unwrap_or(dt)
}

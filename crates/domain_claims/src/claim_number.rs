//! Claim number generation
//!
//! Numbers take the form `{prefix}-{year}-{NNNNNN}` where the suffix is the
//! last six digits of the creation time in milliseconds. Two submissions in
//! the same millisecond (or exactly 1000 seconds apart) get the same number,
//! so the store must enforce uniqueness and the service retries creation with
//! a fresh number on conflict.

use chrono::{DateTime, Datelike, Utc};

pub trait ClaimNumberGenerator: Send + Sync {
    /// Produces a candidate number. `attempt` starts at zero and increases
    /// on every retry after a uniqueness conflict.
    fn generate(&self, now: DateTime<Utc>, attempt: u32) -> String;
}

/// Year plus timestamp-suffix scheme
#[derive(Debug, Clone)]
pub struct TimestampClaimNumbers {
    prefix: String,
}

impl TimestampClaimNumbers {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for TimestampClaimNumbers {
    fn default() -> Self {
        Self::new("S75")
    }
}

impl ClaimNumberGenerator for TimestampClaimNumbers {
    fn generate(&self, now: DateTime<Utc>, attempt: u32) -> String {
        // Retries step the clock reading forward so they cannot repeat the
        // number that just collided.
        let millis = now.timestamp_millis().rem_euclid(1_000_000) + i64::from(attempt);
        format!("{}-{}-{:06}", self.prefix, now.year(), millis % 1_000_000)
    }
}

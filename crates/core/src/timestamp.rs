//! Microsecond-precision timestamp type
//!
//! Stored timestamps are microseconds since Unix epoch (1970-01-01 00:00:00 UTC).
//! The value is signed: entity stores accept instants before the epoch.
//!
//! ## Zero Timestamp
//!
//! `Timestamp::ZERO` is the default value of a timestamp field. Fields that
//! carry the auto-now directive treat it as "unset" and are stamped with the
//! current time when encoded.
//!
//! ```
//! use strata_core::Timestamp;
//!
//! let now = Timestamp::now();
//! let from_secs = Timestamp::from_secs(1000);
//! assert!(Timestamp::ZERO.is_zero());
//! assert!(from_secs < now);
//! ```

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Microsecond-precision timestamp
///
/// ## Invariants
///
/// - Timestamps are always in microseconds
/// - Timestamps are comparable and orderable
/// - The zero timestamp represents Unix epoch
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Unix epoch (1970-01-01 00:00:00 UTC), also the "unset" sentinel
    pub const ZERO: Timestamp = Timestamp(0);

    // =========================================================================
    // Constructors
    // =========================================================================

    /// Create a timestamp for the current moment
    ///
    /// Falls back to a negative offset if the system clock is before the epoch.
    pub fn now() -> Self {
        match SystemTime::now().duration_since(UNIX_EPOCH) {
            Ok(d) => Timestamp(i64::try_from(d.as_micros()).unwrap_or(i64::MAX)),
            Err(e) => Timestamp(-i64::try_from(e.duration().as_micros()).unwrap_or(i64::MAX)),
        }
    }

    /// Create a timestamp from microseconds since epoch
    #[inline]
    pub const fn from_micros(micros: i64) -> Self {
        Timestamp(micros)
    }

    /// Create a timestamp from milliseconds since epoch
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis.saturating_mul(1_000))
    }

    /// Create a timestamp from seconds since epoch
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Timestamp(secs.saturating_mul(1_000_000))
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Get microseconds since Unix epoch
    #[inline]
    pub const fn as_micros(&self) -> i64 {
        self.0
    }

    /// Get seconds since Unix epoch (truncates toward negative infinity)
    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0.div_euclid(1_000_000)
    }

    /// Whether this is the zero (unset) timestamp
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Convert to a chrono `DateTime<Utc>`
    ///
    /// Returns `None` when the instant is outside chrono's representable range.
    pub fn to_datetime(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_micros(self.0).single()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339()),
            None => write!(f, "{}us", self.0),
        }
    }
}

/// Truncates to whole microseconds; sub-microsecond nanoseconds are dropped.
impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Timestamp(dt.timestamp_micros())
    }
}

impl From<i64> for Timestamp {
    #[inline]
    fn from(micros: i64) -> Self {
        Timestamp(micros)
    }
}

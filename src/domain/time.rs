// src/domain/time.rs
//
// The canister reports timestamps as nanoseconds since the Unix epoch.

use chrono::{DateTime, TimeZone, Utc};

/// Seven days, expressed in the identity provider's time unit (nanoseconds).
pub const MAX_SESSION_TTL_NANOS: u64 = 7 * 24 * 60 * 60 * 1_000 * 1_000 * 1_000;

/// Convert a canister timestamp into a UTC datetime.
///
/// Values beyond `i64::MAX` nanoseconds (year 2262) saturate.
pub fn from_canister_nanos(nanos: u64) -> DateTime<Utc> {
    let clamped = i64::try_from(nanos).unwrap_or(i64::MAX);
    Utc.timestamp_nanos(clamped)
}

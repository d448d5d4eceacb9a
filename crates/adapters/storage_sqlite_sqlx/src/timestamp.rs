//! Text encoding of timestamps in the `recorded_at` columns.
//!
//! Fixed-width RFC 3339 in UTC so that string order is time order.

use chrono::{DateTime, SecondsFormat, Utc};
use planthub_domain::time::Timestamp;

/// Largest instant that still encodes as a four-digit year.
const MAX_ENCODED_SECS: i64 = 253_402_300_799;

pub(crate) fn encode(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Encode a query bound, pulling open-ended bounds into the encodable range.
pub(crate) fn encode_bound(ts: Timestamp) -> String {
    let upper = DateTime::from_timestamp(MAX_ENCODED_SECS, 0).unwrap_or(DateTime::UNIX_EPOCH);
    encode(ts.clamp(DateTime::UNIX_EPOCH, upper))
}

pub(crate) fn decode(text: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

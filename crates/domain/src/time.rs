//! Time and timestamp helpers.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone, Timelike, Utc};

use crate::error::ValidationError;

/// UTC timestamp used for throttle bookkeeping, history and action records.
pub type Timestamp = DateTime<Utc>;

/// Wall-clock time in the controller's local timezone.
///
/// Quiet hours are expressed in local hours, so policy evaluation takes this
/// rather than a UTC [`Timestamp`].
pub type LocalTime = DateTime<Local>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Return the current local time.
#[must_use]
pub fn local_now() -> LocalTime {
    Local::now()
}

/// Local hour of day (`0..24`) for `time`.
#[must_use]
pub fn hour_of(time: &LocalTime) -> u32 {
    time.hour()
}

/// Parse a `YYYY-MM-DD` calendar date.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidDate`] when `text` is not a valid date.
pub fn parse_date(text: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(text.to_string()))
}

/// Half-open UTC range `[from, to)` covering the local calendar days
/// `since..=until`. Missing bounds are open-ended.
#[must_use]
pub fn local_day_range(since: Option<NaiveDate>, until: Option<NaiveDate>) -> (Timestamp, Timestamp) {
    let from = since.map_or(DateTime::<Utc>::MIN_UTC, local_midnight);
    let to = until
        .and_then(|day| day.checked_add_days(Days::new(1)))
        .map_or(DateTime::<Utc>::MAX_UTC, local_midnight);
    (from, to)
}

fn local_midnight(day: NaiveDate) -> Timestamp {
    let naive = day.and_time(chrono::NaiveTime::MIN);
    Local
        .from_local_datetime(&naive)
        .earliest()
        .map_or_else(|| naive.and_utc(), |t| t.with_timezone(&Utc))
}

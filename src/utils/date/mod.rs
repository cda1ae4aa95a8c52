// Date utility functions
// Calendar-day arithmetic that stays correct across DST transitions

use chrono::{DateTime, Datelike, Days, Duration, LocalResult, NaiveDate, NaiveDateTime, TimeZone};

/// Signed number of calendar days from `from` to `to`.
///
/// Both instants are reduced to their local date first, so a 23 or 25 hour
/// wall-clock day still counts as exactly one day.
pub fn calendar_days_between<Tz: TimeZone>(from: &DateTime<Tz>, to: &DateTime<Tz>) -> i64 {
    days_between(from.date_naive(), to.date_naive())
}

/// Signed number of days from `from` to `to`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    to.signed_duration_since(from).num_days()
}

/// Add whole calendar days to a date, saturating at the representable range.
pub fn add_days(date: NaiveDate, days: i64) -> NaiveDate {
    let shifted = if days < 0 {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_add_days(Days::new(days as u64))
    };
    shifted.unwrap_or(if days < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

/// Move an instant by `days` calendar days, keeping its wall-clock time.
///
/// Ambiguous local times (fall-back) resolve to the earlier instant. Local times
/// that fall in a spring-forward gap move forward to the first valid time.
pub fn shift_days<Tz: TimeZone>(dt: &DateTime<Tz>, days: i64) -> DateTime<Tz> {
    let target = add_days(dt.date_naive(), days).and_time(dt.time());
    resolve_local(&dt.timezone(), target).unwrap_or_else(|| dt.clone())
}

/// Place a date at the wall-clock time of `reference`, in the reference's zone.
pub fn with_date<Tz: TimeZone>(reference: &DateTime<Tz>, date: NaiveDate) -> DateTime<Tz> {
    resolve_local(&reference.timezone(), date.and_time(reference.time()))
        .unwrap_or_else(|| reference.clone())
}

/// Resolve a naive local time in `tz`, stepping over DST gaps.
pub fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    // Gaps are at most a couple of hours wide in every zone chrono-tz ships.
    for step in 0..=3 {
        let candidate = naive + Duration::hours(step);
        match tz.from_local_datetime(&candidate) {
            LocalResult::Single(dt) => return Some(dt),
            LocalResult::Ambiguous(earliest, _) => return Some(earliest),
            LocalResult::None => continue,
        }
    }
    None
}

pub fn start_of_day<Tz: TimeZone>(date: &DateTime<Tz>) -> DateTime<Tz> {
    date.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| resolve_local(&date.timezone(), midnight))
        .unwrap_or_else(|| date.clone())
}

/// Calculate the start of the week containing the given date.
///
/// # Arguments
/// * `date` - The date to find the week start for
/// * `first_day_of_week` - 0 = Sunday, 1 = Monday, etc.
pub fn week_start(date: NaiveDate, first_day_of_week: u8) -> NaiveDate {
    let weekday = date.weekday().num_days_from_sunday() as i64;
    let offset = (weekday - first_day_of_week as i64).rem_euclid(7);
    add_days(date, -offset)
}

/// Number of days in the given month, or 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let Some(first) = NaiveDate::from_ymd_opt(year, month, 1) else {
        return 0;
    };
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next.map_or(0, |next| days_between(first, next) as u32)
}

//! Central-Time calendar math.
//!
//! The log groups sets into workout days by the civil date in
//! `America/Chicago`, regardless of where or when the set was recorded.
//! A set logged at 23:30 Central belongs to that evening's workout even
//! though it is already the next day in UTC.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Chicago;
use chrono_tz::Tz;

/// The timezone that defines workout-day boundaries.
pub const WORKOUT_TZ: Tz = Chicago;

/// Returns the Central-Time civil date of a UTC timestamp.
#[must_use]
pub fn central_date(ts: DateTime<Utc>) -> NaiveDate {
    ts.with_timezone(&WORKOUT_TZ).date_naive()
}

/// Returns today's Central-Time civil date.
#[must_use]
pub fn today_central() -> NaiveDate {
    central_date(Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn midnight_boundary_is_central_not_utc() {
        // 05:59Z is 23:59 CST the previous evening; 06:01Z is 00:01 CST.
        let before = utc(2024, 2, 6, 5, 59, 0);
        let after = utc(2024, 2, 6, 6, 1, 0);

        assert_eq!(central_date(before), NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
        assert_eq!(central_date(after), NaiveDate::from_ymd_opt(2024, 2, 6).unwrap());
    }

    #[test]
    fn daylight_saving_shifts_the_boundary() {
        // After the March 2024 spring-forward, Central is UTC-5, so the
        // day flips at 05:00Z instead of 06:00Z.
        let before = utc(2024, 7, 10, 4, 59, 0);
        let after = utc(2024, 7, 10, 5, 1, 0);

        assert_eq!(central_date(before), NaiveDate::from_ymd_opt(2024, 7, 9).unwrap());
        assert_eq!(central_date(after), NaiveDate::from_ymd_opt(2024, 7, 10).unwrap());
    }

    #[test]
    fn plain_afternoon_maps_to_same_date() {
        let ts = utc(2024, 2, 6, 20, 0, 0);
        assert_eq!(central_date(ts), NaiveDate::from_ymd_opt(2024, 2, 6).unwrap());
    }
}

use chrono::{
    DateTime, Datelike, Days, Duration as ChronoDuration, NaiveDate, NaiveDateTime, Utc,
};

/// Source of "now" for a render pass.
pub trait Clock {
    fn now_utc(&self) -> DateTime<Utc>;

    fn local_today(&self) -> NaiveDate {
        to_local(self.now_utc()).date()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Largest day of `month` that falls on a Sunday.
pub fn last_sunday(year: i32, month: u32) -> Option<NaiveDate> {
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    let last_day = first_of_next.pred_opt()?;
    let back = last_day.weekday().num_days_from_sunday();
    last_day.checked_sub_days(Days::new(u64::from(back)))
}

/// Summer-time interval for `year`: 01:00 UTC on the last Sunday of March up
/// to (excluding) 01:00 UTC on the last Sunday of October.
pub fn summer_time_bounds(year: i32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = last_sunday(year, 3)?.and_hms_opt(1, 0, 0)?;
    let end = last_sunday(year, 10)?.and_hms_opt(1, 0, 0)?;
    Some((start, end))
}

pub fn utc_offset_hours(at: DateTime<Utc>) -> i64 {
    let naive = at.naive_utc();
    match summer_time_bounds(naive.year()) {
        Some((start, end)) if start <= naive && naive < end => 1,
        _ => 0,
    }
}

pub fn to_local(at: DateTime<Utc>) -> NaiveDateTime {
    let naive = at.naive_utc();
    naive
        .checked_add_signed(ChronoDuration::hours(utc_offset_hours(at)))
        .unwrap_or(naive)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn last_sunday_matches_calendar() {
        assert_eq!(last_sunday(2024, 3), NaiveDate::from_ymd_opt(2024, 3, 31));
        assert_eq!(last_sunday(2024, 10), NaiveDate::from_ymd_opt(2024, 10, 27));
        assert_eq!(last_sunday(2025, 3), NaiveDate::from_ymd_opt(2025, 3, 30));
        assert_eq!(last_sunday(2025, 10), NaiveDate::from_ymd_opt(2025, 10, 26));
        assert_eq!(last_sunday(2026, 12), NaiveDate::from_ymd_opt(2026, 12, 27));
    }

    #[test]
    fn summer_time_starts_at_one_am_last_sunday_of_march() {
        assert_eq!(utc_offset_hours(utc(2024, 3, 31, 0, 59)), 0);
        assert_eq!(utc_offset_hours(utc(2024, 3, 31, 1, 0)), 1);
    }

    #[test]
    fn summer_time_ends_at_one_am_last_sunday_of_october() {
        assert_eq!(utc_offset_hours(utc(2024, 10, 27, 0, 59)), 1);
        assert_eq!(utc_offset_hours(utc(2024, 10, 27, 1, 0)), 0);
    }

    #[test]
    fn local_time_wraps_past_midnight() {
        let local = to_local(utc(2025, 7, 12, 23, 30));
        assert_eq!(local.date(), NaiveDate::from_ymd_opt(2025, 7, 13).unwrap());
        assert_eq!(local.format("%H:%M").to_string(), "00:30");
    }

    #[test]
    fn winter_time_is_utc() {
        let local = to_local(utc(2025, 1, 4, 15, 0));
        assert_eq!(local.format("%H:%M").to_string(), "15:00");
    }
}

//! Calendar windows and the canonical timestamp format.
//!
//! Timestamps are persisted as RFC 3339 strings at second precision in
//! UTC ("2026-08-29T10:00:00Z"). With one uniform format, lexicographic
//! comparison in the store matches chronological order, so range
//! predicates can run directly on the stored text.

use chrono::{DateTime, Datelike, Duration, SecondsFormat, TimeZone, Utc};

use crate::model::Period;

/// Render a timestamp in the canonical stored form.
pub fn format_ts(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Parse a stored timestamp back into UTC.
pub fn parse_ts(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc))
}

/// An inclusive time window. `None` bounds are unbounded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeWindow {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn since(start: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: None,
        }
    }

    pub fn between(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    pub fn contains(&self, ts: DateTime<Utc>) -> bool {
        self.start.map_or(true, |s| ts >= s) && self.end.map_or(true, |e| ts <= e)
    }
}

/// First instant of `now`'s calendar day.
pub fn day_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
        .unwrap()
}

/// Last second of `now`'s calendar day.
pub fn day_end(now: DateTime<Utc>) -> DateTime<Utc> {
    day_start(now) + Duration::days(1) - Duration::seconds(1)
}

/// First instant of `now`'s calendar month.
pub fn month_start(now: DateTime<Utc>) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .unwrap()
}

/// Last second of `now`'s calendar month.
pub fn month_end(now: DateTime<Utc>) -> DateTime<Utc> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    Utc.with_ymd_and_hms(year, month, 1, 0, 0, 0).unwrap() - Duration::seconds(1)
}

/// The whole previous calendar month, inclusive of its last second.
pub fn prev_month(now: DateTime<Utc>) -> TimeWindow {
    let start_of_current = month_start(now);
    let end = start_of_current - Duration::seconds(1);
    TimeWindow::between(month_start(end), end)
}

/// Window for period-filtered listings.
///
/// "month" filters only on the start bound here, mirroring the admin
/// incentive listing contract; summaries use [`summary_window`] which
/// closes the month at its last second.
pub fn listing_window(period: Period, now: DateTime<Utc>) -> TimeWindow {
    match period {
        Period::Today => TimeWindow::between(day_start(now), day_end(now)),
        Period::Month => TimeWindow::since(month_start(now)),
        Period::LastMonth => prev_month(now),
        Period::Total => TimeWindow::unbounded(),
    }
}

/// Window for the all-salesmen summaries.
pub fn summary_window(period: Period, now: DateTime<Utc>) -> TimeWindow {
    match period {
        Period::Today => TimeWindow::between(day_start(now), now),
        Period::Month => TimeWindow::between(month_start(now), month_end(now)),
        Period::LastMonth => prev_month(now),
        Period::Total => TimeWindow::unbounded(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn canonical_format_round_trips() {
        let ts = at(2026, 8, 29, 10, 4, 59);
        let s = format_ts(ts);
        assert_eq!(s, "2026-08-29T10:04:59Z");
        assert_eq!(parse_ts(&s).unwrap(), ts);
    }

    #[test]
    fn month_end_is_last_second() {
        assert_eq!(month_end(at(2026, 8, 12, 9, 0, 0)), at(2026, 8, 31, 23, 59, 59));
        assert_eq!(month_end(at(2026, 12, 1, 0, 0, 0)), at(2026, 12, 31, 23, 59, 59));
        // Leap February
        assert_eq!(month_end(at(2024, 2, 3, 0, 0, 0)), at(2024, 2, 29, 23, 59, 59));
        assert_eq!(month_end(at(2025, 2, 3, 0, 0, 0)), at(2025, 2, 28, 23, 59, 59));
    }

    #[test]
    fn last_second_of_month_falls_in_month_window_not_next() {
        let boundary = at(2026, 8, 31, 23, 59, 59);
        let august = summary_window(Period::Month, at(2026, 8, 15, 12, 0, 0));
        let september = summary_window(Period::Month, at(2026, 9, 15, 12, 0, 0));
        assert!(august.contains(boundary));
        assert!(!september.contains(boundary));
    }

    #[test]
    fn prev_month_spans_whole_month() {
        let w = prev_month(at(2026, 3, 10, 8, 0, 0));
        assert_eq!(w.start, Some(at(2026, 2, 1, 0, 0, 0)));
        assert_eq!(w.end, Some(at(2026, 2, 28, 23, 59, 59)));
        // Year wrap
        let w = prev_month(at(2026, 1, 2, 0, 0, 0));
        assert_eq!(w.start, Some(at(2025, 12, 1, 0, 0, 0)));
        assert_eq!(w.end, Some(at(2025, 12, 31, 23, 59, 59)));
    }

    #[test]
    fn today_listing_window_is_the_calendar_day() {
        let w = listing_window(Period::Today, at(2026, 8, 29, 13, 30, 0));
        assert!(w.contains(at(2026, 8, 29, 0, 0, 0)));
        assert!(w.contains(at(2026, 8, 29, 23, 59, 59)));
        assert!(!w.contains(at(2026, 8, 30, 0, 0, 0)));
        assert!(!w.contains(at(2026, 8, 28, 23, 59, 59)));
    }

    #[test]
    fn month_listing_window_has_no_end_bound() {
        let w = listing_window(Period::Month, at(2026, 8, 29, 13, 30, 0));
        assert_eq!(w.start, Some(at(2026, 8, 1, 0, 0, 0)));
        assert_eq!(w.end, None);
    }

    #[test]
    fn total_window_is_unbounded() {
        assert_eq!(listing_window(Period::Total, Utc::now()), TimeWindow::unbounded());
        assert_eq!(summary_window(Period::Total, Utc::now()), TimeWindow::unbounded());
    }
}

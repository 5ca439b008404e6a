//! Calendar-derived model features.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::{PlanError, PlanResult};

/// Features derived from a single calendar date.
///
/// Fields are private: the only way to obtain a value is from a date, so the
/// derived fields can never drift from each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CalendarFeatures {
    date: NaiveDate,
    year: i32,
    month: u32,
    week: u32,
    day: u32,
    weekday: u32,
    is_weekend: bool,
}

impl CalendarFeatures {
    pub fn from_date(date: NaiveDate) -> Self {
        // 0 = Monday .. 6 = Sunday
        let weekday = date.weekday().num_days_from_monday();
        Self {
            date,
            year: date.year(),
            month: date.month(),
            week: date.iso_week().week(),
            day: date.day(),
            weekday,
            is_weekend: weekday >= 5,
        }
    }

    pub fn from_ymd(year: i32, month: u32, day: u32) -> PlanResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self::from_date)
            .ok_or_else(|| {
                PlanError::invalid_input(format!("{year:04}-{month:02}-{day:02} is not a calendar date"))
            })
    }

    /// Parse an ISO `YYYY-MM-DD` date.
    pub fn parse(s: &str) -> PlanResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Self::from_date)
            .map_err(|e| PlanError::invalid_input(format!("invalid date {s:?}: {e}")))
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// ISO week of the year.
    pub fn week(&self) -> u32 {
        self.week
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn weekday(&self) -> u32 {
        self.weekday
    }

    pub fn is_weekend(&self) -> bool {
        self.is_weekend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn saturday_is_weekend() {
        // 2024-06-15 is a Saturday in ISO week 24.
        let c = CalendarFeatures::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(c.year(), 2024);
        assert_eq!(c.month(), 6);
        assert_eq!(c.week(), 24);
        assert_eq!(c.day(), 15);
        assert_eq!(c.weekday(), 5);
        assert!(c.is_weekend());
    }

    #[test]
    fn monday_is_weekday_zero() {
        let c = CalendarFeatures::parse("2024-06-17").unwrap();
        assert_eq!(c.weekday(), 0);
        assert!(!c.is_weekend());
    }

    #[test]
    fn iso_week_wraps_at_year_boundary() {
        // 2021-01-03 (Sunday) still belongs to ISO week 53 of 2020.
        let c = CalendarFeatures::from_ymd(2021, 1, 3).unwrap();
        assert_eq!(c.year(), 2021);
        assert_eq!(c.week(), 53);
        assert_eq!(c.weekday(), 6);
    }

    #[test]
    fn impossible_dates_are_invalid_input() {
        assert!(matches!(
            CalendarFeatures::from_ymd(2023, 2, 29),
            Err(PlanError::InvalidInput(_))
        ));
        assert!(matches!(
            CalendarFeatures::parse("2024-13-01"),
            Err(PlanError::InvalidInput(_))
        ));
    }

    proptest! {
        #[test]
        fn weekend_flag_follows_weekday(days in 0i64..20_000) {
            let date = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap() + chrono::Duration::days(days);
            let c = CalendarFeatures::from_date(date);
            prop_assert!(c.weekday() <= 6);
            prop_assert_eq!(c.is_weekend(), c.weekday() == 5 || c.weekday() == 6);
            prop_assert_eq!(c, CalendarFeatures::from_date(date));
        }
    }
}

// ABOUTME: Gregorian to Jalali calendar-date conversion for display and deep links
// ABOUTME: Pure civil-calendar arithmetic; malformed input degrades to an empty string
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Gregorian → Jalali (Persian) calendar conversion.
//!
//! The provider's booking site and the dialog's date menu both display dates
//! in the Jalali civil calendar while the domain model stays Gregorian. The
//! conversion is the standard day-number arithmetic over the 33-year Jalali
//! leap cycle; it is exact for the date range this system deals in.

use chrono::{Datelike, NaiveDate};
use std::fmt::{Display, Formatter, Result as FmtResult};
use tracing::error;

const GREGORIAN_MONTH_DAYS: [i64; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const JALALI_MONTH_DAYS: [i64; 12] = [31, 31, 31, 31, 31, 31, 30, 30, 30, 30, 30, 29];

/// A date in the Jalali civil calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JalaliDate {
    /// Jalali year
    pub year: i32,
    /// Jalali month, 1-12
    pub month: u32,
    /// Jalali day of month, 1-31
    pub day: u32,
}

impl Display for JalaliDate {
    // Unpadded `year-month-day`, the format the booking site expects
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}-{}-{}", self.year, self.month, self.day)
    }
}

/// Convert a Gregorian civil date to its Jalali equivalent
#[must_use]
pub fn from_gregorian(date: NaiveDate) -> JalaliDate {
    let gy = i64::from(date.year()) - 1600;
    let gm = date.month0() as usize;
    let gd = i64::from(date.day()) - 1;

    let mut g_day_no = 365 * gy + (gy + 3) / 4 - (gy + 99) / 100 + (gy + 399) / 400;
    g_day_no += GREGORIAN_MONTH_DAYS[..gm].iter().sum::<i64>();
    if gm > 1 && is_gregorian_leap(date.year()) {
        g_day_no += 1;
    }
    g_day_no += gd;

    // Day 0 of the Jalali epoch base (979-01-01) is 79 days into year 1600
    let mut j_day_no = g_day_no - 79;
    let cycles = j_day_no / 12053;
    j_day_no %= 12053;

    let mut year = 979 + 33 * cycles + 4 * (j_day_no / 1461);
    j_day_no %= 1461;
    if j_day_no >= 366 {
        year += (j_day_no - 1) / 365;
        j_day_no = (j_day_no - 1) % 365;
    }

    let mut month = 0;
    while month < 11 && j_day_no >= JALALI_MONTH_DAYS[month] {
        j_day_no -= JALALI_MONTH_DAYS[month];
        month += 1;
    }

    JalaliDate {
        year: year as i32,
        month: month as u32 + 1,
        day: j_day_no as u32 + 1,
    }
}

/// Localize a Gregorian `YYYY-MM-DD` string into the Jalali display form.
///
/// Malformed input is logged and degrades to an empty string; callers
/// tolerate the empty value in messages and links.
#[must_use]
pub fn localize(gregorian: &str) -> String {
    match NaiveDate::parse_from_str(gregorian, "%Y-%m-%d") {
        Ok(date) => from_gregorian(date).to_string(),
        Err(err) => {
            error!("invalid Gregorian date {gregorian:?}: {err}");
            String::new()
        }
    }
}

fn is_gregorian_leap(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn convert(y: i32, m: u32, d: u32) -> String {
        from_gregorian(NaiveDate::from_ymd_opt(y, m, d).unwrap()).to_string()
    }

    #[test]
    fn nowruz_pins() {
        assert_eq!(convert(2023, 3, 21), "1402-1-1");
        assert_eq!(convert(2024, 3, 20), "1403-1-1");
        // Exercises the year-boundary carry for a 365-day tail year
        assert_eq!(convert(2021, 3, 21), "1400-1-1");
    }

    #[test]
    fn mid_year_regression_pin() {
        assert_eq!(convert(2024, 5, 1), "1403-2-12");
    }

    #[test]
    fn day_before_nowruz_lands_in_esfand() {
        assert_eq!(convert(2024, 3, 19), "1402-12-29");
    }

    #[test]
    fn localize_formats_valid_dates() {
        assert_eq!(localize("2024-05-01"), "1403-2-12");
    }

    #[test]
    fn localize_degrades_to_empty_on_malformed_input() {
        assert_eq!(localize("01/05/2024"), "");
        assert_eq!(localize("not-a-date"), "");
        assert_eq!(localize(""), "");
    }
}

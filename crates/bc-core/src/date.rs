//! Calendar date validation
//!
//! The wire format for blocked dates is exactly `DD-MM-YYYY`. Validation is
//! purely arithmetic: no calendar library is involved, so parsing behaves
//! identically on every platform and locale. February is treated as having
//! 29 days in every year; the booking calendar deliberately does not apply
//! leap-year rules.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Maximum day per month, 1-indexed by month. February is fixed at 29.
const DAYS_IN_MONTH: [u8; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Earliest year the calendar accepts.
pub const MIN_YEAR: u16 = 2024;
/// Latest year the calendar accepts.
pub const MAX_YEAR: u16 = 2100;

/// A validated calendar date.
///
/// Field order gives the derived `Ord` true chronological ordering, which is
/// what the registry sorts by. The date value is its own identity; there is
/// no separate ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedDate {
    year: u16,
    month: u8,
    day: u8,
}

impl NormalizedDate {
    /// Validate a raw `DD-MM-YYYY` string.
    ///
    /// Rejects anything that is not exactly two digits, a dash, two digits,
    /// a dash and four digits, and anything outside the supported day, month
    /// and year ranges. Pure function, no side effects.
    pub fn parse(raw: &str) -> Result<Self> {
        let bytes = raw.as_bytes();
        if bytes.len() != 10 || bytes[2] != b'-' || bytes[5] != b'-' {
            return Err(Error::InvalidDate(
                "expected the format DD-MM-YYYY".to_string(),
            ));
        }
        for (i, b) in bytes.iter().enumerate() {
            if i == 2 || i == 5 {
                continue;
            }
            if !b.is_ascii_digit() {
                return Err(Error::InvalidDate(
                    "expected the format DD-MM-YYYY".to_string(),
                ));
            }
        }

        let day = two_digits(bytes[0], bytes[1]);
        let month = two_digits(bytes[3], bytes[4]);
        let year = u16::from(two_digits(bytes[6], bytes[7])) * 100
            + u16::from(two_digits(bytes[8], bytes[9]));

        if !(1..=12).contains(&month) {
            return Err(Error::InvalidDate(format!(
                "month {month:02} is out of range"
            )));
        }
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return Err(Error::InvalidDate(format!(
                "year {year} is outside {MIN_YEAR}-{MAX_YEAR}"
            )));
        }
        let max_day = DAYS_IN_MONTH[usize::from(month) - 1];
        if day < 1 || day > max_day {
            return Err(Error::InvalidDate(format!(
                "day {day:02} is out of range for month {month:02}"
            )));
        }

        Ok(Self { year, month, day })
    }

    pub fn day(&self) -> u8 {
        self.day
    }

    pub fn month(&self) -> u8 {
        self.month
    }

    pub fn year(&self) -> u16 {
        self.year
    }
}

fn two_digits(hi: u8, lo: u8) -> u8 {
    (hi - b'0') * 10 + (lo - b'0')
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:02}-{:04}", self.day, self.month, self.year)
    }
}

impl FromStr for NormalizedDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_dates() {
        let date = NormalizedDate::parse("15-03-2025").unwrap();
        assert_eq!(date.day(), 15);
        assert_eq!(date.month(), 3);
        assert_eq!(date.year(), 2025);
        assert_eq!(date.to_string(), "15-03-2025");
    }

    #[test]
    fn rejects_wrong_shape() {
        for raw in [
            "",
            "15-3-2025",
            "15/03/2025",
            "2025-03-15",
            "15-03-25",
            "15-03-20255",
            "1a-03-2025",
            "15-03-2o25",
            " 15-03-2025",
            "15-03-2025 ",
        ] {
            assert!(NormalizedDate::parse(raw).is_err(), "accepted {raw:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_fields() {
        assert!(NormalizedDate::parse("00-03-2025").is_err());
        assert!(NormalizedDate::parse("32-01-2025").is_err());
        assert!(NormalizedDate::parse("15-00-2025").is_err());
        assert!(NormalizedDate::parse("15-13-2025").is_err());
        assert!(NormalizedDate::parse("15-03-2023").is_err());
        assert!(NormalizedDate::parse("15-03-2101").is_err());
    }

    #[test]
    fn respects_days_per_month_table() {
        assert!(NormalizedDate::parse("31-01-2025").is_ok());
        assert!(NormalizedDate::parse("31-04-2025").is_err());
        assert!(NormalizedDate::parse("30-04-2025").is_ok());
        assert!(NormalizedDate::parse("31-06-2025").is_err());
        assert!(NormalizedDate::parse("30-02-2025").is_err());
    }

    #[test]
    fn february_is_always_29_days() {
        // 2025 is not a leap year; the fixed table accepts Feb 29 anyway.
        assert!(NormalizedDate::parse("29-02-2025").is_ok());
        assert!(NormalizedDate::parse("29-02-2024").is_ok());
    }

    #[test]
    fn orders_chronologically_not_lexicographically() {
        let a = NormalizedDate::parse("20-12-2024").unwrap();
        let b = NormalizedDate::parse("05-01-2025").unwrap();
        // As raw strings "05-01-2025" < "20-12-2024"; chronologically it is later.
        assert!(a < b);

        let c = NormalizedDate::parse("15-02-2024").unwrap();
        let d = NormalizedDate::parse("15-01-2025").unwrap();
        assert!(c < d);
    }

    #[test]
    fn round_trips_through_from_str() {
        let date: NormalizedDate = "01-01-2024".parse().unwrap();
        assert_eq!(date.to_string(), "01-01-2024");
    }
}

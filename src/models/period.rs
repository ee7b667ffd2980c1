//! Budget month representation
//!
//! Every budget cycle is one calendar month. The month label ("October 2026")
//! names archive entries and the `from_month` of Want Wallet movements.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month budget period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthPeriod {
    pub year: i32,
    pub month: u32,
}

impl MonthPeriod {
    /// Create a month period, validating the month number
    pub fn new(year: i32, month: u32) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::InvalidMonth(month));
        }
        Ok(Self { year, month })
    }

    /// The month containing `date`
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// The current local month
    pub fn current() -> Self {
        Self::containing(chrono::Local::now().date_naive())
    }

    /// English month name, e.g. "October"
    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month.clamp(1, 12) - 1) as usize]
    }

    pub fn start_date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or_default()
    }

    /// Last day of the month (inclusive)
    pub fn end_date(&self) -> NaiveDate {
        self.next().start_date() - Duration::days(1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date() && date <= self.end_date()
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Parse "2025-01", "January 2025" or "jan 2025"
    pub fn parse(s: &str) -> Result<Self, PeriodParseError> {
        let s = s.trim();

        if let Some((year, month)) = s.split_once('-') {
            let year: i32 = year
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            let month: u32 = month
                .parse()
                .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;
            return Self::new(year, month);
        }

        let mut parts = s.split_whitespace();
        let (Some(name), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(PeriodParseError::InvalidFormat(s.to_string()));
        };

        let name = name.to_lowercase();
        let month = MONTH_NAMES
            .iter()
            .position(|m| {
                let m = m.to_lowercase();
                m == name || (name.len() >= 3 && m.starts_with(&name))
            })
            .ok_or_else(|| PeriodParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = year
            .parse()
            .map_err(|_| PeriodParseError::InvalidFormat(s.to_string()))?;

        Self::new(year, month as u32 + 1)
    }

    /// Machine-friendly key, e.g. "2025-01"
    pub fn key(&self) -> String {
        format!("{:04}-{:02}", self.year, self.month)
    }
}

impl fmt::Display for MonthPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// Error type for period parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PeriodParseError {
    InvalidFormat(String),
    InvalidMonth(u32),
}

impl fmt::Display for PeriodParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodParseError::InvalidFormat(s) => write!(f, "Invalid month format: {}", s),
            PeriodParseError::InvalidMonth(m) => write!(f, "Invalid month: {}", m),
        }
    }
}

impl std::error::Error for PeriodParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_bounds() {
        let feb = MonthPeriod::new(2024, 2).unwrap();
        assert_eq!(feb.start_date(), NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(feb.end_date(), NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
        assert!(feb.contains(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap()));
        assert!(!feb.contains(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
    }

    #[test]
    fn test_navigation_wraps_year() {
        let dec = MonthPeriod::new(2024, 12).unwrap();
        assert_eq!(dec.next(), MonthPeriod::new(2025, 1).unwrap());
        assert_eq!(dec.next().prev(), dec);
    }

    #[test]
    fn test_parse_formats() {
        let expected = MonthPeriod::new(2025, 1).unwrap();
        assert_eq!(MonthPeriod::parse("2025-01").unwrap(), expected);
        assert_eq!(MonthPeriod::parse("January 2025").unwrap(), expected);
        assert_eq!(MonthPeriod::parse("jan 2025").unwrap(), expected);
        assert_eq!(
            MonthPeriod::parse("2025-13"),
            Err(PeriodParseError::InvalidMonth(13))
        );
        assert!(MonthPeriod::parse("ja 2025").is_err());
        assert!(MonthPeriod::parse("2025").is_err());
    }

    #[test]
    fn test_display_and_key() {
        let oct = MonthPeriod::new(2026, 10).unwrap();
        assert_eq!(oct.to_string(), "October 2026");
        assert_eq!(oct.month_name(), "October");
        assert_eq!(oct.key(), "2026-10");
    }
}

//! Reporting period definitions.
//!
//! This module defines [`PeriodType`] for classifying statement columns and
//! [`PeriodKey`], the canonical `YYYY.MM` identifier of an annual column.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValuationError;

/// Suffix appended to the display form of an estimated period.
pub const ESTIMATE_SUFFIX: &str = "(E)";

/// Period type for fundamental statement columns.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PeriodType {
    /// Annual reporting period.
    #[default]
    Annual,
    /// Quarterly reporting period.
    Quarterly,
}

/// Canonical identifier of an annual reporting period.
///
/// Ordering is chronological on `(year, month)`; a confirmed and an estimated
/// figure for the same month order the confirmed one first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PeriodKey {
    year: i32,
    month: u32,
    estimate: bool,
}

impl PeriodKey {
    /// Creates a confirmed period. Returns `None` for a month outside `1..=12`.
    #[must_use]
    pub const fn new(year: i32, month: u32) -> Option<Self> {
        if month == 0 || month > 12 {
            return None;
        }
        Some(Self {
            year,
            month,
            estimate: false,
        })
    }

    /// Marks the period as an analyst estimate.
    #[must_use]
    pub const fn estimated(mut self) -> Self {
        self.estimate = true;
        self
    }

    /// Fiscal year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Closing month of the fiscal year.
    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// Returns true if the period carries the estimate marker.
    #[must_use]
    pub const fn is_estimate(&self) -> bool {
        self.estimate
    }

    /// Last calendar day of the period's closing month.
    #[must_use]
    pub fn period_end(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)?
            .checked_add_months(Months::new(1))?
            .pred_opt()
    }

    /// Elapsed years from `earlier` to `self`, counting months as twelfths.
    #[must_use]
    pub fn years_since(&self, earlier: &Self) -> f64 {
        let months = (i64::from(self.year) - i64::from(earlier.year)) * 12
            + (i64::from(self.month) - i64::from(earlier.month));
        months as f64 / 12.0
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}.{:02}", self.year, self.month)?;
        if self.estimate {
            f.write_str(ESTIMATE_SUFFIX)?;
        }
        Ok(())
    }
}

impl FromStr for PeriodKey {
    type Err = ValuationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (date, estimate) = match s.strip_suffix(ESTIMATE_SUFFIX) {
            Some(rest) => (rest.trim_end(), true),
            None => (s, false),
        };
        let invalid = || ValuationError::Parse(format!("invalid period: {s}"));

        let (year, month) = date.split_once('.').ok_or_else(invalid)?;
        if year.len() != 4 || month.len() != 2 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        let key = Self::new(year, month).ok_or_else(invalid)?;
        Ok(if estimate { key.estimated() } else { key })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_and_parse() {
        let key = PeriodKey::new(2023, 12).unwrap();
        assert_eq!(key.to_string(), "2023.12");
        assert_eq!(key.estimated().to_string(), "2023.12(E)");

        assert_eq!("2023.12".parse::<PeriodKey>().unwrap(), key);
        assert_eq!("2024.03(E)".parse::<PeriodKey>().unwrap().month(), 3);
        assert!("2024.03(E)".parse::<PeriodKey>().unwrap().is_estimate());
        assert!("2024.13".parse::<PeriodKey>().is_err());
        assert!("24.12".parse::<PeriodKey>().is_err());
        assert!("매출액".parse::<PeriodKey>().is_err());
    }

    #[test]
    fn test_chronological_order() {
        let a = PeriodKey::new(2021, 12).unwrap();
        let b = PeriodKey::new(2022, 3).unwrap();
        let c = PeriodKey::new(2022, 12).unwrap().estimated();
        assert!(a < b && b < c);
        assert!(PeriodKey::new(2022, 12).unwrap() < c);
    }

    #[test]
    fn test_period_end() {
        let feb = PeriodKey::new(2024, 2).unwrap();
        assert_eq!(feb.period_end(), NaiveDate::from_ymd_opt(2024, 2, 29));
        let dec = PeriodKey::new(2023, 12).unwrap();
        assert_eq!(dec.period_end(), NaiveDate::from_ymd_opt(2023, 12, 31));
    }

    #[test]
    fn test_years_since() {
        let start = PeriodKey::new(2020, 12).unwrap();
        let end = PeriodKey::new(2023, 12).unwrap();
        assert!((end.years_since(&start) - 3.0).abs() < 1e-12);
        let mid = PeriodKey::new(2021, 6).unwrap();
        assert!((mid.years_since(&start) - 0.5).abs() < 1e-12);
    }
}

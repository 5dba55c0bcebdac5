use crate::error::ReportError;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The calendar month a report covers. The month is checked on construction,
/// so later lookups by month never go out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPeriod")]
pub struct ReportPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawPeriod> for ReportPeriod {
    type Error = ReportError;

    fn try_from(raw: RawPeriod) -> Result<Self, Self::Error> {
        ReportPeriod::new(raw.year, raw.month)
    }
}

impl ReportPeriod {
    pub fn new(year: i32, month: u32) -> Result<Self, ReportError> {
        if !(1..=12).contains(&month) {
            return Err(ReportError::InvalidPeriod { year, month });
        }
        Ok(Self { year, month })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Zero-based month, always in `0..12`.
    pub fn month0(&self) -> usize {
        (self.month - 1) as usize
    }
}

impl From<NaiveDate> for ReportPeriod {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for ReportPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_months_outside_the_calendar() {
        assert!(ReportPeriod::new(2024, 0).is_err());
        assert!(ReportPeriod::new(2024, 13).is_err());
        let p = ReportPeriod::new(2024, 3).unwrap();
        assert_eq!((p.year(), p.month()), (2024, 3));
        assert_eq!(p.month0(), 2);
        assert_eq!(p.to_string(), "2024-03");
    }

    #[test]
    fn deserialization_validates() {
        assert!(serde_json::from_str::<ReportPeriod>(r#"{"year":2024,"month":2}"#).is_ok());
        assert!(serde_json::from_str::<ReportPeriod>(r#"{"year":2024,"month":14}"#).is_err());
    }

    #[test]
    fn calendar_dates_give_their_month() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        let p = ReportPeriod::from(date);
        assert_eq!((p.year(), p.month(), p.month0()), (2024, 12, 11));
    }
}

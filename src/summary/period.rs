//! A validated month/year pair and the date window it covers.

use std::fmt::Display;

use time::{Date, Month, OffsetDateTime, UtcOffset};

use crate::Error;

/// A calendar month in a specific year.
///
/// Construction validates the fields, so every `Period` in the rest of the
/// application is a real calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    month: Month,
    year: i32,
}

impl Period {
    /// Create a period from a one-based month number and a year.
    ///
    /// # Errors
    /// Returns [Error::InvalidPeriod] if `month` is not in 1-12 or `year` is
    /// outside 1000-9999.
    pub fn new(month: u8, year: i32) -> Result<Self, Error> {
        let month = Month::try_from(month)
            .map_err(|_| Error::InvalidPeriod(format!("month must be 1-12, got {month}")))?;

        if !(1000..=9999).contains(&year) {
            return Err(Error::InvalidPeriod(format!(
                "year must be a four digit number, got {year}"
            )));
        }

        Ok(Self { month, year })
    }

    /// The period containing today's date in the timezone given by `offset`.
    pub fn current(offset: UtcOffset) -> Self {
        let today = OffsetDateTime::now_utc().to_offset(offset).date();

        Self {
            month: today.month(),
            year: today.year(),
        }
    }

    /// The one-based month number.
    pub fn month(&self) -> u8 {
        self.month as u8
    }

    /// The four digit year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The half-open date window `[start, end)` covered by this period.
    ///
    /// `start` is the first day of the month and `end` is the first day of the
    /// next month, so a record belongs to the period when
    /// `start <= date < end`.
    pub fn window(&self) -> (Date, Date) {
        let start = Date::from_calendar_date(self.year, self.month, 1)
            .expect("the first day of a valid month always exists");

        let (next_year, next_month) = match self.month {
            Month::December => (self.year + 1, Month::January),
            month => (self.year, month.next()),
        };

        let end = Date::from_calendar_date(next_year, next_month, 1)
            .expect("the first day of a valid month always exists");

        (start, end)
    }
}

impl Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.month(), self.year)
    }
}

#[cfg(test)]
mod period_tests {
    use time::macros::date;

    use crate::Error;

    use super::Period;

    #[test]
    fn new_accepts_valid_period() {
        let period = Period::new(5, 2024).unwrap();

        assert_eq!(period.month(), 5);
        assert_eq!(period.year(), 2024);
    }

    #[test]
    fn new_rejects_month_zero() {
        assert!(matches!(Period::new(0, 2024), Err(Error::InvalidPeriod(_))));
    }

    #[test]
    fn new_rejects_month_thirteen() {
        assert!(matches!(
            Period::new(13, 2024),
            Err(Error::InvalidPeriod(_))
        ));
    }

    #[test]
    fn new_rejects_three_digit_year() {
        assert!(matches!(Period::new(5, 999), Err(Error::InvalidPeriod(_))));
    }

    #[test]
    fn new_rejects_five_digit_year() {
        assert!(matches!(
            Period::new(5, 10_000),
            Err(Error::InvalidPeriod(_))
        ));
    }

    #[test]
    fn window_covers_whole_month() {
        let period = Period::new(5, 2024).unwrap();

        let (start, end) = period.window();

        assert_eq!(start, date!(2024 - 05 - 01));
        assert_eq!(end, date!(2024 - 06 - 01));
    }

    #[test]
    fn window_rolls_over_december() {
        let period = Period::new(12, 2024).unwrap();

        let (start, end) = period.window();

        assert_eq!(start, date!(2024 - 12 - 01));
        assert_eq!(end, date!(2025 - 01 - 01));
    }

    #[test]
    fn window_handles_february_in_leap_year() {
        let period = Period::new(2, 2024).unwrap();

        let (start, end) = period.window();

        assert_eq!(start, date!(2024 - 02 - 01));
        assert_eq!(end, date!(2024 - 03 - 01));
    }
}

// Source of "today" for statements that cover the current month

use chrono::{Datelike, NaiveDate, Utc};

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;

    /// (month 1-12, year)
    fn current_period(&self) -> (u32, i32) {
        let today = self.today();
        (today.month(), today.year())
    }
}

/// Wall clock, UTC
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always reports the same day
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    date: NaiveDate,
}

impl FixedClock {
    pub fn new(date: NaiveDate) -> Self {
        FixedClock { date }
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.date
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_period() {
        let clock = FixedClock::new(NaiveDate::from_ymd_opt(2024, 3, 15).unwrap());
        assert_eq!(clock.current_period(), (3, 2024));
    }

    #[test]
    fn test_system_clock_month_in_range() {
        let (month, year) = SystemClock.current_period();
        assert!((1..=12).contains(&month));
        assert!(year >= 2024);
    }
}
